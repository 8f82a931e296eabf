//! Bounded 2-opt improvement.
//!
//! Each sweep scans segment reversals `[i, j]` with both ends strictly
//! inside the route, applies the first one that stays feasible and shortens
//! the route, then starts the next sweep. The search stops when a sweep finds
//! nothing, when the sweep cap is reached, or when the budget runs out.

use std::time::Instant;

use ridepool_core::DistanceProvider;

use super::CancelFlag;
use super::points::{RoutePoint, sequence_distance_km, validate_point_sequence};

/// Limits on one improvement run.
pub(crate) struct SearchBudget<'c> {
    pub(crate) max_sweeps: usize,
    pub(crate) deadline: Option<Instant>,
    pub(crate) cancel: Option<&'c CancelFlag>,
}

impl SearchBudget<'_> {
    fn exhausted(&self) -> bool {
        self.cancel.is_some_and(CancelFlag::is_cancelled)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Result of an improvement run.
pub(crate) struct Improvement<'a> {
    pub(crate) sequence: Vec<RoutePoint<'a>>,
    pub(crate) distance_km: f64,
    pub(crate) sweeps: usize,
    pub(crate) moves: usize,
    pub(crate) interrupted: bool,
}

/// Reverse `sequence[i..=j]` in a copy of `sequence`.
fn reversed<'a>(sequence: &[RoutePoint<'a>], i: usize, j: usize) -> Vec<RoutePoint<'a>> {
    let mut candidate = sequence.to_vec();
    if let Some(segment) = candidate.get_mut(i..=j) {
        segment.reverse();
    }
    candidate
}

/// Improve a feasible `sequence` with first-improvement 2-opt.
///
/// The returned sequence is always feasible and never longer than the input.
pub(crate) fn improve<'a, D>(
    sequence: Vec<RoutePoint<'a>>,
    distance: &D,
    budget: &SearchBudget<'_>,
) -> Improvement<'a>
where
    D: DistanceProvider + ?Sized,
{
    let mut best_distance = sequence_distance_km(&sequence, distance);
    let mut best = sequence;
    let mut sweeps = 0;
    let mut moves = 0;
    let mut interrupted = false;
    let len = best.len();

    'search: while sweeps < budget.max_sweeps {
        if budget.exhausted() {
            interrupted = true;
            break;
        }
        sweeps += 1;
        let mut improved = false;
        'scan: for i in 1..len.saturating_sub(2) {
            if budget.exhausted() {
                interrupted = true;
                break 'search;
            }
            for j in (i + 1)..(len - 1) {
                let candidate = reversed(&best, i, j);
                if validate_point_sequence(&candidate).is_err() {
                    continue;
                }
                let candidate_distance = sequence_distance_km(&candidate, distance);
                if candidate_distance < best_distance {
                    log::trace!(
                        "2-opt reversed [{i}, {j}]: {best_distance:.3} km -> {candidate_distance:.3} km"
                    );
                    best = candidate;
                    best_distance = candidate_distance;
                    moves += 1;
                    improved = true;
                    break 'scan;
                }
            }
        }
        if !improved {
            break;
        }
    }

    if interrupted {
        log::warn!("2-opt search cut short after {sweeps} sweeps and {moves} moves");
    }

    Improvement {
        sequence: best,
        distance_km: best_distance,
        sweeps,
        moves,
        interrupted,
    }
}
