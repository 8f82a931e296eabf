//! Manual reordering: preview, commit, and the cost of a move.

use ridepool_core::{DistanceProvider, Route, StopStatus};
use thiserror::Error;

use crate::PlanError;
use crate::eta::{recalculate_eta, total_distance_km};
use crate::units::{round_tenth, signed_minutes};

/// Why a route order was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderViolation {
    /// A delivered stop sits after one that is still outstanding.
    #[error("delivered stop {id:?} comes after outstanding stop {pending_id:?}")]
    DeliveredAfterPending {
        /// Delivered stop.
        id: String,
        /// Earlier stop that is not yet delivered.
        pending_id: String,
    },
}

/// Structural check run before and after every committed reorder.
pub trait OrderPolicy {
    /// Accept `route` or explain why its order is not allowed.
    ///
    /// # Errors
    /// Returns the first [`OrderViolation`] found.
    fn validate(&self, route: &Route) -> Result<(), OrderViolation>;
}

/// Accepts every order.
#[derive(Debug, Default, Clone, Copy)]
pub struct Permissive;

impl OrderPolicy for Permissive {
    fn validate(&self, _route: &Route) -> Result<(), OrderViolation> {
        Ok(())
    }
}

/// Keeps completed stops ahead of outstanding ones, so finished work cannot
/// be dragged back into the future.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeliveredFirst;

impl OrderPolicy for DeliveredFirst {
    fn validate(&self, route: &Route) -> Result<(), OrderViolation> {
        let mut outstanding: Option<&str> = None;
        for stop in route {
            match (stop.status, outstanding) {
                (StopStatus::Delivered, Some(pending_id)) => {
                    return Err(OrderViolation::DeliveredAfterPending {
                        id: stop.id.clone(),
                        pending_id: pending_id.to_owned(),
                    });
                }
                (StopStatus::Delivered, None) => {}
                (StopStatus::Pending | StopStatus::PickedUp, _) => {
                    outstanding = outstanding.or(Some(stop.id.as_str()));
                }
            }
        }
        Ok(())
    }
}

/// Change in route length and drive time caused by a move.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReorderDelta {
    /// Kilometres added (negative when the move saves distance), to 0.1 km.
    pub distance_km: f64,
    /// Minutes added (negative when the move saves time).
    pub time_minutes: i32,
}

impl ReorderDelta {
    /// A move that changes nothing.
    pub const ZERO: Self = Self {
        distance_km: 0.0,
        time_minutes: 0,
    };
}

fn check_index(index: usize, len: usize) -> Result<(), PlanError> {
    if index < len {
        Ok(())
    } else {
        Err(PlanError::InvalidIndex { index, len })
    }
}

/// Return a copy of `route` with the stop at `from` moved to `to`.
///
/// Only the order changes; ETAs are left as they were so the preview can be
/// shown without committing anything.
///
/// # Errors
/// Returns [`PlanError::InvalidIndex`] when either index is out of range.
///
/// # Examples
/// ```
/// use ridepool_core::Route;
/// use ridepool_core::test_support::passenger_stop;
/// use ridepool_planner::preview_reorder;
///
/// let route = Route::new(vec![
///     passenger_stop("a", (0.0, 0.0), (1.0, 0.0)),
///     passenger_stop("b", (1.0, 0.0), (2.0, 0.0)),
///     passenger_stop("c", (2.0, 0.0), (3.0, 0.0)),
/// ]);
/// let preview = preview_reorder(&route, 0, 2)?;
/// let ids: Vec<_> = preview.iter().map(|s| s.id.as_str()).collect();
/// assert_eq!(ids, vec!["b", "c", "a"]);
/// assert_eq!(preview_reorder(&route, 1, 1)?, route);
/// # Ok::<(), ridepool_planner::PlanError>(())
/// ```
pub fn preview_reorder(route: &Route, from: usize, to: usize) -> Result<Route, PlanError> {
    check_index(from, route.len())?;
    check_index(to, route.len())?;
    if from == to {
        return Ok(route.clone());
    }
    let mut stops = route.stops().to_vec();
    let moved = stops.remove(from);
    stops.insert(to, moved);
    Ok(Route::new(stops))
}

/// Commit a move: validate the current order, move the stop, validate the
/// result, and recompute ETAs.
///
/// # Errors
/// Returns [`PlanError::InvalidIndex`] for out-of-range indices and
/// [`PlanError::OrderViolation`] when `policy` rejects either order.
pub fn apply_reorder<P, D>(
    route: &Route,
    from: usize,
    to: usize,
    policy: &P,
    distance: &D,
) -> Result<Route, PlanError>
where
    P: OrderPolicy + ?Sized,
    D: DistanceProvider + ?Sized,
{
    policy.validate(route)?;
    let moved = preview_reorder(route, from, to)?;
    if from == to {
        return Ok(moved);
    }
    policy.validate(&moved)?;
    log::debug!("moved stop {from} to {to} in a route of {} stops", route.len());
    Ok(recalculate_eta(&moved, distance))
}

/// Signed change in length and time that moving `from` to `to` would cause.
///
/// # Errors
/// Returns [`PlanError::InvalidIndex`] when either index is out of range.
pub fn deviation_of_reorder<D>(
    route: &Route,
    from: usize,
    to: usize,
    distance: &D,
) -> Result<ReorderDelta, PlanError>
where
    D: DistanceProvider + ?Sized,
{
    let preview = preview_reorder(route, from, to)?;
    if from == to {
        return Ok(ReorderDelta::ZERO);
    }
    let change = total_distance_km(&preview, distance) - total_distance_km(route, distance);
    Ok(ReorderDelta {
        distance_km: round_tenth(change),
        time_minutes: signed_minutes(distance.minutes_for_km(change)),
    })
}
