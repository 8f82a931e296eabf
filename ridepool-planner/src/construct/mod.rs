//! Point-level route construction.
//!
//! A construction starts from the driver's origin and destination plus the
//! entries queued for the trip. [`RouteConstructor::construct`] seeds a
//! visiting order with nearest-neighbour search, improves it with bounded
//! 2-opt, and converts the result into stops. Every intermediate order is
//! feasible: origin first, destination last, each pickup before its drop-off.
//!
//! ```
//! use ridepool_core::PlanarDistance;
//! use ridepool_core::test_support::{entry, location};
//! use ridepool_planner::{ConstructionRequest, RouteConstructor};
//!
//! let request = ConstructionRequest::new(
//!     location("A", 0.0, 0.0),
//!     location("D", 30.0, 0.0),
//!     vec![entry("r1", location("B", 10.0, 0.0), location("C", 20.0, 0.0))],
//! );
//! let built = RouteConstructor::new(PlanarDistance::default()).construct(&request)?;
//! let addresses: Vec<_> = built
//!     .route
//!     .iter()
//!     .map(|s| (s.pickup.address.as_str(), s.dropoff.address.as_str()))
//!     .collect();
//! assert_eq!(addresses, vec![("A", "B"), ("B", "C"), ("C", "D")]);
//! # Ok::<(), ridepool_planner::PlanError>(())
//! ```

mod greedy;
mod points;
mod sequential;
mod stops;
mod two_opt;

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use ridepool_core::{DistanceProvider, Location, PendingEntry, Route};

use crate::PlanError;
use crate::eta::recalculate_eta;

pub use points::{
    PointSequenceError, RoutePoint, flatten, sequence_distance_km, validate_point_sequence,
};

/// Default cap on 2-opt sweeps.
pub const DEFAULT_MAX_SWEEPS: usize = 10;

/// Configuration for [`RouteConstructor`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructorConfig {
    /// Upper bound on 2-opt sweeps.
    pub max_sweeps: usize,
    /// Wall-clock budget for the 2-opt phase.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_limit: Option<Duration>,
}

impl Default for ConstructorConfig {
    fn default() -> Self {
        Self {
            max_sweeps: DEFAULT_MAX_SWEEPS,
            time_limit: None,
        }
    }
}

/// Shared flag that asks a running construction to stop improving.
///
/// Clones share the same flag, so one can be handed to another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a flag that is not yet raised.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether the flag has been raised.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything needed to build a route from scratch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructionRequest {
    /// Where the driver sets off.
    pub origin: Location,
    /// Where the driver finishes.
    pub destination: Location,
    /// Passengers and parcels to fit in between.
    #[cfg_attr(feature = "serde", serde(default))]
    pub entries: Vec<PendingEntry>,
}

impl ConstructionRequest {
    /// Bundle the inputs of a construction.
    #[must_use]
    pub const fn new(origin: Location, destination: Location, entries: Vec<PendingEntry>) -> Self {
        Self {
            origin,
            destination,
            entries,
        }
    }

    /// Check addresses, coordinates and entry identifiers.
    ///
    /// # Errors
    /// Returns [`PlanError::BlankOrigin`] or [`PlanError::BlankDestination`]
    /// for whitespace-only addresses, [`PlanError::InvalidLocation`] for
    /// non-finite coordinates, and [`PlanError::DuplicateEntry`] when two
    /// entries share an identifier.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.origin.address.trim().is_empty() {
            return Err(PlanError::BlankOrigin);
        }
        if self.destination.address.trim().is_empty() {
            return Err(PlanError::BlankDestination);
        }
        let locations = [&self.origin, &self.destination].into_iter().chain(
            self.entries
                .iter()
                .flat_map(|entry| [&entry.pickup, &entry.dropoff]),
        );
        for location in locations {
            Location::try_new(
                location.address.as_str(),
                location.position.x,
                location.position.y,
            )?;
        }
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(PlanError::DuplicateEntry {
                    id: entry.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Figures describing how a construction went.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstructionDiagnostics {
    /// Length of the nearest-neighbour order, in kilometres.
    pub greedy_distance_km: f64,
    /// Length after 2-opt, in kilometres.
    pub optimized_distance_km: f64,
    /// 2-opt sweeps started.
    pub sweeps: usize,
    /// Improving reversals applied.
    pub moves_applied: usize,
    /// Whether cancellation or the time limit stopped the search.
    pub interrupted: bool,
    /// Wall-clock time spent.
    pub solve_time: Duration,
}

/// A feasible visiting order and how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOrder<'a> {
    /// Points in visiting order.
    pub sequence: Vec<RoutePoint<'a>>,
    /// Search statistics.
    pub diagnostics: ConstructionDiagnostics,
}

/// A constructed route and how it was found.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Construction {
    /// Stops with ETAs filled in.
    pub route: Route,
    /// Search statistics.
    pub diagnostics: ConstructionDiagnostics,
}

/// Builds routes from a [`ConstructionRequest`] using a distance provider.
#[derive(Debug, Clone)]
pub struct RouteConstructor<D> {
    distance: D,
    config: ConstructorConfig,
    cancel: Option<CancelFlag>,
}

impl<D> RouteConstructor<D>
where
    D: DistanceProvider,
{
    /// Construct a constructor using default configuration.
    #[must_use]
    pub fn new(distance: D) -> Self {
        Self::with_config(distance, ConstructorConfig::default())
    }

    /// Construct a constructor with explicit configuration.
    #[must_use]
    pub const fn with_config(distance: D, config: ConstructorConfig) -> Self {
        Self {
            distance,
            config,
            cancel: None,
        }
    }

    /// Attach a flag that can stop the 2-opt phase early.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ConstructorConfig {
        &self.config
    }

    /// Choose a visiting order for the points of `request`.
    ///
    /// The order starts at the origin, ends at the destination and picks
    /// every entry up before dropping it off, even when the search is cut
    /// short. With no entries it is just the origin and destination.
    ///
    /// # Errors
    /// Returns the errors of [`ConstructionRequest::validate`].
    pub fn order_points<'a>(
        &self,
        request: &'a ConstructionRequest,
    ) -> Result<PointOrder<'a>, PlanError> {
        request.validate()?;
        let started_at = Instant::now();

        let points = flatten(&request.origin, &request.destination, &request.entries);
        if request.entries.is_empty() {
            let length = sequence_distance_km(&points, &self.distance);
            return Ok(PointOrder {
                sequence: points,
                diagnostics: ConstructionDiagnostics {
                    greedy_distance_km: length,
                    optimized_distance_km: length,
                    sweeps: 0,
                    moves_applied: 0,
                    interrupted: false,
                    solve_time: started_at.elapsed(),
                },
            });
        }
        let seeded = greedy::nearest_neighbour(&points, &self.distance);
        let greedy_distance_km = sequence_distance_km(&seeded, &self.distance);
        log::debug!(
            "nearest-neighbour order over {} points: {greedy_distance_km:.3} km",
            seeded.len()
        );

        let budget = two_opt::SearchBudget {
            max_sweeps: self.config.max_sweeps,
            deadline: self
                .config
                .time_limit
                .and_then(|limit| started_at.checked_add(limit)),
            cancel: self.cancel.as_ref(),
        };
        let improvement = two_opt::improve(seeded, &self.distance, &budget);
        debug_assert!(
            validate_point_sequence(&improvement.sequence).is_ok(),
            "2-opt produced an infeasible order"
        );
        log::debug!(
            "2-opt finished after {} sweeps and {} moves: {:.3} km",
            improvement.sweeps,
            improvement.moves,
            improvement.distance_km
        );

        Ok(PointOrder {
            sequence: improvement.sequence,
            diagnostics: ConstructionDiagnostics {
                greedy_distance_km,
                optimized_distance_km: improvement.distance_km,
                sweeps: improvement.sweeps,
                moves_applied: improvement.moves,
                interrupted: improvement.interrupted,
                solve_time: started_at.elapsed(),
            },
        })
    }

    /// Build an optimised route.
    ///
    /// With no entries the route is a single origin-to-destination stop.
    /// When the search is interrupted the best feasible order found so far is
    /// used.
    ///
    /// # Errors
    /// Returns the errors of [`ConstructionRequest::validate`].
    pub fn construct(&self, request: &ConstructionRequest) -> Result<Construction, PlanError> {
        let order = self.order_points(request)?;
        let stops = if request.entries.is_empty() {
            stops::direct(&request.origin, &request.destination)
        } else {
            stops::sequence_to_stops(&order.sequence)
        };
        Ok(Construction {
            route: recalculate_eta(&Route::new(stops), &self.distance),
            diagnostics: order.diagnostics,
        })
    }

    /// Build a route visiting entries in the order they were listed.
    ///
    /// Hops between equal addresses are skipped. With no entries the route is
    /// a single origin-to-destination stop.
    ///
    /// # Errors
    /// Returns the errors of [`ConstructionRequest::validate`].
    pub fn construct_sequential(&self, request: &ConstructionRequest) -> Result<Route, PlanError> {
        request.validate()?;
        let stops = if request.entries.is_empty() {
            stops::direct(&request.origin, &request.destination)
        } else {
            sequential::listed_order(&request.origin, &request.destination, &request.entries)
        };
        Ok(recalculate_eta(&Route::new(stops), &self.distance))
    }
}

#[cfg(test)]
mod tests;
