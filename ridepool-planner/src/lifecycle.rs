//! Per-stop edits made while a route is being driven.

use ridepool_core::{DistanceProvider, Route};

use crate::PlanError;
use crate::eta::recalculate_eta;
use crate::reorder::OrderPolicy;

/// Remove the stop with `id`, renumber the rest and recompute ETAs.
/// `policy` checks the route before and after the removal.
///
/// # Errors
/// Returns [`PlanError::UnknownStop`] when no stop has `id` and
/// [`PlanError::OrderViolation`] when `policy` rejects either order.
///
/// # Examples
/// ```
/// use ridepool_core::{PlanarDistance, Route};
/// use ridepool_core::test_support::passenger_stop;
/// use ridepool_planner::{DeliveredFirst, withdraw_stop};
///
/// let route = Route::new(vec![
///     passenger_stop("a", (0.0, 0.0), (0.0, 10.0)),
///     passenger_stop("b", (0.0, 10.0), (0.0, 20.0)),
/// ]);
/// let trimmed = withdraw_stop(&route, "a", &DeliveredFirst, &PlanarDistance::default())?;
/// assert_eq!(trimmed.len(), 1);
/// assert_eq!(trimmed.stops()[0].order, 0);
/// # Ok::<(), ridepool_planner::PlanError>(())
/// ```
pub fn withdraw_stop<P, D>(
    route: &Route,
    id: &str,
    policy: &P,
    distance: &D,
) -> Result<Route, PlanError>
where
    P: OrderPolicy + ?Sized,
    D: DistanceProvider + ?Sized,
{
    if route.position(id).is_none() {
        return Err(PlanError::UnknownStop { id: id.to_owned() });
    }
    policy.validate(route)?;
    let remaining: Route = route.iter().filter(|stop| stop.id != id).cloned().collect();
    policy.validate(&remaining)?;
    log::debug!("withdrew stop {id}; {} stops remain", remaining.len());
    Ok(recalculate_eta(&remaining, distance))
}

/// Move the stop with `id` one step along its lifecycle.
///
/// # Errors
/// Returns [`PlanError::UnknownStop`] when no stop has `id` and
/// [`PlanError::AlreadyDelivered`] when the stop is already delivered.
pub fn advance_stop(route: &Route, id: &str) -> Result<Route, PlanError> {
    let index = route
        .position(id)
        .ok_or_else(|| PlanError::UnknownStop { id: id.to_owned() })?;
    let mut stops = route.stops().to_vec();
    let stop = stops
        .get_mut(index)
        .ok_or_else(|| PlanError::UnknownStop { id: id.to_owned() })?;
    stop.status = stop
        .status
        .next()
        .ok_or_else(|| PlanError::AlreadyDelivered { id: id.to_owned() })?;
    Ok(Route::new(stops))
}
