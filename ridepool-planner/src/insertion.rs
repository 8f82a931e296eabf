//! Cheapest insertion of an accepted request into a committed route.

use ridepool_core::{DistanceProvider, Location, Request, Route, Stop};

use crate::PlanError;
use crate::eta::recalculate_eta;
use crate::reorder::OrderPolicy;

/// Extra distance caused by visiting `point` at `index` of `stops`.
///
/// Inserting before the first stop or after the last one only adds the hop
/// to or from the neighbour. Interior positions replace the hop from the
/// previous drop-off to the next pickup with a detour through `point`.
fn insertion_cost<D>(stops: &[Stop], index: usize, point: &Location, distance: &D) -> f64
where
    D: DistanceProvider + ?Sized,
{
    let before = index.checked_sub(1).and_then(|i| stops.get(i));
    let after = stops.get(index);
    match (before, after) {
        (Some(prev), Some(next)) => {
            distance.distance_km(&prev.dropoff, point) + distance.distance_km(point, &next.pickup)
                - distance.distance_km(&prev.dropoff, &next.pickup)
        }
        (Some(prev), None) => distance.distance_km(&prev.dropoff, point),
        (None, Some(next)) => distance.distance_km(point, &next.pickup),
        (None, None) => 0.0,
    }
}

/// Index in `0..=stops.len()` where visiting `point` costs least. Ties go to
/// the earliest index.
fn cheapest_index<D>(stops: &[Stop], point: &Location, distance: &D) -> usize
where
    D: DistanceProvider + ?Sized,
{
    let mut best = (0, f64::INFINITY);
    for index in 0..=stops.len() {
        let cost = insertion_cost(stops, index, point, distance);
        if cost < best.1 {
            best = (index, cost);
        }
    }
    best.0
}

fn leg(request: &Request, half: &str, at: &Location) -> Stop {
    Stop::new(
        format!("{}:{half}", request.id),
        request.cargo.clone(),
        at.clone(),
        at.clone(),
    )
    .with_price(request.price.clone())
}

/// Splice an accepted request into `route` at the cheapest positions.
///
/// An empty route becomes a single stop from the request's pickup to its
/// drop-off. Otherwise the pickup and drop-off are placed independently at
/// their cheapest positions, each as a stop that visits one point, and the
/// drop-off is pushed after the pickup when it would land on or before it.
/// `policy` checks the route before and after the splice. Orders are
/// renumbered and ETAs recomputed.
///
/// # Errors
/// Returns [`PlanError::OrderViolation`] when `policy` rejects either order.
///
/// # Examples
/// ```
/// use ridepool_core::{PlanarDistance, Route};
/// use ridepool_core::test_support::{passenger_request, passenger_stop};
/// use ridepool_planner::{Permissive, insert_request};
///
/// let route = Route::new(vec![
///     passenger_stop("s0", (0.0, 0.0), (10.0, 0.0)),
///     passenger_stop("s1", (20.0, 0.0), (30.0, 0.0)),
/// ]);
/// let request = passenger_request("r", (12.0, 0.0), (18.0, 0.0));
/// let updated = insert_request(&route, &request, &Permissive, &PlanarDistance::default())?;
///
/// let ids: Vec<_> = updated.iter().map(|s| s.id.as_str()).collect();
/// assert_eq!(ids, vec!["s0", "r:pickup", "r:dropoff", "s1"]);
/// # Ok::<(), ridepool_planner::PlanError>(())
/// ```
pub fn insert_request<P, D>(
    route: &Route,
    request: &Request,
    policy: &P,
    distance: &D,
) -> Result<Route, PlanError>
where
    P: OrderPolicy + ?Sized,
    D: DistanceProvider + ?Sized,
{
    policy.validate(route)?;
    if route.is_empty() {
        let stop = Stop::new(
            request.id.clone(),
            request.cargo.clone(),
            request.pickup.clone(),
            request.dropoff.clone(),
        )
        .with_price(request.price.clone());
        return Ok(recalculate_eta(&Route::new(vec![stop]), distance));
    }

    let stops = route.stops();
    let pickup_at = cheapest_index(stops, &request.pickup, distance);
    let dropoff_at = cheapest_index(stops, &request.dropoff, distance);
    // The pickup shifts later stops by one; a drop-off that would land on or
    // before the pickup goes directly after it.
    let dropoff_slot = dropoff_at.max(pickup_at) + 1;
    log::trace!(
        "inserting request {} with pickup at {pickup_at} and drop-off at {dropoff_slot}",
        request.id
    );

    let mut updated = stops.to_vec();
    updated.insert(pickup_at, leg(request, "pickup", &request.pickup));
    updated.insert(dropoff_slot, leg(request, "dropoff", &request.dropoff));
    let spliced = Route::new(updated);
    policy.validate(&spliced)?;
    Ok(recalculate_eta(&spliced, distance))
}
