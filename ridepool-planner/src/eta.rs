//! Arrival times and route length.

use ridepool_core::{DistanceProvider, Route, Stop};

use crate::units::whole_minutes;

/// Recompute every stop's ETA by walking the route with a running clock.
///
/// The clock starts at zero. For each stop it advances by the drive from the
/// previous stop's drop-off to this stop's pickup (nothing for the first
/// stop), and the stop's ETA is the clock plus the pickup-to-drop-off drive,
/// rounded to whole minutes. The clock itself is never rounded, so rounding
/// error does not accumulate.
///
/// # Examples
/// ```
/// use ridepool_core::{PlanarDistance, Route, test_support::passenger_stop};
/// use ridepool_planner::recalculate_eta;
///
/// let route = Route::new(vec![
///     passenger_stop("a", (0.0, 0.0), (0.0, 30.0)),
///     passenger_stop("b", (0.0, 50.0), (0.0, 100.0)),
/// ]);
/// let timed = recalculate_eta(&route, &PlanarDistance::default());
/// let etas: Vec<_> = timed.iter().map(|s| s.eta_minutes).collect();
/// assert_eq!(etas, vec![Some(3), Some(10)]);
/// ```
#[must_use]
pub fn recalculate_eta<D>(route: &Route, distance: &D) -> Route
where
    D: DistanceProvider + ?Sized,
{
    let mut clock = 0.0_f64;
    let mut previous: Option<&Stop> = None;
    let stops = route
        .iter()
        .map(|stop| {
            if let Some(prev) = previous {
                clock += distance.travel_minutes(&prev.dropoff, &stop.pickup);
            }
            let leg = distance.travel_minutes(&stop.pickup, &stop.dropoff);
            previous = Some(stop);
            let mut timed = stop.clone();
            timed.eta_minutes = Some(whole_minutes(clock + leg));
            clock += leg;
            timed
        })
        .collect();
    Route::new(stops)
}

/// Total driven length in kilometres: every leg plus every gap between a
/// drop-off and the next pickup.
#[must_use]
pub fn total_distance_km<D>(route: &Route, distance: &D) -> f64
where
    D: DistanceProvider + ?Sized,
{
    let legs: f64 = route
        .iter()
        .map(|stop| distance.distance_km(&stop.pickup, &stop.dropoff))
        .sum();
    let gaps: f64 = route
        .stops()
        .windows(2)
        .map(|pair| match pair {
            [prev, next] => distance.distance_km(&prev.dropoff, &next.pickup),
            _ => 0.0,
        })
        .sum();
    legs + gaps
}
