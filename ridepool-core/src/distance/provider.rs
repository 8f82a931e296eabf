//! Distance capability trait.

use crate::Location;

/// Compute leg lengths and drive times between locations.
///
/// Implementations must be deterministic, return finite non-negative values
/// for finite input, and satisfy `distance_km(a, a) == 0.0`.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use ridepool_core::{DistanceProvider, Location};
///
/// struct Manhattan;
///
/// impl DistanceProvider for Manhattan {
///     fn distance_km(&self, from: &Location, to: &Location) -> f64 {
///         (from.position.x - to.position.x).abs() + (from.position.y - to.position.y).abs()
///     }
///
///     fn minutes_for_km(&self, distance_km: f64) -> f64 {
///         distance_km
///     }
/// }
///
/// let a = Location::new("A", Coord { x: 0.0, y: 0.0 });
/// let b = Location::new("B", Coord { x: 3.0, y: 4.0 });
/// assert_eq!(Manhattan.travel_minutes(&a, &b), 7.0);
/// ```
pub trait DistanceProvider {
    /// Length of the leg from `from` to `to`, in kilometres.
    fn distance_km(&self, from: &Location, to: &Location) -> f64;

    /// Minutes needed to drive `distance_km` kilometres.
    fn minutes_for_km(&self, distance_km: f64) -> f64;

    /// Minutes needed to drive from `from` to `to`.
    fn travel_minutes(&self, from: &Location, to: &Location) -> f64 {
        self.minutes_for_km(self.distance_km(from, to))
    }
}

impl<T: DistanceProvider + ?Sized> DistanceProvider for &T {
    fn distance_km(&self, from: &Location, to: &Location) -> f64 {
        (**self).distance_km(from, to)
    }

    fn minutes_for_km(&self, distance_km: f64) -> f64 {
        (**self).minutes_for_km(distance_km)
    }
}
