//! Straight-line distance scaled to kilometres.

use geo::{Distance, Euclidean, Point};
use thiserror::Error;

use super::DistanceProvider;
use crate::Location;

/// Kilometres represented by one planar coordinate unit.
pub const DEFAULT_KM_PER_UNIT: f64 = 0.1;

/// Assumed constant driving speed.
pub const DEFAULT_SPEED_KMH: f64 = 60.0;

/// Errors returned by [`PlanarDistance::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceConfigError {
    /// The unit scale was zero, negative or not finite.
    #[error("kilometres per unit must be positive and finite, got {value}")]
    InvalidScale {
        /// Rejected value.
        value: f64,
    },
    /// The speed was zero, negative or not finite.
    #[error("speed must be positive and finite, got {value} km/h")]
    InvalidSpeed {
        /// Rejected value.
        value: f64,
    },
}

/// Euclidean distance between planar coordinates, scaled to kilometres and
/// driven at a constant speed.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ridepool_core::{DistanceProvider, Location, PlanarDistance};
///
/// let a = Location::new("A", Coord { x: 0.0, y: 0.0 });
/// let b = Location::new("B", Coord { x: 30.0, y: 40.0 });
/// let provider = PlanarDistance::default();
///
/// assert!((provider.distance_km(&a, &b) - 5.0).abs() < 1e-9);
/// assert!((provider.travel_minutes(&a, &b) - 5.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanarDistance {
    km_per_unit: f64,
    speed_kmh: f64,
}

impl Default for PlanarDistance {
    fn default() -> Self {
        Self {
            km_per_unit: DEFAULT_KM_PER_UNIT,
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl PlanarDistance {
    /// Validate and construct a provider with a custom scale and speed.
    pub fn new(km_per_unit: f64, speed_kmh: f64) -> Result<Self, DistanceConfigError> {
        if !km_per_unit.is_finite() || km_per_unit <= 0.0 {
            return Err(DistanceConfigError::InvalidScale { value: km_per_unit });
        }
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(DistanceConfigError::InvalidSpeed { value: speed_kmh });
        }
        Ok(Self {
            km_per_unit,
            speed_kmh,
        })
    }

    /// Kilometres per coordinate unit.
    #[must_use]
    pub const fn km_per_unit(&self) -> f64 {
        self.km_per_unit
    }

    /// Assumed driving speed in km/h.
    #[must_use]
    pub const fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Unscaled Euclidean distance between two locations.
    #[must_use]
    pub fn units(&self, from: &Location, to: &Location) -> f64 {
        Euclidean.distance(Point::from(from.position), Point::from(to.position))
    }
}

impl DistanceProvider for PlanarDistance {
    fn distance_km(&self, from: &Location, to: &Location) -> f64 {
        self.units(from, to) * self.km_per_unit
    }

    fn minutes_for_km(&self, distance_km: f64) -> f64 {
        distance_km / self.speed_kmh * 60.0
    }
}
