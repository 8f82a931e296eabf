//! Places a driver passes through.
//!
//! The engine only ever measures the planar `position`. The optional
//! geographic coordinate is carried through untouched for map rendering.

use geo::Coord;
use thiserror::Error;

/// Latitude/longitude pair resolved by an external geocoder.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoCoordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// A point on the route plane plus the address the driver sees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ridepool_core::Location;
///
/// let depot = Location::new("Depot", Coord { x: 1.0, y: 2.0 });
/// assert_eq!(depot.address, "Depot");
/// assert!(depot.geo.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Planar coordinate used for every distance computation.
    pub position: Coord<f64>,
    /// Geographic coordinate, if the geocoder supplied one.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub geo: Option<GeoCoordinate>,
    /// Human-readable address.
    pub address: String,
}

/// Errors returned by [`Location::try_new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    /// One of the planar coordinates was NaN or infinite.
    #[error("location {address:?} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Address of the rejected location.
        address: String,
    },
}

impl Location {
    /// Construct a location without a geographic coordinate.
    #[must_use]
    pub fn new(address: impl Into<String>, position: Coord<f64>) -> Self {
        Self {
            position,
            geo: None,
            address: address.into(),
        }
    }

    /// Validate the planar coordinate and construct a [`Location`].
    ///
    /// # Examples
    /// ```
    /// use ridepool_core::{Location, LocationError};
    ///
    /// assert!(Location::try_new("Market", 3.0, 4.0).is_ok());
    /// assert!(matches!(
    ///     Location::try_new("Nowhere", f64::NAN, 0.0),
    ///     Err(LocationError::NonFiniteCoordinate { .. })
    /// ));
    /// ```
    pub fn try_new(address: impl Into<String>, x: f64, y: f64) -> Result<Self, LocationError> {
        let label = address.into();
        if !x.is_finite() || !y.is_finite() {
            return Err(LocationError::NonFiniteCoordinate { address: label });
        }
        Ok(Self::new(label, Coord { x, y }))
    }

    /// Attach a geographic coordinate while returning `self` for chaining.
    #[must_use]
    pub const fn with_geo(mut self, lat: f64, lng: f64) -> Self {
        self.geo = Some(GeoCoordinate { lat, lng });
        self
    }

    /// Compare addresses ignoring case and surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use ridepool_core::Location;
    ///
    /// let a = Location::new("  Lviv ", Coord { x: 0.0, y: 0.0 });
    /// let b = Location::new("lviv", Coord { x: 5.0, y: 5.0 });
    /// assert!(a.same_address(&b));
    /// ```
    #[must_use]
    pub fn same_address(&self, other: &Self) -> bool {
        normalise(&self.address) == normalise(&other.address)
    }
}

fn normalise(address: &str) -> String {
    address.trim().to_lowercase()
}
