//! Vehicle constraints the matcher enforces.

use thiserror::Error;

use crate::ParcelSize;

/// A driver's vehicle limits and availability.
///
/// # Examples
/// ```
/// use ridepool_core::{DriverProfile, ParcelSize};
///
/// # fn main() -> Result<(), ridepool_core::DriverProfileError> {
/// let profile = DriverProfile::new(3, 50.0, vec![ParcelSize::S, ParcelSize::M])?;
/// assert!(profile.supports(ParcelSize::M));
/// assert!(!profile.supports(ParcelSize::Xl));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverProfile {
    /// Passenger seats available.
    pub seat_capacity: u32,
    /// Maximum parcel load in kilograms.
    pub max_weight_kg: f64,
    /// Parcel sizes the vehicle can take.
    pub supported_sizes: Vec<ParcelSize>,
    /// Whether the driver is accepting requests.
    #[cfg_attr(feature = "serde", serde(default))]
    pub online: bool,
}

/// Errors returned by [`DriverProfile::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DriverProfileError {
    /// The load limit was negative or not a number.
    #[error("maximum weight must be a finite, non-negative number of kilograms, got {value}")]
    InvalidMaxWeight {
        /// Rejected value.
        value: f64,
    },
}

impl DriverProfile {
    /// Validate and construct an online [`DriverProfile`].
    pub fn new(
        seat_capacity: u32,
        max_weight_kg: f64,
        supported_sizes: Vec<ParcelSize>,
    ) -> Result<Self, DriverProfileError> {
        if !max_weight_kg.is_finite() || max_weight_kg < 0.0 {
            return Err(DriverProfileError::InvalidMaxWeight {
                value: max_weight_kg,
            });
        }
        Ok(Self {
            seat_capacity,
            max_weight_kg,
            supported_sizes,
            online: true,
        })
    }

    /// Whether the vehicle accepts parcels of `size`.
    #[must_use]
    pub fn supports(&self, size: ParcelSize) -> bool {
        self.supported_sizes.contains(&size)
    }
}
