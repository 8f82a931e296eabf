//! Measure legs between locations.
//!
//! The [`DistanceProvider`] trait is the only way the planner learns how far
//! apart two [`Location`](crate::Location) values are and how long the drive
//! takes. [`PlanarDistance`] is the straight-line default; a road-network
//! provider can replace it without touching any planner code.

mod planar;
mod provider;

pub use planar::{DEFAULT_KM_PER_UNIT, DEFAULT_SPEED_KMH, DistanceConfigError, PlanarDistance};
pub use provider::DistanceProvider;
