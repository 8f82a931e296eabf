//! Core domain types for the ridepool route engine.
//!
//! These records describe a driver's committed route and the inbound asks
//! competing for a place on it. They are plain values: the planner consumes
//! them by reference and returns fresh ones, so nothing in this crate holds
//! hidden state. Constructors that can receive malformed input return
//! `Result` to surface it early.
//!
//! Distances never come from the records themselves. Every consumer goes
//! through a [`DistanceProvider`], with [`PlanarDistance`] as the straight-line
//! default.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cargo;
pub mod distance;
mod driver;
mod location;
mod request;
mod route;
mod stop;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cargo::{Cargo, CargoKind, ParcelInfo, ParcelSize, PassengerInfo};
pub use distance::{DistanceConfigError, DistanceProvider, PlanarDistance};
pub use driver::{DriverProfile, DriverProfileError};
pub use location::{GeoCoordinate, Location, LocationError};
pub use request::{PendingEntry, Request};
pub use route::Route;
pub use stop::{Stop, StopStatus};
