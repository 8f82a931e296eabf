//! Errors surfaced by route mutations and construction.

use ridepool_core::LocationError;
use thiserror::Error;

use crate::reorder::OrderViolation;

/// Errors returned by planner operations.
///
/// Requests that merely fail to match are never errors; the matcher drops
/// them from its results instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// A reorder index fell outside the route.
    #[error("index {index} is out of range for a route of {len} stops")]
    InvalidIndex {
        /// Offending index.
        index: usize,
        /// Number of stops in the route.
        len: usize,
    },
    /// Two pending entries shared an identifier.
    #[error("pending entry {id:?} appears more than once")]
    DuplicateEntry {
        /// Repeated identifier.
        id: String,
    },
    /// The origin address was empty or whitespace.
    #[error("origin address is blank")]
    BlankOrigin,
    /// The destination address was empty or whitespace.
    #[error("destination address is blank")]
    BlankDestination,
    /// A construction input carried an unusable coordinate.
    #[error(transparent)]
    InvalidLocation(#[from] LocationError),
    /// No stop in the route has the requested identifier.
    #[error("route has no stop {id:?}")]
    UnknownStop {
        /// Requested identifier.
        id: String,
    },
    /// The stop has already reached the end of its lifecycle.
    #[error("stop {id:?} is already delivered")]
    AlreadyDelivered {
        /// Stop identifier.
        id: String,
    },
    /// The route order was rejected by the active [`OrderPolicy`](crate::OrderPolicy).
    #[error(transparent)]
    OrderViolation(#[from] OrderViolation),
}
