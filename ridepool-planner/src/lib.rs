//! Route assembly and matching for ridepool drivers.
//!
//! The planner turns a driver's origin, destination and queued passengers or
//! parcels into an ordered [`Route`](ridepool_core::Route), keeps that route
//! current as requests are accepted, reordered or withdrawn, and ranks inbound
//! requests by how well they fit it.
//!
//! Every operation is a pure function (or a small configuration-holding
//! struct) over borrowed inputs. Nothing here performs I/O or keeps state
//! between calls, so callers own persistence and must serialise edits to a
//! single route themselves. Distances always come from a
//! [`DistanceProvider`](ridepool_core::DistanceProvider).

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod construct;
mod error;
mod eta;
mod insertion;
mod lifecycle;
pub mod matching;
mod reorder;
mod stats;
pub mod timeline;
mod units;

pub use construct::{
    CancelFlag, Construction, ConstructionDiagnostics, ConstructionRequest, ConstructorConfig,
    PointOrder, PointSequenceError, RouteConstructor, RoutePoint,
};
pub use error::PlanError;
pub use eta::{recalculate_eta, total_distance_km};
pub use insertion::insert_request;
pub use lifecycle::{advance_stop, withdraw_stop};
pub use matching::{
    CompatibleMatch, Deviation, MatchMode, MatchThresholds, Rejection, find_compatible_passengers,
    find_matching_requests, is_request_valid,
};
pub use reorder::{
    DeliveredFirst, OrderPolicy, OrderViolation, Permissive, ReorderDelta, apply_reorder,
    deviation_of_reorder, preview_reorder,
};
pub use stats::{CostModel, RouteStats, route_stats};
pub use timeline::{
    PointHalf, PointKind, ServiceTimes, TimelinePoint, points_to_stops, stops_to_points,
};
