//! Facade crate for the ridepool route engine.
//!
//! This crate re-exports the domain records from `ridepool-core` and the
//! planning operations from `ridepool-planner`, so applications can depend on
//! a single crate.

#![forbid(unsafe_code)]

pub use ridepool_core::{
    Cargo, CargoKind, DistanceProvider, DriverProfile, GeoCoordinate, Location, ParcelInfo,
    ParcelSize, PassengerInfo, PendingEntry, PlanarDistance, Request, Route, Stop, StopStatus,
};

pub use ridepool_planner::{
    CompatibleMatch, Construction, ConstructionRequest, ConstructorConfig, CostModel,
    DeliveredFirst, MatchMode, MatchThresholds, OrderPolicy, Permissive, PlanError, ReorderDelta,
    RouteConstructor, RouteStats, ServiceTimes, TimelinePoint, advance_stop, apply_reorder,
    deviation_of_reorder, find_compatible_passengers, find_matching_requests, insert_request,
    is_request_valid, points_to_stops, preview_reorder, recalculate_eta, route_stats,
    stops_to_points, withdraw_stop,
};
