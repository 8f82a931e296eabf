//! Tests for route construction.

use super::*;
use ridepool_core::test_support::{entry, location, point};
use ridepool_core::{Cargo, PlanarDistance};
use rstest::{fixture, rstest};

#[fixture]
fn constructor() -> RouteConstructor<PlanarDistance> {
    RouteConstructor::new(PlanarDistance::default())
}

/// Two riders whose nearest-neighbour order can be shortened by swapping
/// their pickups.
fn detour_request() -> ConstructionRequest {
    ConstructionRequest::new(
        point(0.0, 0.0),
        point(20.0, 0.0),
        vec![
            entry("a", point(1.0, 0.0), point(10.0, 0.0)),
            entry("b", point(-1.5, 0.0), point(9.0, 0.0)),
        ],
    )
}

fn ids(route: &Route) -> Vec<&str> {
    route.iter().map(|s| s.id.as_str()).collect()
}

#[rstest]
fn no_entries_yields_single_direct_stop(constructor: RouteConstructor<PlanarDistance>) {
    let request = ConstructionRequest::new(point(0.0, 0.0), point(0.0, 50.0), Vec::new());
    let built = constructor.construct(&request).expect("construct");
    assert_eq!(ids(&built.route), vec!["direct"]);
    assert_eq!(
        built.route.first().and_then(|s| s.eta_minutes),
        Some(5),
        "50 units is five kilometres at 60 km/h"
    );
}

#[rstest]
fn pickup_is_never_placed_after_dropoff(constructor: RouteConstructor<PlanarDistance>) {
    let request = ConstructionRequest::new(
        location("A", 0.0, 0.0),
        location("D", 30.0, 0.0),
        vec![entry("r1", location("B", 10.0, 0.0), location("C", 20.0, 0.0))],
    );
    let built = constructor.construct(&request).expect("construct");
    let hops: Vec<(&str, &str)> = built
        .route
        .iter()
        .map(|s| (s.pickup.address.as_str(), s.dropoff.address.as_str()))
        .collect();
    assert_eq!(hops, vec![("A", "B"), ("B", "C"), ("C", "D")]);
}

#[rstest]
fn two_opt_shortens_greedy_order(constructor: RouteConstructor<PlanarDistance>) {
    let built = constructor.construct(&detour_request()).expect("construct");
    let diagnostics = &built.diagnostics;
    assert!((diagnostics.greedy_distance_km - 2.5).abs() < 1e-9);
    assert!((diagnostics.optimized_distance_km - 2.3).abs() < 1e-9);
    assert_eq!(diagnostics.moves_applied, 1);
    assert_eq!(diagnostics.sweeps, 2);
    assert!(!diagnostics.interrupted);
    assert_eq!(
        ids(&built.route),
        vec!["leg-0", "stop-b", "stop-a", "leg-4"]
    );
}

#[rstest]
fn overlapping_riders_keep_their_own_dropoffs(constructor: RouteConstructor<PlanarDistance>) {
    let request = ConstructionRequest::new(
        point(0.0, 0.0),
        point(100.0, 0.0),
        vec![
            entry("a", point(10.0, 0.0), point(60.0, 0.0)),
            entry("b", point(12.0, 0.0), point(62.0, 0.0)),
        ],
    );
    let built = constructor.construct(&request).expect("construct");
    assert_eq!(ids(&built.route), vec!["leg-0", "stop-a", "stop-b", "leg-4"]);
    let ends: Vec<(f64, f64)> = built
        .route
        .iter()
        .map(|s| (s.pickup.position.x, s.dropoff.position.x))
        .collect();
    assert_eq!(
        ends,
        vec![(0.0, 10.0), (10.0, 60.0), (12.0, 62.0), (62.0, 100.0)]
    );
}

#[rstest]
fn raised_cancel_flag_keeps_greedy_order() {
    let flag = CancelFlag::new();
    flag.cancel();
    let constructor = RouteConstructor::new(PlanarDistance::default()).with_cancel_flag(flag);
    let built = constructor.construct(&detour_request()).expect("construct");
    assert!(built.diagnostics.interrupted);
    assert_eq!(built.diagnostics.sweeps, 0);
    assert!(
        (built.diagnostics.optimized_distance_km - built.diagnostics.greedy_distance_km).abs()
            < f64::EPSILON
    );
}

#[rstest]
fn zero_time_limit_interrupts_search() {
    let config = ConstructorConfig {
        time_limit: Some(Duration::ZERO),
        ..ConstructorConfig::default()
    };
    let constructor = RouteConstructor::with_config(PlanarDistance::default(), config);
    let built = constructor.construct(&detour_request()).expect("construct");
    assert!(built.diagnostics.interrupted);
    assert_eq!(built.diagnostics.moves_applied, 0);
}

#[rstest]
fn zero_sweep_cap_skips_improvement() {
    let config = ConstructorConfig {
        max_sweeps: 0,
        time_limit: None,
    };
    let constructor = RouteConstructor::with_config(PlanarDistance::default(), config);
    let built = constructor.construct(&detour_request()).expect("construct");
    assert_eq!(built.diagnostics.sweeps, 0);
    assert!(!built.diagnostics.interrupted);
}

#[rstest]
fn duplicate_entry_ids_are_rejected(constructor: RouteConstructor<PlanarDistance>) {
    let request = ConstructionRequest::new(
        point(0.0, 0.0),
        point(9.0, 9.0),
        vec![
            entry("dup", point(1.0, 1.0), point(2.0, 2.0)),
            entry("dup", point(3.0, 3.0), point(4.0, 4.0)),
        ],
    );
    let err = constructor.construct(&request).expect_err("duplicate ids");
    assert_eq!(
        err,
        PlanError::DuplicateEntry {
            id: "dup".to_owned()
        }
    );
}

#[rstest]
#[case(location("  ", 0.0, 0.0), location("D", 1.0, 0.0), PlanError::BlankOrigin)]
#[case(location("O", 0.0, 0.0), location("", 1.0, 0.0), PlanError::BlankDestination)]
fn blank_addresses_are_rejected(
    constructor: RouteConstructor<PlanarDistance>,
    #[case] origin: Location,
    #[case] destination: Location,
    #[case] expected: PlanError,
) {
    let request = ConstructionRequest::new(origin, destination, Vec::new());
    assert_eq!(constructor.construct(&request), Err(expected));
}

#[rstest]
fn non_finite_coordinates_are_rejected(constructor: RouteConstructor<PlanarDistance>) {
    let request = ConstructionRequest::new(
        point(0.0, 0.0),
        point(1.0, 0.0),
        vec![entry("r", location("Nowhere", f64::NAN, 0.0), point(1.0, 1.0))],
    );
    assert!(matches!(
        constructor.construct(&request),
        Err(PlanError::InvalidLocation(_))
    ));
}

#[rstest]
fn sequential_visits_entries_as_listed(constructor: RouteConstructor<PlanarDistance>) {
    let request = ConstructionRequest::new(
        location("Lviv", 0.0, 0.0),
        location("Kyiv", 100.0, 0.0),
        vec![
            entry("r1", location("lviv", 0.0, 0.0), location("Rivne", 40.0, 0.0)),
            entry("r2", location("Rivne", 40.0, 0.0), location("Kyiv", 100.0, 0.0)),
        ],
    );
    let route = constructor
        .construct_sequential(&request)
        .expect("construct sequential");
    let hops: Vec<(&str, &str)> = route
        .iter()
        .map(|s| (s.pickup.address.as_str(), s.dropoff.address.as_str()))
        .collect();
    assert_eq!(hops, vec![("lviv", "Rivne"), ("Rivne", "Kyiv")]);
    assert_eq!(ids(&route), vec!["stop-0", "stop-1"]);
    assert!(
        route
            .iter()
            .all(|s| matches!(s.cargo, Cargo::Passenger(Some(_))))
    );
    let etas: Vec<_> = route.iter().map(|s| s.eta_minutes).collect();
    assert_eq!(etas, vec![Some(4), Some(10)]);
}

#[rstest]
fn sequential_without_entries_is_direct(constructor: RouteConstructor<PlanarDistance>) {
    let request = ConstructionRequest::new(point(0.0, 0.0), point(0.0, 0.0), Vec::new());
    let route = constructor
        .construct_sequential(&request)
        .expect("construct sequential");
    assert_eq!(ids(&route), vec!["direct"]);
}

#[rstest]
fn point_order_is_feasible_and_matches_route(constructor: RouteConstructor<PlanarDistance>) {
    let request = detour_request();
    let order = constructor.order_points(&request).expect("order");
    assert!(validate_point_sequence(&order.sequence).is_ok());
    let labels: Vec<String> = order
        .sequence
        .iter()
        .map(|point| match point {
            RoutePoint::Origin(_) => "origin".to_owned(),
            RoutePoint::Destination(_) => "destination".to_owned(),
            RoutePoint::Pickup(entry) => format!("+{}", entry.id),
            RoutePoint::Dropoff(entry) => format!("-{}", entry.id),
        })
        .collect();
    assert_eq!(labels, vec!["origin", "+b", "+a", "-b", "-a", "destination"]);
}
