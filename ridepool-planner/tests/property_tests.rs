//! Property-based tests for the route planner.
//!
//! These tests use `proptest` to assert laws that must hold for every route
//! and construction input, complementing the unit tests and the behavioural
//! scenarios.
//!
//! # Invariants tested
//!
//! - **Dense orders:** Every mutation leaves `stops[i].order == i`.
//! - **Precedence:** Constructed point orders start at the origin, end at the
//!   destination and collect every entry before delivering it.
//! - **Non-worsening search:** 2-opt never lengthens the greedy order.
//! - **One stop per entry:** Each queued entry is carried by exactly one stop.
//! - **Monotone ETAs:** Recomputed ETAs never decrease along the route.
//! - **Preview identity:** Moving a stop onto itself changes nothing.
//! - **Projection round trip:** Folding a timeline back restores the route.


use proptest::prelude::*;
use ridepool_core::test_support::passenger_request;
use ridepool_core::{PlanarDistance, Route};
use ridepool_planner::construct::validate_point_sequence;
use ridepool_planner::{
    Permissive, RouteConstructor, ServiceTimes, apply_reorder, insert_request, points_to_stops,
    preview_reorder, recalculate_eta, stops_to_points, withdraw_stop,
};

use proptest_support::{construction_strategy, coordinate, route_strategy};

fn orders_are_dense(route: &Route) -> bool {
    route.iter().enumerate().all(|(index, stop)| stop.order == index)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: insertion, reordering and withdrawal keep orders dense.
    #[test]
    fn mutations_keep_orders_dense(
        route in route_strategy(1, 8),
        pickup in coordinate(),
        dropoff in coordinate(),
        from in 0_usize..8,
        to in 0_usize..8,
    ) {
        let distance = PlanarDistance::default();
        let request = passenger_request("new", pickup, dropoff);
        let inserted = insert_request(&route, &request, &Permissive, &distance)
            .expect("permissive insertion succeeds");
        prop_assert!(orders_are_dense(&inserted));
        prop_assert_eq!(inserted.len(), route.len() + 2);

        let source = from % route.len();
        let target = to % route.len();
        let preview = preview_reorder(&route, source, target).expect("indices in range");
        prop_assert!(orders_are_dense(&preview));
        let applied = apply_reorder(&route, source, target, &Permissive, &distance)
            .expect("permissive reorder succeeds");
        prop_assert!(orders_are_dense(&applied));

        let victim = route.get(source).map(|stop| stop.id.clone()).expect("stop exists");
        let withdrawn = withdraw_stop(&route, &victim, &Permissive, &distance).expect("known stop");
        prop_assert!(orders_are_dense(&withdrawn));
        prop_assert_eq!(withdrawn.len(), route.len() - 1);
    }

    /// Property: constructed point orders satisfy precedence, and the search
    /// never lengthens the greedy order.
    #[test]
    fn construction_is_feasible_and_non_worsening(request in construction_strategy(0, 6)) {
        let constructor = RouteConstructor::new(PlanarDistance::default());
        let order = constructor.order_points(&request).expect("valid request");
        prop_assert!(validate_point_sequence(&order.sequence).is_ok());
        prop_assert_eq!(order.sequence.len(), request.entries.len() * 2 + 2);
        let diagnostics = &order.diagnostics;
        prop_assert!(
            diagnostics.optimized_distance_km <= diagnostics.greedy_distance_km + 1e-9,
            "2-opt lengthened the route: {} > {}",
            diagnostics.optimized_distance_km,
            diagnostics.greedy_distance_km
        );
    }

    /// Property: each queued entry rides in exactly one constructed stop,
    /// from its own pickup to its own drop-off.
    #[test]
    fn each_entry_has_one_stop(request in construction_strategy(1, 6)) {
        let constructor = RouteConstructor::new(PlanarDistance::default());
        let built = constructor.construct(&request).expect("valid request");
        prop_assert!(orders_are_dense(&built.route));
        for entry in &request.entries {
            let id = format!("stop-{}", entry.id);
            let carried: Vec<_> = built.route.iter().filter(|stop| stop.id == id).collect();
            prop_assert_eq!(
                carried.len(),
                1,
                "entry {} carried {} times",
                entry.id,
                carried.len()
            );
            if let Some(stop) = carried.first() {
                prop_assert_eq!(&stop.pickup, &entry.pickup);
                prop_assert_eq!(&stop.dropoff, &entry.dropoff);
            }
        }
    }

    /// Property: recomputed ETAs never decrease.
    #[test]
    fn etas_are_monotone(route in route_strategy(0, 10)) {
        let timed = recalculate_eta(&route, &PlanarDistance::default());
        let etas: Vec<u32> = timed.iter().filter_map(|stop| stop.eta_minutes).collect();
        prop_assert_eq!(etas.len(), route.len());
        prop_assert!(etas.windows(2).all(|pair| pair.first() <= pair.last()));
    }

    /// Property: previewing a stop onto its own position is the identity.
    #[test]
    fn preview_onto_self_is_identity(route in route_strategy(1, 8), index in 0_usize..8) {
        let position = index % route.len();
        let preview = preview_reorder(&route, position, position).expect("index in range");
        prop_assert_eq!(preview, route);
    }

    /// Property: projecting to a timeline and folding it back restores the
    /// route, and timeline snapshots never go backwards.
    #[test]
    fn timeline_round_trips(route in route_strategy(0, 8)) {
        let points = stops_to_points(&route, &ServiceTimes::default(), &PlanarDistance::default());
        prop_assert_eq!(points.len(), route.len() * 2);
        prop_assert!(points.windows(2).all(|pair| match pair {
            [a, b] => a.eta_minutes <= b.eta_minutes && a.distance_km <= b.distance_km,
            _ => true,
        }), "timeline snapshots must be monotonic");
        prop_assert_eq!(points_to_stops(&points, &route), route);
    }
}
