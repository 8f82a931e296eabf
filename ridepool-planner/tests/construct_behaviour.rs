//! Behavioural tests for `RouteConstructor` using rstest-bdd.

use std::cell::RefCell;

use ridepool_core::test_support::{entry, location, point};
use ridepool_core::{Location, PendingEntry, PlanarDistance, Route};
use ridepool_planner::{
    CancelFlag, Construction, ConstructionRequest, PlanError, RouteConstructor, total_distance_km,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug)]
struct ConstructWorld {
    origin: RefCell<Location>,
    destination: RefCell<Location>,
    entries: RefCell<Vec<PendingEntry>>,
    cancel: RefCell<Option<CancelFlag>>,
    outcome: RefCell<Option<Result<Construction, PlanError>>>,
    listed: RefCell<Option<Route>>,
}

impl ConstructWorld {
    fn new() -> Self {
        Self {
            origin: RefCell::new(point(0.0, 0.0)),
            destination: RefCell::new(point(0.0, 0.0)),
            entries: RefCell::new(Vec::new()),
            cancel: RefCell::new(None),
            outcome: RefCell::new(None),
            listed: RefCell::new(None),
        }
    }

    fn request(&self) -> ConstructionRequest {
        ConstructionRequest::new(
            self.origin.borrow().clone(),
            self.destination.borrow().clone(),
            self.entries.borrow().clone(),
        )
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> Result<Construction, PlanError> {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
    }
}

#[fixture]
fn world() -> ConstructWorld {
    ConstructWorld::new()
}

fn hops(route: &Route) -> Vec<(String, String)> {
    route
        .iter()
        .map(|s| (s.pickup.address.clone(), s.dropoff.address.clone()))
        .collect()
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(a, b)| ((*a).to_owned(), (*b).to_owned()))
        .collect()
}

#[given("a trip from A to D")]
fn given_trip(world: &ConstructWorld) {
    world.origin.replace(location("A", 0.0, 0.0));
    world.destination.replace(location("D", 30.0, 0.0));
}

#[given("a trip from Lviv to Kyiv")]
fn given_long_trip(world: &ConstructWorld) {
    world.origin.replace(location("Lviv", 0.0, 0.0));
    world.destination.replace(location("Kyiv", 100.0, 0.0));
}

#[given("a passenger travelling from B to C")]
fn given_passenger(world: &ConstructWorld) {
    world.entries.borrow_mut().push(entry(
        "r1",
        location("B", 10.0, 0.0),
        location("C", 20.0, 0.0),
    ));
}

#[given("a passenger travelling from lviv to Rivne")]
fn given_local_passenger(world: &ConstructWorld) {
    world.entries.borrow_mut().push(entry(
        "r1",
        location(" lviv ", 0.0, 0.0),
        location("Rivne", 40.0, 0.0),
    ));
}

#[given("the same passenger queued twice")]
fn given_duplicate(world: &ConstructWorld) {
    let first = world.entries.borrow().first().cloned();
    if let Some(copy) = first {
        world.entries.borrow_mut().push(copy);
    }
}

#[given("two riders whose pickups are out of order")]
fn given_detour(world: &ConstructWorld) {
    world.origin.replace(point(0.0, 0.0));
    world.destination.replace(point(20.0, 0.0));
    world.entries.replace(vec![
        entry("a", point(1.0, 0.0), point(10.0, 0.0)),
        entry("b", point(-1.5, 0.0), point(9.0, 0.0)),
    ]);
}

#[given("the search is cancelled before it starts")]
fn given_cancelled(world: &ConstructWorld) {
    let flag = CancelFlag::new();
    flag.cancel();
    world.cancel.replace(Some(flag));
}

#[when("the route is constructed")]
fn when_constructed(world: &ConstructWorld) {
    let mut constructor = RouteConstructor::new(PlanarDistance::default());
    if let Some(flag) = world.cancel.borrow().clone() {
        constructor = constructor.with_cancel_flag(flag);
    }
    let outcome = constructor.construct(&world.request());
    world.outcome.replace(Some(outcome));
}

#[when("the route is built in listed order")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_listed(world: &ConstructWorld) {
    let route = RouteConstructor::new(PlanarDistance::default())
        .construct_sequential(&world.request())
        .expect("listed order should build");
    world.listed.replace(Some(route));
}

#[then("the stops run A to B, B to C, C to D")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_abcd(world: &ConstructWorld) {
    let built = world.expect_outcome().expect("expected construction");
    assert_eq!(
        hops(&built.route),
        owned(&[("A", "B"), ("B", "C"), ("C", "D")])
    );
}

#[then("every stop has an ETA")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_etas(world: &ConstructWorld) {
    let built = world.expect_outcome().expect("expected construction");
    let etas: Vec<Option<u32>> = built.route.iter().map(|s| s.eta_minutes).collect();
    assert_eq!(etas, vec![Some(1), Some(2), Some(3)]);
}

#[then("construction fails with a duplicate entry")]
fn then_duplicate(world: &ConstructWorld) {
    assert!(matches!(
        world.expect_outcome(),
        Err(PlanError::DuplicateEntry { id }) if id == "r1"
    ));
}

#[then("the construction reports an interrupted search")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_interrupted(world: &ConstructWorld) {
    let built = world.expect_outcome().expect("expected construction");
    assert!(built.diagnostics.interrupted);
    assert_eq!(built.diagnostics.moves_applied, 0);
}

#[then("the route is as long as the greedy order")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_greedy_length(world: &ConstructWorld) {
    let built = world.expect_outcome().expect("expected construction");
    let diagnostics = &built.diagnostics;
    assert!((diagnostics.optimized_distance_km - diagnostics.greedy_distance_km).abs() < 1e-9);
    let driven = total_distance_km(&built.route, &PlanarDistance::default());
    assert!((driven - diagnostics.greedy_distance_km).abs() < 1e-9);
}

#[then("the stops run Lviv to Rivne, Rivne to Kyiv")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_listed(world: &ConstructWorld) {
    let route = world.listed.borrow().clone().expect("listed route built");
    assert_eq!(
        hops(&route),
        owned(&[(" lviv ", "Rivne"), ("Rivne", "Kyiv")])
    );
}

#[scenario(path = "tests/features/construct.feature", index = 0)]
fn single_passenger(world: ConstructWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/construct.feature", index = 1)]
fn duplicate_entries(world: ConstructWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/construct.feature", index = 2)]
fn cancelled_search(world: ConstructWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/construct.feature", index = 3)]
fn listed_order(world: ConstructWorld) {
    let _ = world;
}
