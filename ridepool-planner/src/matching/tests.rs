//! Tests for request matching.

use super::*;
use chrono::Days;
use ridepool_core::test_support::{
    SERVICE_DAY, parcel_request, parcel_stop, passenger_request, passenger_stop, point, profile,
};
use ridepool_core::{ParcelSize, PlanarDistance, Stop, StopStatus};
use rstest::{fixture, rstest};

#[fixture]
fn eastbound() -> Route {
    Route::new(vec![passenger_stop("s", (0.0, 0.0), (100.0, 0.0))])
}

#[fixture]
fn van() -> DriverProfile {
    profile(4, 100.0)
}

fn ids(requests: &[Request]) -> Vec<&str> {
    requests.iter().map(|r| r.id.as_str()).collect()
}

#[rstest]
#[case(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 })]
#[case(Coord { x: 3.0, y: 4.0 }, Coord { x: 0.0, y: 0.0 })]
fn zero_heading_scores_nothing(#[case] a: Coord<f64>, #[case] b: Coord<f64>) {
    assert!(direction_match(a, b).abs() < f64::EPSILON);
}

#[rstest]
fn empty_route_has_no_deviation() {
    let request = passenger_request("r", (0.0, 0.0), (500.0, 500.0));
    let result = deviation(&Route::empty(), &request, &PlanarDistance::default());
    assert_eq!(
        result,
        Deviation {
            distance_km: 0.0,
            time_minutes: 0
        }
    );
}

#[rstest]
fn deviation_sums_nearest_pickup_and_dropoff(eastbound: Route) {
    let request = passenger_request("r", (0.0, 30.0), (100.0, 30.0));
    let result = deviation(&eastbound, &request, &PlanarDistance::default());
    assert!((result.distance_km - 6.0).abs() < 1e-9);
    assert_eq!(result.time_minutes, 6);
}

#[rstest]
fn full_car_rejects_passenger_regardless_of_deviation() {
    let route = Route::new(vec![passenger_stop("s", (0.0, 0.0), (100.0, 0.0))]);
    let request = passenger_request("r", (0.0, 0.0), (100.0, 0.0));
    let single_seat = profile(1, 100.0);
    assert_eq!(
        check_request(&route, &request, &single_seat, DEFAULT_MIN_DIRECTION_MATCH),
        Err(Rejection::SeatsFull { capacity: 1 })
    );
    assert!(!is_request_valid(&route, &request, &single_seat));
}

#[rstest]
fn delivered_and_transit_stops_free_their_seats() {
    let delivered =
        passenger_stop("done", (0.0, 0.0), (50.0, 0.0)).with_status(StopStatus::Delivered);
    let transit = Stop::new(
        "leg-0",
        Cargo::transit(),
        point(50.0, 0.0),
        point(100.0, 0.0),
    );
    let route = Route::new(vec![delivered, transit]);
    let request = passenger_request("r", (0.0, 0.0), (100.0, 0.0));
    assert!(is_request_valid(&route, &request, &profile(1, 0.0)));
}

#[rstest]
fn undescribed_passenger_still_takes_a_seat() {
    let rider = Stop::new(
        "p",
        Cargo::Passenger(None),
        point(0.0, 0.0),
        point(100.0, 0.0),
    );
    let route = Route::new(vec![rider]);
    let request = passenger_request("r", (10.0, 0.0), (90.0, 0.0));
    assert_eq!(
        check_request(&route, &request, &profile(1, 100.0), DEFAULT_MIN_DIRECTION_MATCH),
        Err(Rejection::SeatsFull { capacity: 1 })
    );
    assert!(is_request_valid(&route, &request, &profile(2, 100.0)));
}

#[rstest]
fn unsupported_parcel_size_is_rejected(eastbound: Route) {
    let small_only = DriverProfile::new(4, 100.0, vec![ParcelSize::S]).expect("profile");
    let request = parcel_request("p", (0.0, 0.0), (100.0, 0.0), ParcelSize::L, 1.0);
    assert_eq!(
        check_request(&eastbound, &request, &small_only, DEFAULT_MIN_DIRECTION_MATCH),
        Err(Rejection::UnsupportedSize {
            size: ParcelSize::L
        })
    );
}

#[rstest]
fn outstanding_parcels_count_towards_load(van: DriverProfile) {
    let route = Route::new(vec![
        parcel_stop("a", (0.0, 0.0), (50.0, 0.0), ParcelSize::M, 60.0),
        parcel_stop("b", (50.0, 0.0), (100.0, 0.0), ParcelSize::M, 30.0)
            .with_status(StopStatus::Delivered),
    ]);
    let fits = parcel_request("fits", (0.0, 0.0), (100.0, 0.0), ParcelSize::S, 40.0);
    let heavy = parcel_request("heavy", (0.0, 0.0), (100.0, 0.0), ParcelSize::S, 40.5);
    assert!(is_request_valid(&route, &fits, &van));
    assert!(matches!(
        check_request(&route, &heavy, &van, DEFAULT_MIN_DIRECTION_MATCH),
        Err(Rejection::Overweight { .. })
    ));
}

#[rstest]
fn opposite_heading_is_rejected_in_both_modes(eastbound: Route, van: DriverProfile) {
    let westbound = passenger_request("w", (100.0, 0.0), (0.0, 0.0));
    let distance = PlanarDistance::default();
    assert!(!is_request_valid(&eastbound, &westbound, &van));
    let requests = [westbound];
    assert!(
        find_matching_requests(
            &eastbound,
            &requests,
            &van,
            SERVICE_DAY,
            &MatchThresholds::PLANNING,
            &distance
        )
        .is_empty()
    );
    assert!(
        find_compatible_passengers(
            &eastbound,
            &requests,
            &van,
            SERVICE_DAY,
            &MatchThresholds::LIVE,
            &distance
        )
        .is_empty()
    );
}

fn candidates() -> Vec<Request> {
    let mut tomorrow = passenger_request("tomorrow", (5.0, 0.0), (95.0, 0.0));
    tomorrow.date = SERVICE_DAY
        .checked_add_days(Days::new(1))
        .expect("date in range");
    vec![
        passenger_request("far", (0.0, 150.0), (100.0, 150.0)),
        passenger_request("farther", (0.0, 30.0), (100.0, 30.0)),
        tomorrow,
        passenger_request("near", (5.0, 0.0), (95.0, 0.0)),
    ]
}

#[rstest]
fn planning_filters_and_ranks(eastbound: Route, van: DriverProfile) {
    let matches = find_matching_requests(
        &eastbound,
        &candidates(),
        &van,
        SERVICE_DAY,
        &MatchThresholds::PLANNING,
        &PlanarDistance::default(),
    );
    assert_eq!(ids(&matches), vec!["near", "farther"]);
}

#[rstest]
fn planning_on_empty_route_keeps_valid_requests(van: DriverProfile) {
    let matches = find_matching_requests(
        &Route::empty(),
        &candidates(),
        &van,
        SERVICE_DAY,
        &MatchThresholds::PLANNING,
        &PlanarDistance::default(),
    );
    assert_eq!(ids(&matches), vec!["far", "farther", "near"]);
}

#[rstest]
fn live_mode_accepts_larger_detours(eastbound: Route, van: DriverProfile) {
    let matches = find_compatible_passengers(
        &eastbound,
        &candidates(),
        &van,
        SERVICE_DAY,
        &MatchThresholds::LIVE,
        &PlanarDistance::default(),
    );
    let summary: Vec<(&str, u32, u32)> = matches
        .iter()
        .map(|m| {
            (
                m.request.id.as_str(),
                m.time_deviation_minutes,
                m.direction_match_percent,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![("near", 1, 100), ("farther", 6, 100), ("far", 30, 100)]
    );
}

#[rstest]
fn live_percentage_is_rounded(eastbound: Route, van: DriverProfile) {
    let requests = [passenger_request("diagonal", (0.0, 0.0), (100.0, 50.0))];
    let matches = find_compatible_passengers(
        &eastbound,
        &requests,
        &van,
        SERVICE_DAY,
        &MatchThresholds::LIVE,
        &PlanarDistance::default(),
    );
    let percentages: Vec<u32> = matches.iter().map(|m| m.direction_match_percent).collect();
    assert_eq!(percentages, vec![95]);
}

#[rstest]
fn live_mode_is_silent_without_route_or_when_offline(eastbound: Route, van: DriverProfile) {
    let distance = PlanarDistance::default();
    assert!(
        find_compatible_passengers(
            &Route::empty(),
            &candidates(),
            &van,
            SERVICE_DAY,
            &MatchThresholds::LIVE,
            &distance
        )
        .is_empty()
    );
    let offline = DriverProfile {
        online: false,
        ..van
    };
    assert!(
        find_compatible_passengers(
            &eastbound,
            &candidates(),
            &offline,
            SERVICE_DAY,
            &MatchThresholds::LIVE,
            &distance
        )
        .is_empty()
    );
}

#[rstest]
#[case(MatchMode::Planning, 20.0, 30)]
#[case(MatchMode::Live, 50.0, 60)]
fn modes_select_thresholds(#[case] mode: MatchMode, #[case] km: f64, #[case] minutes: u32) {
    let thresholds = mode.thresholds();
    assert!((thresholds.max_distance_km - km).abs() < f64::EPSILON);
    assert_eq!(thresholds.max_time_minutes, minutes);
    assert!((thresholds.min_direction_match - 0.70).abs() < f64::EPSILON);
}
