//! Rank inbound requests by how well they fit the current route.
//!
//! The same policy runs in two modes. Planning mode filters requests for a
//! trip that has not started yet and applies tight deviation limits. Live
//! mode runs while the driver is on the road, tolerates larger detours, and
//! reports each survivor's deviation and heading agreement.

use chrono::NaiveDate;
use geo::Coord;
use ridepool_core::{Cargo, DistanceProvider, DriverProfile, ParcelSize, Request, Route};
use thiserror::Error;

use crate::units::{round_tenth, whole_minutes, whole_percent};

/// Minimum heading agreement a request needs against a non-empty route.
pub const DEFAULT_MIN_DIRECTION_MATCH: f64 = 0.70;

/// Limits a request must stay within to be offered to the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchThresholds {
    /// Largest acceptable detour, in kilometres.
    pub max_distance_km: f64,
    /// Largest acceptable detour, in minutes.
    pub max_time_minutes: u32,
    /// Smallest acceptable heading agreement in `0.0..=1.0`.
    pub min_direction_match: f64,
}

impl MatchThresholds {
    /// Limits used before the trip starts.
    pub const PLANNING: Self = Self {
        max_distance_km: 20.0,
        max_time_minutes: 30,
        min_direction_match: DEFAULT_MIN_DIRECTION_MATCH,
    };

    /// Looser limits used while the route is being driven.
    pub const LIVE: Self = Self {
        max_distance_km: 50.0,
        max_time_minutes: 60,
        min_direction_match: DEFAULT_MIN_DIRECTION_MATCH,
    };
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self::PLANNING
    }
}

/// Which set of limits applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MatchMode {
    /// The trip has not started.
    #[default]
    Planning,
    /// The driver is on the road.
    Live,
}

impl MatchMode {
    /// Default limits for this mode.
    #[must_use]
    pub const fn thresholds(self) -> MatchThresholds {
        match self {
            Self::Planning => MatchThresholds::PLANNING,
            Self::Live => MatchThresholds::LIVE,
        }
    }
}

/// Why a request cannot be served at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    /// The vehicle does not take parcels of this size.
    #[error("vehicle does not carry {size} parcels")]
    UnsupportedSize {
        /// Requested size.
        size: ParcelSize,
    },
    /// The parcel would push the load past the vehicle's limit.
    #[error("load of {load_kg} kg would exceed the {limit_kg} kg limit")]
    Overweight {
        /// Load including the new parcel.
        load_kg: f64,
        /// Vehicle limit.
        limit_kg: f64,
    },
    /// Every seat is taken.
    #[error("all {capacity} seats are taken")]
    SeatsFull {
        /// Seats in the vehicle.
        capacity: u32,
    },
    /// The request heads away from the route.
    #[error("heading agreement {score:.2} is below {minimum:.2}")]
    WrongDirection {
        /// Agreement between the route and the request.
        score: f64,
        /// Required agreement.
        minimum: f64,
    },
}

/// Extra distance and time a request adds to the route.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deviation {
    /// Kilometres, to 0.1 km.
    pub distance_km: f64,
    /// Whole minutes.
    pub time_minutes: u32,
}

impl Deviation {
    /// Ranking key: kilometres plus half the minutes. Lower is better.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.distance_km + f64::from(self.time_minutes) / 2.0
    }
}

/// A request that fits the route, with the figures shown to the driver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompatibleMatch {
    /// The matching request.
    pub request: Request,
    /// Detour in kilometres.
    pub distance_deviation_km: f64,
    /// Detour in minutes.
    pub time_deviation_minutes: u32,
    /// Heading agreement as a whole percentage.
    pub direction_match_percent: u32,
}

/// Heading of the whole route: from the first pickup to the last drop-off.
#[must_use]
pub fn route_direction(route: &Route) -> Coord<f64> {
    match (route.first(), route.last()) {
        (Some(first), Some(last)) => last.dropoff.position - first.pickup.position,
        _ => Coord::zero(),
    }
}

/// Heading of a request: from its pickup to its drop-off.
#[must_use]
pub fn request_direction(request: &Request) -> Coord<f64> {
    request.dropoff.position - request.pickup.position
}

/// Agreement between two headings in `0.0..=1.0`.
///
/// The cosine similarity is mapped from `[-1, 1]` onto `[0, 1]`, so equal
/// headings score 1 and opposite ones 0. A zero-length heading scores 0.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ridepool_planner::matching::direction_match;
///
/// let east = Coord { x: 1.0, y: 0.0 };
/// let west = Coord { x: -4.0, y: 0.0 };
/// let north = Coord { x: 0.0, y: 2.0 };
/// assert!((direction_match(east, east) - 1.0).abs() < 1e-9);
/// assert!(direction_match(east, west).abs() < 1e-9);
/// assert!((direction_match(east, north) - 0.5).abs() < 1e-9);
/// ```
#[must_use]
pub fn direction_match(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let magnitude_a = a.x.hypot(a.y);
    let magnitude_b = b.x.hypot(b.y);
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }
    let cosine = (a.x * b.x + a.y * b.y) / (magnitude_a * magnitude_b);
    (cosine + 1.0) / 2.0
}

/// Detour a request adds: the distance from the closest route pickup to the
/// request pickup plus the distance from the closest route drop-off to the
/// request drop-off. An empty route adds nothing.
#[must_use]
pub fn deviation<D>(route: &Route, request: &Request, distance: &D) -> Deviation
where
    D: DistanceProvider + ?Sized,
{
    if route.is_empty() {
        return Deviation {
            distance_km: 0.0,
            time_minutes: 0,
        };
    }
    let nearest_pickup = route
        .iter()
        .map(|stop| distance.distance_km(&stop.pickup, &request.pickup))
        .fold(f64::INFINITY, f64::min);
    let nearest_dropoff = route
        .iter()
        .map(|stop| distance.distance_km(&stop.dropoff, &request.dropoff))
        .fold(f64::INFINITY, f64::min);
    let detour_km = nearest_pickup + nearest_dropoff;
    Deviation {
        distance_km: round_tenth(detour_km),
        time_minutes: whole_minutes(distance.minutes_for_km(detour_km)),
    }
}

/// Seats taken by outstanding passengers, described or not.
fn occupied_seats(route: &Route) -> usize {
    route
        .iter()
        .filter(|stop| stop.is_active())
        .filter(|stop| matches!(stop.cargo, Cargo::Passenger(_)))
        .count()
}

/// Weight of outstanding parcels, in kilograms.
fn parcel_load_kg(route: &Route) -> f64 {
    route
        .iter()
        .filter(|stop| stop.is_active())
        .map(|stop| stop.cargo.parcel_weight_kg())
        .sum()
}

/// Check vehicle limits and heading for `request`.
///
/// Parcel size and weight are only checked when the request describes its
/// parcel. The load is the sum over every outstanding parcel stop, not a
/// per-position profile.
///
/// # Errors
/// Returns the first [`Rejection`] that applies.
pub fn check_request(
    route: &Route,
    request: &Request,
    profile: &DriverProfile,
    min_direction_match: f64,
) -> Result<(), Rejection> {
    match &request.cargo {
        Cargo::Parcel(Some(parcel)) => {
            if !profile.supports(parcel.size) {
                return Err(Rejection::UnsupportedSize { size: parcel.size });
            }
            let load_kg = parcel_load_kg(route) + parcel.weight_kg;
            if load_kg > profile.max_weight_kg {
                return Err(Rejection::Overweight {
                    load_kg,
                    limit_kg: profile.max_weight_kg,
                });
            }
        }
        Cargo::Passenger(_) => {
            let taken = u32::try_from(occupied_seats(route)).unwrap_or(u32::MAX);
            if taken >= profile.seat_capacity {
                return Err(Rejection::SeatsFull {
                    capacity: profile.seat_capacity,
                });
            }
        }
        Cargo::Parcel(None) | Cargo::Transit => {}
    }
    if !route.is_empty() {
        let score = direction_match(route_direction(route), request_direction(request));
        if score < min_direction_match {
            return Err(Rejection::WrongDirection {
                score,
                minimum: min_direction_match,
            });
        }
    }
    Ok(())
}

/// Whether the driver could take `request` at all, using the default
/// heading floor.
#[must_use]
pub fn is_request_valid(route: &Route, request: &Request, profile: &DriverProfile) -> bool {
    check_request(route, request, profile, DEFAULT_MIN_DIRECTION_MATCH).is_ok()
}

/// Requests for `date` that fit the route, best first.
///
/// Survivors pass [`check_request`] and stay within `thresholds`. Ties keep
/// their input order.
#[must_use]
pub fn find_matching_requests<D>(
    route: &Route,
    requests: &[Request],
    profile: &DriverProfile,
    date: NaiveDate,
    thresholds: &MatchThresholds,
    distance: &D,
) -> Vec<Request>
where
    D: DistanceProvider + ?Sized,
{
    let mut ranked: Vec<(&Request, Deviation)> = requests
        .iter()
        .filter(|request| request.date == date)
        .filter(|request| {
            check_request(route, request, profile, thresholds.min_direction_match).is_ok()
        })
        .map(|request| (request, deviation(route, request, distance)))
        .filter(|(_, deviation)| within(deviation, thresholds))
        .collect();
    ranked.sort_by(|(_, a), (_, b)| a.score().total_cmp(&b.score()));
    log::debug!(
        "{} of {} requests match the planned route",
        ranked.len(),
        requests.len()
    );
    ranked
        .into_iter()
        .map(|(request, _)| request.clone())
        .collect()
}

/// Requests for `date` the driver could pick up on the way, best first.
///
/// Nothing is offered when the route is empty or the driver is offline.
#[must_use]
pub fn find_compatible_passengers<D>(
    route: &Route,
    requests: &[Request],
    profile: &DriverProfile,
    date: NaiveDate,
    thresholds: &MatchThresholds,
    distance: &D,
) -> Vec<CompatibleMatch>
where
    D: DistanceProvider + ?Sized,
{
    if route.is_empty() || !profile.online {
        return Vec::new();
    }
    let heading = route_direction(route);
    let mut ranked: Vec<(&Request, Deviation, f64)> = requests
        .iter()
        .filter(|request| request.date == date)
        .filter(|request| {
            check_request(route, request, profile, thresholds.min_direction_match).is_ok()
        })
        .map(|request| {
            let agreement = direction_match(heading, request_direction(request));
            (request, deviation(route, request, distance), agreement)
        })
        .filter(|(_, deviation, agreement)| {
            within(deviation, thresholds) && *agreement >= thresholds.min_direction_match
        })
        .collect();
    ranked.sort_by(|(_, a, _), (_, b, _)| a.score().total_cmp(&b.score()));
    log::debug!(
        "{} of {} requests are compatible with the live route",
        ranked.len(),
        requests.len()
    );
    ranked
        .into_iter()
        .map(|(request, deviation, agreement)| CompatibleMatch {
            request: request.clone(),
            distance_deviation_km: deviation.distance_km,
            time_deviation_minutes: deviation.time_minutes,
            direction_match_percent: whole_percent(agreement * 100.0),
        })
        .collect()
}

fn within(deviation: &Deviation, thresholds: &MatchThresholds) -> bool {
    deviation.distance_km <= thresholds.max_distance_km
        && deviation.time_minutes <= thresholds.max_time_minutes
}

#[cfg(test)]
mod tests;
