//! Flat point timeline shown to the driver.
//!
//! Each [`Stop`] becomes two [`TimelinePoint`]s, one for its pickup and one
//! for its drop-off, each carrying a cumulative distance and ETA snapshot.
//! Unlike [`recalculate_eta`](crate::recalculate_eta), the timeline charges
//! handling time at every pickup and drop-off except the very first pickup
//! and the very last drop-off.
//!
//! [`points_to_stops`] folds an edited timeline back into a route.

use std::collections::{HashMap, HashSet};

use ridepool_core::{Cargo, CargoKind, DistanceProvider, Location, Route, Stop, StopStatus};

use crate::units::{round_tenth, whole_minutes};

/// What the driver does at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PointKind {
    /// First pickup of the route.
    Start,
    /// Last drop-off of the route.
    Finish,
    /// Collect a passenger.
    PickupPassenger,
    /// Collect a parcel.
    PickupParcel,
    /// Set a passenger down.
    DropoffPassenger,
    /// Hand a parcel over.
    DropoffParcel,
}

impl PointKind {
    const fn pickup(kind: CargoKind) -> Self {
        match kind {
            CargoKind::Passenger => Self::PickupPassenger,
            CargoKind::Parcel => Self::PickupParcel,
        }
    }

    const fn dropoff(kind: CargoKind) -> Self {
        match kind {
            CargoKind::Passenger => Self::DropoffPassenger,
            CargoKind::Parcel => Self::DropoffParcel,
        }
    }
}

/// Which end of its stop a point represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PointHalf {
    /// The stop's pickup location.
    Pickup,
    /// The stop's drop-off location.
    Dropoff,
}

/// Minutes spent handling cargo at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceTimes {
    /// Charged after every pickup except the first.
    pub pickup_minutes: f64,
    /// Charged after every drop-off except the last.
    pub dropoff_minutes: f64,
}

impl Default for ServiceTimes {
    fn default() -> Self {
        Self {
            pickup_minutes: 3.0,
            dropoff_minutes: 2.0,
        }
    }
}

/// One entry in the driver's timeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelinePoint {
    /// `pickup-<stop id>` or `dropoff-<stop id>`.
    pub id: String,
    /// Owning stop.
    pub stop_id: String,
    /// End of the stop this point stands for.
    pub half: PointHalf,
    /// Action at this point.
    pub kind: PointKind,
    /// Position in the timeline: `2 * stop index` for pickups, plus one for
    /// drop-offs.
    pub order: usize,
    /// Where the action happens.
    pub location: Location,
    /// Cargo of the owning stop.
    pub cargo: Cargo,
    /// Status derived from the owning stop.
    pub status: StopStatus,
    /// Minutes from route start, including handling time so far.
    pub eta_minutes: u32,
    /// Kilometres from route start, to 0.1 km.
    pub distance_km: f64,
    /// Price of the owning stop.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub price: Option<String>,
}

#[derive(Default)]
struct Odometer {
    km: f64,
    minutes: f64,
}

impl Odometer {
    fn drive<D>(&mut self, from: &Location, to: &Location, distance: &D)
    where
        D: DistanceProvider + ?Sized,
    {
        let km = distance.distance_km(from, to);
        self.km += km;
        self.minutes += distance.minutes_for_km(km);
    }
}

/// Project `route` onto a flat timeline of pickup and drop-off points.
///
/// # Examples
/// ```
/// use ridepool_core::{PlanarDistance, Route, test_support::passenger_stop};
/// use ridepool_planner::timeline::{PointKind, ServiceTimes, stops_to_points};
///
/// let route = Route::new(vec![
///     passenger_stop("a", (0.0, 0.0), (0.0, 50.0)),
///     passenger_stop("b", (0.0, 50.0), (0.0, 100.0)),
/// ]);
/// let points = stops_to_points(&route, &ServiceTimes::default(), &PlanarDistance::default());
/// let kinds: Vec<_> = points.iter().map(|p| p.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         PointKind::Start,
///         PointKind::DropoffPassenger,
///         PointKind::PickupPassenger,
///         PointKind::Finish,
///     ]
/// );
/// let etas: Vec<_> = points.iter().map(|p| p.eta_minutes).collect();
/// assert_eq!(etas, vec![0, 5, 7, 15]);
/// ```
#[must_use]
pub fn stops_to_points<D>(route: &Route, service: &ServiceTimes, distance: &D) -> Vec<TimelinePoint>
where
    D: DistanceProvider + ?Sized,
{
    let last_index = route.len().saturating_sub(1);
    let mut odometer = Odometer::default();
    let mut previous: Option<&Stop> = None;
    let mut points = Vec::with_capacity(route.len() * 2);

    for (index, stop) in route.iter().enumerate() {
        let is_first = index == 0;
        let is_last = index == last_index;
        if let Some(prev) = previous {
            odometer.drive(&prev.dropoff, &stop.pickup, distance);
        }

        let pickup_kind = if is_first {
            PointKind::Start
        } else {
            PointKind::pickup(stop.kind())
        };
        let pickup_status = match stop.status {
            StopStatus::Pending => StopStatus::Pending,
            StopStatus::PickedUp | StopStatus::Delivered => StopStatus::PickedUp,
        };
        points.push(snapshot(
            stop,
            PointHalf::Pickup,
            pickup_kind,
            pickup_status,
            index * 2,
            &odometer,
        ));
        if !is_first {
            odometer.minutes += service.pickup_minutes;
        }

        odometer.drive(&stop.pickup, &stop.dropoff, distance);
        let dropoff_kind = if is_last {
            PointKind::Finish
        } else {
            PointKind::dropoff(stop.kind())
        };
        let dropoff_status = match stop.status {
            StopStatus::Delivered => StopStatus::Delivered,
            StopStatus::Pending | StopStatus::PickedUp => StopStatus::Pending,
        };
        points.push(snapshot(
            stop,
            PointHalf::Dropoff,
            dropoff_kind,
            dropoff_status,
            index * 2 + 1,
            &odometer,
        ));
        if !is_last {
            odometer.minutes += service.dropoff_minutes;
        }

        previous = Some(stop);
    }
    points
}

fn snapshot(
    stop: &Stop,
    half: PointHalf,
    kind: PointKind,
    status: StopStatus,
    order: usize,
    odometer: &Odometer,
) -> TimelinePoint {
    let (prefix, location) = match half {
        PointHalf::Pickup => ("pickup", &stop.pickup),
        PointHalf::Dropoff => ("dropoff", &stop.dropoff),
    };
    TimelinePoint {
        id: format!("{prefix}-{}", stop.id),
        stop_id: stop.id.clone(),
        half,
        kind,
        order,
        location: location.clone(),
        cargo: stop.cargo.clone(),
        status,
        eta_minutes: whole_minutes(odometer.minutes),
        distance_km: round_tenth(odometer.km),
        price: stop.price.clone(),
    }
}

/// Rebuild a route from an edited timeline.
///
/// Stops appear in the order of their earliest point. Each rebuilt stop is
/// the matching stop from `original` with its pickup and drop-off locations
/// taken from the points. Stops missing from `original`, and stops without
/// both a pickup and a drop-off point, are dropped.
#[must_use]
pub fn points_to_stops(points: &[TimelinePoint], original: &Route) -> Route {
    let originals: HashMap<&str, &Stop> = original
        .iter()
        .map(|stop| (stop.id.as_str(), stop))
        .collect();

    let mut halves: HashMap<&str, (Option<&Location>, Option<&Location>)> = HashMap::new();
    for point in points {
        let entry = halves.entry(point.stop_id.as_str()).or_default();
        match point.half {
            PointHalf::Pickup => entry.0 = Some(&point.location),
            PointHalf::Dropoff => entry.1 = Some(&point.location),
        }
    }

    let mut sorted: Vec<&TimelinePoint> = points.iter().collect();
    sorted.sort_by_key(|point| point.order);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut stops = Vec::new();
    for point in sorted {
        let id = point.stop_id.as_str();
        if seen.contains(id) {
            continue;
        }
        let Some(stop) = originals.get(id) else {
            log::warn!("timeline point {} refers to unknown stop {id}", point.id);
            continue;
        };
        let Some((Some(pickup), Some(dropoff))) = halves.get(id) else {
            continue;
        };
        let mut rebuilt = Stop::clone(stop);
        rebuilt.pickup = Location::clone(pickup);
        rebuilt.dropoff = Location::clone(dropoff);
        stops.push(rebuilt);
        seen.insert(id);
    }
    Route::new(stops)
}
