//! Fixture builders shared by unit, behaviour and property tests.
//!
//! Coordinates are planar units; with the default [`PlanarDistance`] ten
//! units are one kilometre.
//!
//! [`PlanarDistance`]: crate::PlanarDistance

use chrono::{DateTime, NaiveDate, Utc};
use geo::Coord;

use crate::{
    Cargo, DriverProfile, Location, ParcelInfo, ParcelSize, PassengerInfo, PendingEntry, Request,
    Stop,
};

/// Date every fixture request targets unless told otherwise.
pub const SERVICE_DAY: NaiveDate = match NaiveDate::from_ymd_opt(2024, 5, 1) {
    Some(day) => day,
    None => NaiveDate::MIN,
};

/// Creation timestamp stamped on fixture requests.
pub const CREATED_AT: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

/// Location whose address is `address` at planar `(x, y)`.
#[must_use]
pub fn location(address: &str, x: f64, y: f64) -> Location {
    Location::new(address, Coord { x, y })
}

/// Location addressed by its own coordinates, e.g. `"(3, 4)"`.
#[must_use]
pub fn point(x: f64, y: f64) -> Location {
    location(&format!("({x}, {y})"), x, y)
}

/// Passenger cargo with a named rider.
#[must_use]
pub fn passenger(name: &str) -> Cargo {
    Cargo::Passenger(Some(PassengerInfo {
        name: name.to_owned(),
        phone: String::new(),
        rating: 5.0,
    }))
}

/// Parcel cargo of `size` weighing `weight_kg`.
#[must_use]
pub const fn parcel(size: ParcelSize, weight_kg: f64) -> Cargo {
    Cargo::Parcel(Some(ParcelInfo {
        size,
        weight_kg,
        description: None,
    }))
}

/// Pending passenger stop between two planar points.
#[must_use]
pub fn passenger_stop(id: &str, from: (f64, f64), to: (f64, f64)) -> Stop {
    Stop::new(id, passenger(id), point(from.0, from.1), point(to.0, to.1))
}

/// Pending parcel stop between two planar points.
#[must_use]
pub fn parcel_stop(
    id: &str,
    from: (f64, f64),
    to: (f64, f64),
    size: ParcelSize,
    weight_kg: f64,
) -> Stop {
    Stop::new(
        id,
        parcel(size, weight_kg),
        point(from.0, from.1),
        point(to.0, to.1),
    )
}

/// Passenger request for [`SERVICE_DAY`].
#[must_use]
pub fn passenger_request(id: &str, from: (f64, f64), to: (f64, f64)) -> Request {
    Request::new(
        id,
        passenger(id),
        point(from.0, from.1),
        point(to.0, to.1),
        SERVICE_DAY,
        CREATED_AT,
    )
}

/// Parcel request for [`SERVICE_DAY`].
#[must_use]
pub fn parcel_request(
    id: &str,
    from: (f64, f64),
    to: (f64, f64),
    size: ParcelSize,
    weight_kg: f64,
) -> Request {
    Request::new(
        id,
        parcel(size, weight_kg),
        point(from.0, from.1),
        point(to.0, to.1),
        SERVICE_DAY,
        CREATED_AT,
    )
}

/// Passenger entry queued for construction.
#[must_use]
pub fn entry(id: &str, pickup: Location, dropoff: Location) -> PendingEntry {
    PendingEntry::new(id, passenger(id), pickup, dropoff)
}

/// Online profile accepting every parcel size.
#[must_use]
pub fn profile(seat_capacity: u32, max_weight_kg: f64) -> DriverProfile {
    DriverProfile {
        seat_capacity,
        max_weight_kg,
        supported_sizes: vec![ParcelSize::S, ParcelSize::M, ParcelSize::L, ParcelSize::Xl],
        online: true,
    }
}
