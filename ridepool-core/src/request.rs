//! Inbound asks: requests waiting for a driver and entries queued for route
//! construction.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{Cargo, CargoKind, Location};

/// An uncommitted passenger or parcel request.
///
/// Requests are read-only input to the matcher. Accepting one turns it into
/// stops; rejecting it discards it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    /// Stable identifier.
    pub id: String,
    /// Requested cargo.
    pub cargo: Cargo,
    /// Collection point.
    pub pickup: Location,
    /// Delivery point.
    pub dropoff: Location,
    /// Travel date the requester asked for.
    pub date: NaiveDate,
    /// Offered price, if any.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub price: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}

impl Request {
    /// Construct a request without a price.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        cargo: Cargo,
        pickup: Location,
        dropoff: Location,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            cargo,
            pickup,
            dropoff,
            date,
            price: None,
            created_at,
        }
    }

    /// Kind of cargo requested.
    #[must_use]
    pub const fn kind(&self) -> CargoKind {
        self.cargo.kind()
    }
}

/// A passenger or parcel queued before the route is built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingEntry {
    /// Identifier, unique within one construction.
    pub id: String,
    /// Cargo to move.
    pub cargo: Cargo,
    /// Collection point.
    pub pickup: Location,
    /// Delivery point.
    pub dropoff: Location,
    /// Agreed price, if any.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub price: Option<String>,
}

impl PendingEntry {
    /// Construct an entry without a price.
    #[must_use]
    pub fn new(id: impl Into<String>, cargo: Cargo, pickup: Location, dropoff: Location) -> Self {
        Self {
            id: id.into(),
            cargo,
            pickup,
            dropoff,
            price: None,
        }
    }
}
