//! Committed route legs.

use crate::{Cargo, CargoKind, Location};

/// Lifecycle of a committed stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StopStatus {
    /// Not yet collected.
    #[default]
    Pending,
    /// Collected and on board.
    PickedUp,
    /// Handed over at the drop-off.
    Delivered,
}

impl StopStatus {
    /// The following lifecycle state, or `None` once delivered.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::PickedUp),
            Self::PickedUp => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }
}

/// A committed leg from `pickup` to `dropoff`.
///
/// `order` mirrors the stop's index in its [`Route`](crate::Route); the route
/// rewrites it whenever stops move.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ridepool_core::{Cargo, Location, Stop, StopStatus};
///
/// let stop = Stop::new(
///     "s1",
///     Cargo::transit(),
///     Location::new("A", Coord { x: 0.0, y: 0.0 }),
///     Location::new("B", Coord { x: 3.0, y: 4.0 }),
/// );
/// assert_eq!(stop.status, StopStatus::Pending);
/// assert!(stop.eta_minutes.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Stable identifier.
    pub id: String,
    /// Cargo carried between pickup and drop-off.
    pub cargo: Cargo,
    /// Position within the owning route.
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: usize,
    /// Where the leg starts.
    pub pickup: Location,
    /// Where the leg ends.
    pub dropoff: Location,
    /// Lifecycle state.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: StopStatus,
    /// Minutes from route start until the drop-off is reached.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub eta_minutes: Option<u32>,
    /// Agreed price, as quoted to the customer.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub price: Option<String>,
}

impl Stop {
    /// Construct a pending stop with no ETA or price.
    #[must_use]
    pub fn new(id: impl Into<String>, cargo: Cargo, pickup: Location, dropoff: Location) -> Self {
        Self {
            id: id.into(),
            cargo,
            order: 0,
            pickup,
            dropoff,
            status: StopStatus::Pending,
            eta_minutes: None,
            price: None,
        }
    }

    /// Set the price while returning `self` for chaining.
    #[must_use]
    pub fn with_price(mut self, price: Option<String>) -> Self {
        self.price = price;
        self
    }

    /// Set the status while returning `self` for chaining.
    #[must_use]
    pub const fn with_status(mut self, status: StopStatus) -> Self {
        self.status = status;
        self
    }

    /// Kind of cargo on this leg.
    #[must_use]
    pub const fn kind(&self) -> CargoKind {
        self.cargo.kind()
    }

    /// Whether the stop still occupies vehicle capacity.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.status, StopStatus::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StopStatus::Pending, Some(StopStatus::PickedUp))]
    #[case(StopStatus::PickedUp, Some(StopStatus::Delivered))]
    #[case(StopStatus::Delivered, None)]
    fn status_advances_in_order(#[case] current: StopStatus, #[case] expected: Option<StopStatus>) {
        assert_eq!(current.next(), expected);
    }
}
