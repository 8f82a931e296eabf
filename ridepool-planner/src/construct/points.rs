//! Construction-time route points and the precedence check over them.

use std::collections::HashSet;

use ridepool_core::{DistanceProvider, Location, PendingEntry};
use thiserror::Error;

/// One place the driver must visit while a route is being built.
///
/// Pickups and drop-offs borrow the entry they belong to, so the owning id,
/// cargo and price travel with the point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoutePoint<'a> {
    /// Where the driver sets off.
    Origin(&'a Location),
    /// Where the driver finishes.
    Destination(&'a Location),
    /// Collection half of a pending entry.
    Pickup(&'a PendingEntry),
    /// Delivery half of a pending entry.
    Dropoff(&'a PendingEntry),
}

impl<'a> RoutePoint<'a> {
    /// Location of this point.
    #[must_use]
    pub const fn location(&self) -> &'a Location {
        match *self {
            Self::Origin(location) | Self::Destination(location) => location,
            Self::Pickup(entry) => &entry.pickup,
            Self::Dropoff(entry) => &entry.dropoff,
        }
    }

    /// Entry this point belongs to, if any.
    #[must_use]
    pub const fn entry(&self) -> Option<&'a PendingEntry> {
        match *self {
            Self::Pickup(entry) | Self::Dropoff(entry) => Some(entry),
            Self::Origin(_) | Self::Destination(_) => None,
        }
    }
}

/// Why a point sequence is not a feasible route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointSequenceError {
    /// The sequence had no points.
    #[error("point sequence is empty")]
    Empty,
    /// The first point was not the origin.
    #[error("route must start at the origin")]
    OriginNotFirst,
    /// The last point was not the destination.
    #[error("route must end at the destination")]
    DestinationNotLast,
    /// An entry's drop-off came before its pickup.
    #[error("entry {entry:?} is dropped off before it is picked up")]
    DropoffBeforePickup {
        /// Identifier of the offending entry.
        entry: String,
    },
}

/// Flatten a construction into `[origin, pickup₁, dropoff₁, …, destination]`.
#[must_use]
pub fn flatten<'a>(
    origin: &'a Location,
    destination: &'a Location,
    entries: &'a [PendingEntry],
) -> Vec<RoutePoint<'a>> {
    let mut points = Vec::with_capacity(entries.len() * 2 + 2);
    points.push(RoutePoint::Origin(origin));
    for entry in entries {
        points.push(RoutePoint::Pickup(entry));
        points.push(RoutePoint::Dropoff(entry));
    }
    points.push(RoutePoint::Destination(destination));
    points
}

/// Check that `points` starts at the origin, ends at the destination, and
/// picks every entry up before dropping it off.
///
/// # Examples
/// ```
/// use ridepool_core::test_support::{entry, point};
/// use ridepool_planner::{PointSequenceError, RoutePoint};
/// use ridepool_planner::construct::validate_point_sequence;
///
/// let origin = point(0.0, 0.0);
/// let destination = point(10.0, 0.0);
/// let rider = entry("r1", point(2.0, 0.0), point(6.0, 0.0));
///
/// let ok = [
///     RoutePoint::Origin(&origin),
///     RoutePoint::Pickup(&rider),
///     RoutePoint::Dropoff(&rider),
///     RoutePoint::Destination(&destination),
/// ];
/// assert!(validate_point_sequence(&ok).is_ok());
///
/// let swapped = [ok[0], ok[2], ok[1], ok[3]];
/// assert_eq!(
///     validate_point_sequence(&swapped),
///     Err(PointSequenceError::DropoffBeforePickup { entry: "r1".to_owned() })
/// );
/// ```
pub fn validate_point_sequence(points: &[RoutePoint<'_>]) -> Result<(), PointSequenceError> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(PointSequenceError::Empty);
    };
    if !matches!(first, RoutePoint::Origin(_)) {
        return Err(PointSequenceError::OriginNotFirst);
    }
    if !matches!(last, RoutePoint::Destination(_)) {
        return Err(PointSequenceError::DestinationNotLast);
    }
    let mut picked: HashSet<&str> = HashSet::new();
    for point in points {
        match point {
            RoutePoint::Pickup(entry) => {
                picked.insert(entry.id.as_str());
            }
            RoutePoint::Dropoff(entry) if !picked.contains(entry.id.as_str()) => {
                return Err(PointSequenceError::DropoffBeforePickup {
                    entry: entry.id.clone(),
                });
            }
            RoutePoint::Dropoff(_) | RoutePoint::Origin(_) | RoutePoint::Destination(_) => {}
        }
    }
    Ok(())
}

/// Sum of straight hops between consecutive points, in kilometres.
#[must_use]
pub fn sequence_distance_km<D>(points: &[RoutePoint<'_>], distance: &D) -> f64
where
    D: DistanceProvider + ?Sized,
{
    points
        .windows(2)
        .map(|pair| match pair {
            [from, to] => distance.distance_km(from.location(), to.location()),
            _ => 0.0,
        })
        .sum()
}
