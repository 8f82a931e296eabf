//! Turn a visiting order into committed stops.

use ridepool_core::{Cargo, Location, PendingEntry, Stop};

use super::points::RoutePoint;

fn entry_stop(entry: &PendingEntry) -> Stop {
    Stop::new(
        format!("stop-{}", entry.id),
        entry.cargo.clone(),
        entry.pickup.clone(),
        entry.dropoff.clone(),
    )
    .with_price(entry.price.clone())
}

/// Single leg straight from origin to destination.
pub(crate) fn direct(origin: &Location, destination: &Location) -> Vec<Stop> {
    vec![Stop::new(
        "direct",
        Cargo::transit(),
        origin.clone(),
        destination.clone(),
    )]
}

/// Walk consecutive points of `sequence` and emit the committed stops.
///
/// - Reaching an entry's drop-off emits that entry's payload stop, running
///   from its own pickup to its own drop-off.
/// - A gap that starts at the origin or a drop-off and ends at a pickup or
///   the destination becomes a transit stop, unless both ends share an
///   address.
/// - Hops between two pickups emit nothing; the payload stops cover them.
pub(crate) fn sequence_to_stops(sequence: &[RoutePoint<'_>]) -> Vec<Stop> {
    let mut stops = Vec::with_capacity(sequence.len());
    for (index, hop) in sequence.windows(2).enumerate() {
        let [from, to] = hop else { continue };
        match (*from, *to) {
            (_, RoutePoint::Dropoff(entry)) => stops.push(entry_stop(entry)),
            (
                RoutePoint::Origin(_) | RoutePoint::Dropoff(_) | RoutePoint::Destination(_),
                RoutePoint::Origin(_) | RoutePoint::Pickup(_) | RoutePoint::Destination(_),
            ) => {
                if from.location().same_address(to.location()) {
                    log::trace!(
                        "skipping same-address gap {index} at {:?}",
                        from.location().address
                    );
                } else {
                    stops.push(Stop::new(
                        format!("leg-{index}"),
                        Cargo::transit(),
                        from.location().clone(),
                        to.location().clone(),
                    ));
                }
            }
            (RoutePoint::Pickup(_), _) => {}
        }
    }
    stops
}
