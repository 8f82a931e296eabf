//! Build a route in the order entries were listed, without optimising.

use ridepool_core::{Cargo, Location, PendingEntry, Stop};

/// Visit origin, each entry's pickup then drop-off as listed, then the
/// destination, emitting one stop per hop between different addresses.
///
/// Each stop carries the entry at its start, or failing that the entry at
/// its end.
pub(crate) fn listed_order(
    origin: &Location,
    destination: &Location,
    entries: &[PendingEntry],
) -> Vec<Stop> {
    let mut waypoints: Vec<(&Location, Option<&PendingEntry>)> =
        Vec::with_capacity(entries.len() * 2 + 2);
    waypoints.push((origin, None));
    for entry in entries {
        waypoints.push((&entry.pickup, Some(entry)));
        waypoints.push((&entry.dropoff, Some(entry)));
    }
    waypoints.push((destination, None));

    let mut stops: Vec<Stop> = Vec::with_capacity(waypoints.len());
    for hop in waypoints.windows(2) {
        let [(from, from_entry), (to, to_entry)] = hop else {
            continue;
        };
        if from.same_address(to) {
            continue;
        }
        let carried = (*from_entry).or(*to_entry);
        let cargo = carried.map_or_else(Cargo::transit, |entry| entry.cargo.clone());
        let price = carried.and_then(|entry| entry.price.clone());
        stops.push(
            Stop::new(
                format!("stop-{}", stops.len()),
                cargo,
                (*from).clone(),
                (*to).clone(),
            )
            .with_price(price),
        );
    }
    stops
}
