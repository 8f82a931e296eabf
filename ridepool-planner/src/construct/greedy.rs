//! Nearest-neighbour seeding.

use std::collections::HashSet;

use ridepool_core::DistanceProvider;

use super::points::RoutePoint;

/// Visit the nearest eligible point until only the destination remains.
///
/// A drop-off becomes eligible once its pickup has been visited. Ties go to
/// the point listed first. `points` must be a flattened construction: origin
/// first, destination last.
pub(crate) fn nearest_neighbour<'a, D>(points: &[RoutePoint<'a>], distance: &D) -> Vec<RoutePoint<'a>>
where
    D: DistanceProvider + ?Sized,
{
    let (Some(&origin), Some(&destination)) = (points.first(), points.last()) else {
        return points.to_vec();
    };
    let stops: Vec<(usize, RoutePoint<'a>)> = points
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, point)| point.entry().is_some())
        .collect();

    let mut route = Vec::with_capacity(points.len());
    route.push(origin);
    let mut visited: HashSet<usize> = HashSet::with_capacity(stops.len());
    let mut picked: HashSet<&str> = HashSet::with_capacity(stops.len() / 2);
    let mut current = origin;

    while visited.len() < stops.len() {
        let mut best: Option<(usize, RoutePoint<'a>, f64)> = None;
        for &(index, candidate) in &stops {
            if visited.contains(&index) {
                continue;
            }
            if let RoutePoint::Dropoff(entry) = candidate
                && !picked.contains(entry.id.as_str())
            {
                continue;
            }
            let hop = distance.distance_km(current.location(), candidate.location());
            if best.is_none_or(|(_, _, shortest)| hop < shortest) {
                best = Some((index, candidate, hop));
            }
        }
        let Some((index, next, _)) = best else {
            log::warn!(
                "no eligible point left after {} of {} visits; closing route early",
                visited.len(),
                stops.len()
            );
            break;
        };
        if let RoutePoint::Pickup(entry) = next {
            picked.insert(entry.id.as_str());
        }
        visited.insert(index);
        route.push(next);
        current = next;
    }

    route.push(destination);
    route
}
