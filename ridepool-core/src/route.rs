//! Ordered sequences of committed stops.
//!
//! A [`Route`] owns its stops and keeps `stops[i].order == i` for every
//! index. Every way of building one renumbers, so callers never see a stale
//! order.

use crate::Stop;

/// An ordered path through committed stops.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ridepool_core::{Cargo, Location, Route, Stop};
///
/// let leg = |id: &str| {
///     Stop::new(
///         id,
///         Cargo::transit(),
///         Location::new("A", Coord { x: 0.0, y: 0.0 }),
///         Location::new("B", Coord { x: 1.0, y: 0.0 }),
///     )
/// };
/// let route = Route::new(vec![leg("x"), leg("y")]);
///
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.stops()[1].order, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Stop>", into = "Vec<Stop>")
)]
pub struct Route {
    stops: Vec<Stop>,
}

impl Route {
    /// Construct a route, renumbering `order` to match positions.
    #[must_use]
    pub fn new(mut stops: Vec<Stop>) -> Self {
        for (index, stop) in stops.iter_mut().enumerate() {
            stop.order = index;
        }
        Self { stops }
    }

    /// Construct an empty route.
    ///
    /// # Examples
    /// ```
    /// use ridepool_core::Route;
    ///
    /// assert!(Route::empty().is_empty());
    /// ```
    #[must_use]
    pub const fn empty() -> Self {
        Self { stops: Vec::new() }
    }

    /// Stops in route order.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Consume the route, returning its stops.
    #[must_use]
    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the route has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// First stop, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Stop> {
        self.stops.first()
    }

    /// Last stop, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Stop> {
        self.stops.last()
    }

    /// Stop at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Stop> {
        self.stops.get(index)
    }

    /// Index of the stop with `id`, if present.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.stops.iter().position(|stop| stop.id == id)
    }

    /// Iterate over stops in route order.
    pub fn iter(&self) -> std::slice::Iter<'_, Stop> {
        self.stops.iter()
    }
}

impl From<Vec<Stop>> for Route {
    fn from(stops: Vec<Stop>) -> Self {
        Self::new(stops)
    }
}

impl From<Route> for Vec<Stop> {
    fn from(route: Route) -> Self {
        route.stops
    }
}

impl FromIterator<Stop> for Route {
    fn from_iter<I: IntoIterator<Item = Stop>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Stop;
    type IntoIter = std::slice::Iter<'a, Stop>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}
