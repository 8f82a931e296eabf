//! Summary figures for a route: length, load, cost and earnings.

use ridepool_core::{Cargo, DistanceProvider, Route};

use crate::eta::total_distance_km;
use crate::units::round_tenth;

/// Rates used to estimate fuel cost and earnings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostModel {
    /// Fuel burned per 100 km, in litres.
    pub litres_per_100km: f64,
    /// Fuel price per litre.
    pub price_per_litre: f64,
    /// Earned per kilometre for each passenger on the route.
    pub earnings_per_passenger_km: f64,
    /// Flat fee per parcel.
    pub earnings_per_parcel: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            litres_per_100km: 7.5,
            price_per_litre: 1.5,
            earnings_per_passenger_km: 0.5,
            earnings_per_parcel: 45.0,
        }
    }
}

/// Figures shown on the route summary card.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStats {
    /// Driven length including gaps between stops, to 0.1 km.
    pub total_distance_km: f64,
    /// Stops carrying a passenger.
    pub passengers: usize,
    /// Stops carrying a parcel.
    pub parcels: usize,
    /// Combined parcel weight, to the nearest kilogram.
    pub total_weight_kg: f64,
    /// Fuel cost for the whole route, to 0.1.
    pub estimated_fuel_cost: f64,
    /// Earnings for the whole route, to 0.1.
    pub estimated_earnings: f64,
    /// Earnings per kilometre relative to `base_distance_km`, as a
    /// percentage change, to 0.1. Zero without a usable base.
    pub efficiency_percent: f64,
    /// Number of stops.
    pub stop_count: usize,
    /// Length of the route this one is compared against.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub base_distance_km: Option<f64>,
}

/// Summarise `route`, optionally against the length of a base route.
///
/// Counts and weight cover every stop regardless of status. Transit legs
/// count as neither passenger nor parcel.
///
/// # Examples
/// ```
/// use ridepool_core::{PlanarDistance, Route, ParcelSize};
/// use ridepool_core::test_support::{parcel_stop, passenger_stop};
/// use ridepool_planner::{CostModel, route_stats};
///
/// let route = Route::new(vec![
///     passenger_stop("p", (0.0, 0.0), (0.0, 100.0)),
///     parcel_stop("q", (0.0, 100.0), (0.0, 200.0), ParcelSize::M, 4.6),
/// ]);
/// let stats = route_stats(&route, None, &CostModel::default(), &PlanarDistance::default());
/// assert_eq!(stats.total_distance_km, 20.0);
/// assert_eq!(stats.estimated_earnings, 55.0);
/// assert_eq!(stats.total_weight_kg, 5.0);
/// ```
#[must_use]
pub fn route_stats<D>(
    route: &Route,
    base_distance_km: Option<f64>,
    costs: &CostModel,
    distance: &D,
) -> RouteStats
where
    D: DistanceProvider + ?Sized,
{
    let passengers = route
        .iter()
        .filter(|stop| matches!(stop.cargo, Cargo::Passenger(_)))
        .count();
    let parcels = route
        .iter()
        .filter(|stop| matches!(stop.cargo, Cargo::Parcel(_)))
        .count();
    let weight_kg: f64 = route
        .iter()
        .map(|stop| stop.cargo.parcel_weight_kg())
        .sum();

    let km = total_distance_km(route, distance);
    let fuel = km / 100.0 * costs.litres_per_100km * costs.price_per_litre;
    let earnings = km * costs.earnings_per_passenger_km * count_as_f64(passengers)
        + costs.earnings_per_parcel * count_as_f64(parcels);

    RouteStats {
        total_distance_km: round_tenth(km),
        passengers,
        parcels,
        total_weight_kg: weight_kg.round(),
        estimated_fuel_cost: round_tenth(fuel),
        estimated_earnings: round_tenth(earnings),
        efficiency_percent: round_tenth(efficiency(earnings, km, base_distance_km)),
        stop_count: route.len(),
        base_distance_km,
    }
}

/// Change in earnings per kilometre against the base route, in percent.
fn efficiency(earnings: f64, km: f64, base_km: Option<f64>) -> f64 {
    match base_km {
        Some(base) if base > 0.0 && km > 0.0 && earnings > 0.0 => {
            ((earnings / km) / (earnings / base) - 1.0) * 100.0
        }
        _ => 0.0,
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "stop counts are far below 2^52"
)]
const fn count_as_f64(count: usize) -> f64 {
    count as f64
}
