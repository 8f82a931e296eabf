//! What a stop or request carries: a passenger, a parcel, or nothing.

use std::fmt;

/// Kind of cargo moved along a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CargoKind {
    /// A person occupying a seat.
    Passenger,
    /// A package occupying load capacity.
    Parcel,
}

/// Parcel size classes a vehicle may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParcelSize {
    /// Small.
    S,
    /// Medium.
    M,
    /// Large.
    L,
    /// Extra large.
    #[cfg_attr(feature = "serde", serde(rename = "XL"))]
    Xl,
}

impl fmt::Display for ParcelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
        };
        f.write_str(label)
    }
}

/// Contact details for a passenger.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerInfo {
    /// Display name.
    pub name: String,
    /// Phone number; empty when the request did not include one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub phone: String,
    /// Rating in `0.0..=5.0`.
    pub rating: f32,
}

/// Physical description of a parcel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParcelInfo {
    /// Size class.
    pub size: ParcelSize,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Free-form description from the sender.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,
}

/// Cargo kind plus its optional descriptor.
///
/// A passenger or parcel without a descriptor still occupies capacity; only
/// [`Cargo::Transit`] legs carry nothing.
///
/// # Examples
/// ```
/// use ridepool_core::{Cargo, CargoKind, ParcelInfo, ParcelSize};
///
/// let parcel = Cargo::Parcel(Some(ParcelInfo {
///     size: ParcelSize::M,
///     weight_kg: 4.5,
///     description: None,
/// }));
/// assert_eq!(parcel.kind(), CargoKind::Parcel);
/// assert_eq!(parcel.parcel_weight_kg(), 4.5);
/// assert_eq!(Cargo::transit().kind(), CargoKind::Passenger);
/// assert!(!Cargo::Passenger(None).is_transit());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", content = "details", rename_all = "snake_case")
)]
pub enum Cargo {
    /// A passenger, with contact details when known.
    Passenger(Option<PassengerInfo>),
    /// A parcel, with its description when known.
    Parcel(Option<ParcelInfo>),
    /// An empty leg between two places, such as origin to first pickup.
    Transit,
}

impl Cargo {
    /// Cargo for a leg that moves nobody and nothing.
    #[must_use]
    pub const fn transit() -> Self {
        Self::Transit
    }

    /// Whether this is a transit leg moving nobody.
    #[must_use]
    pub const fn is_transit(&self) -> bool {
        matches!(self, Self::Transit)
    }

    /// Kind of this cargo. Transit legs display as passenger legs.
    #[must_use]
    pub const fn kind(&self) -> CargoKind {
        match self {
            Self::Passenger(_) | Self::Transit => CargoKind::Passenger,
            Self::Parcel(_) => CargoKind::Parcel,
        }
    }

    /// Parcel weight, or zero for passengers and undescribed parcels.
    #[must_use]
    pub fn parcel_weight_kg(&self) -> f64 {
        match self {
            Self::Parcel(Some(info)) => info.weight_kg,
            Self::Parcel(None) | Self::Passenger(_) | Self::Transit => 0.0,
        }
    }

    /// Parcel descriptor, if any.
    #[must_use]
    pub const fn parcel(&self) -> Option<&ParcelInfo> {
        match self {
            Self::Parcel(info) => info.as_ref(),
            Self::Passenger(_) | Self::Transit => None,
        }
    }

    /// Passenger descriptor, if any.
    #[must_use]
    pub const fn passenger(&self) -> Option<&PassengerInfo> {
        match self {
            Self::Passenger(info) => info.as_ref(),
            Self::Parcel(_) | Self::Transit => None,
        }
    }
}
