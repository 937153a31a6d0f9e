//! Error types for U-LoadPlan.

use crate::geometry::{Axis, CargoId};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result type alias for U-LoadPlan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a set of cargo cannot be placed inside a vehicle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InfeasibleReason {
    /// Total cargo weight exceeds the vehicle's maximum load.
    Overweight {
        /// Total cargo weight in kilograms.
        total: f64,
        /// Vehicle capacity in kilograms.
        max_load: f64,
    },
    /// The item's footprint fits the load bed in neither orientation.
    FootprintTooLarge,
    /// The item is taller than the load bed.
    TooTall,
    /// Neither floor space nor a stacking position remains for the item.
    NoSpace,
}

impl std::fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overweight { total, max_load } => write!(
                f,
                "total weight {:.2} kg exceeds capacity {:.2} kg",
                total, max_load
            ),
            Self::FootprintTooLarge => write!(f, "footprint does not fit the load bed"),
            Self::TooTall => write!(f, "item is taller than the load bed"),
            Self::NoSpace => write!(f, "no floor or stacking space left"),
        }
    }
}

/// Errors that can occur during load planning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No cargo supplied, so the center of gravity is undefined.
    #[error("No cargo supplied")]
    EmptyInput,

    /// Cargo cannot be fitted within the vehicle's capacity or space.
    #[error("Cargo '{cargo_id}' cannot be placed: {reason}")]
    Infeasible {
        /// The offending cargo item.
        cargo_id: CargoId,
        /// Why placement failed.
        reason: InfeasibleReason,
    },

    /// Two placements intersect.
    #[error("Placements of cargo '{first}' and '{second}' overlap")]
    Overlap {
        /// First cargo in placement order.
        first: CargoId,
        /// Second cargo in placement order.
        second: CargoId,
    },

    /// A placement extends beyond the load bed.
    #[error("Placement of cargo '{cargo_id}' exceeds the vehicle bounds along {axis}")]
    OutOfBounds {
        /// The offending cargo item.
        cargo_id: CargoId,
        /// First violated axis.
        axis: Axis,
    },

    /// Invalid vehicle specification.
    #[error("Invalid vehicle: {0}")]
    InvalidVehicle(String),

    /// Invalid cargo item.
    #[error("Invalid cargo: {0}")]
    InvalidCargo(String),

    /// Invalid bounding box or rotation.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A placement does not describe its cargo item.
    #[error("Invalid placement for cargo '{cargo_id}': {reason}")]
    InvalidPlacement {
        /// The offending cargo item.
        cargo_id: CargoId,
        /// Description of the mismatch.
        reason: String,
    },

    /// A placement references a cargo id that was not supplied.
    #[error("Unknown cargo '{0}'")]
    UnknownCargo(CargoId),

    /// Two cargo items share the same id.
    #[error("Duplicate cargo id '{0}'")]
    DuplicateCargo(CargoId),

    /// A cargo item has more than one placement.
    #[error("Cargo '{0}' is placed more than once")]
    DuplicatePlacement(CargoId),

    /// A cargo item has no placement.
    #[error("Cargo '{0}' has no placement")]
    MissingPlacement(CargoId),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
