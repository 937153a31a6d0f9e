//! Load plan result representation.

use crate::placement::Placement;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Severity of a safety warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Severity {
    /// Should be reviewed before departure.
    Warning,
    /// Must be fixed before departure.
    Critical,
}

/// Category of a safety warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum WarningKind {
    /// Total weight exceeds the vehicle's maximum load.
    Overweight,
    /// Total weight is close to the vehicle's maximum load.
    NearCapacity,
    /// Center of gravity is shifted sideways.
    LateralImbalance,
    /// Center of gravity is shifted forward or backward.
    LongitudinalImbalance,
    /// Center of gravity is high under a heavy load.
    VerticalInstability,
    /// A cargo item does not rest on enough supporting surface.
    UnsupportedCargo,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Overweight => "OVERWEIGHT",
            Self::NearCapacity => "NEAR_CAPACITY",
            Self::LateralImbalance => "LATERAL_IMBALANCE",
            Self::LongitudinalImbalance => "LONGITUDINAL_IMBALANCE",
            Self::VerticalInstability => "VERTICAL_INSTABILITY",
            Self::UnsupportedCargo => "UNSUPPORTED_CARGO",
        };
        write!(f, "{}", name)
    }
}

/// A structured safety warning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Warning {
    /// Warning category.
    pub kind: WarningKind,
    /// Severity.
    pub severity: Severity,
    /// Description of the finding.
    pub message: String,
    /// Numeric deviation that triggered the warning, in the unit of the check.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub deviation: Option<f64>,
}

impl Warning {
    /// Creates a new warning.
    pub fn new(kind: WarningKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            deviation: None,
        }
    }

    /// Sets the triggering deviation.
    pub fn with_deviation(mut self, deviation: f64) -> Self {
        self.deviation = Some(deviation);
        self
    }

    /// Returns true if this warning is critical.
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

/// Classification of a stability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum StabilityClass {
    /// Score at or above the safe threshold.
    Safe,
    /// Score between the warning and safe thresholds.
    Warning,
    /// Score below the warning threshold.
    Critical,
}

impl StabilityClass {
    /// Classifies a score against the given thresholds.
    pub fn from_score(score: u8, safe_threshold: u8, warning_threshold: u8) -> Self {
        if score >= safe_threshold {
            Self::Safe
        } else if score >= warning_threshold {
            Self::Warning
        } else {
            Self::Critical
        }
    }
}

impl std::fmt::Display for StabilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Moments of the load about the vehicle's geometric center.
///
/// These are weight times lever-arm proxies (kg x m), not physical torques.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TorqueAnalysis {
    /// Moment from the lateral COG offset (tipping sideways).
    pub roll: f64,
    /// Moment from the longitudinal COG offset (nose/tail heavy).
    pub pitch: f64,
    /// Moment from the full horizontal COG offset.
    pub horizontal: f64,
}

/// Result of a generate or analyze call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadPlanResult {
    /// Placements in loading order.
    pub placements: Vec<Placement>,

    /// Stability score (0-100, higher is safer).
    pub stability_score: u8,

    /// Classification of the stability score.
    pub stability_class: StabilityClass,

    /// Center of gravity of all cargo.
    pub center_of_gravity: Vector3<f64>,

    /// Total cargo weight in kilograms.
    pub total_weight: f64,

    /// Total weight divided by the vehicle's maximum load.
    pub load_ratio: f64,

    /// Moments about the vehicle center.
    pub torque: TorqueAnalysis,

    /// Safety warnings in check order.
    pub warnings: Vec<Warning>,

    /// True if the score is in the safe band and no warning is critical.
    pub is_safe: bool,
}

impl LoadPlanResult {
    /// Returns the number of placed cargo items.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns true if any warning is critical.
    pub fn has_critical(&self) -> bool {
        self.warnings.iter().any(Warning::is_critical)
    }

    /// Returns the warnings of the given kind.
    pub fn warnings_of(&self, kind: WarningKind) -> Vec<&Warning> {
        self.warnings.iter().filter(|w| w.kind == kind).collect()
    }

    /// Returns the placement of a cargo item.
    pub fn placement_of(&self, cargo_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.cargo_id == cargo_id)
    }

    /// Returns the load ratio as a percentage string.
    pub fn load_percent(&self) -> String {
        format!("{:.1}%", self.load_ratio * 100.0)
    }

    /// Computes a condensed summary.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary::from(self)
    }
}

/// Summary of a load plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanSummary {
    /// Number of placed cargo items.
    pub cargo_count: usize,
    /// Total weight in kilograms.
    pub total_weight: f64,
    /// Load percentage of the vehicle's capacity.
    pub load_percent: f64,
    /// Stability score.
    pub stability_score: u8,
    /// Stability class.
    pub stability_class: StabilityClass,
    /// Number of warnings.
    pub warning_count: usize,
    /// Number of critical warnings.
    pub critical_count: usize,
    /// Safety flag.
    pub is_safe: bool,
}

impl From<&LoadPlanResult> for PlanSummary {
    fn from(result: &LoadPlanResult) -> Self {
        Self {
            cargo_count: result.placements.len(),
            total_weight: result.total_weight,
            load_percent: result.load_ratio * 100.0,
            stability_score: result.stability_score,
            stability_class: result.stability_class,
            warning_count: result.warnings.len(),
            critical_count: result.warnings.iter().filter(|w| w.is_critical()).count(),
            is_safe: result.is_safe,
        }
    }
}
