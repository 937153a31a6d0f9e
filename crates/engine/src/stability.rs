//! Stability scoring from the center of gravity.
//!
//! The score measures how far the center of gravity sits from an ideal point:
//! centered on the floor plan and low in the load bed. Each axis deviation is
//! normalized by a characteristic length of the vehicle:
//!
//! | Axis | Ideal | Normalized by |
//! |------|-------|---------------|
//! | lateral (y) | `width / 2` | `width / 2` |
//! | longitudinal (x) | `length / 2` | `length / 2` |
//! | vertical (z) | `height * ideal_height_ratio` | the ideal height |
//!
//! The three ratios are combined with the configured weights into a weighted
//! deviation `d`, and the score is `round(clamp(100 * (1 - d), 0, 100))`.
//! Lateral deviation carries the largest default weight because sideways
//! tipping is the dominant rollover mode of road vehicles.
//!
//! # Example
//!
//! ```
//! use u_loadplan_core::{ScoringConfig, StabilityClass, Vector3, VehicleSpec};
//! use u_loadplan_engine::stability::StabilityScorer;
//!
//! let vehicle = VehicleSpec::new(6.0, 2.4, 2.6, 5000.0).unwrap();
//! let scorer = StabilityScorer::new(ScoringConfig::default());
//!
//! let ideal = scorer.ideal_center(&vehicle);
//! assert_eq!(scorer.score(&ideal, &vehicle), 100);
//! assert_eq!(scorer.classify(100), StabilityClass::Safe);
//! ```

use crate::physics;
use u_loadplan_core::{ScoringConfig, StabilityClass, Vector3, VehicleSpec};

/// Normalized per-axis deviation of a center of gravity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviationBreakdown {
    /// Lateral offset divided by half the width.
    pub lateral: f64,
    /// Longitudinal offset divided by half the length.
    pub longitudinal: f64,
    /// Vertical offset divided by the ideal height.
    pub vertical: f64,
    /// Weighted combination of the three ratios.
    pub weighted: f64,
}

/// Full stability evaluation of a center of gravity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityAssessment {
    /// Deviation ratios.
    pub deviation: DeviationBreakdown,
    /// Unrounded score, clamped to `[0, 100]`.
    pub raw_score: f64,
    /// Rounded score.
    pub score: u8,
    /// Score classification.
    pub class: StabilityClass,
    /// Torque proxy about the vehicle center.
    pub torque: f64,
}

/// Stability scorer.
#[derive(Debug, Clone, Default)]
pub struct StabilityScorer {
    config: ScoringConfig,
}

impl StabilityScorer {
    /// Creates a scorer with the given parameters.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Returns the scoring parameters.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Returns the ideal center of gravity for a vehicle.
    pub fn ideal_center(&self, vehicle: &VehicleSpec) -> Vector3<f64> {
        Vector3::new(
            vehicle.length() / 2.0,
            vehicle.width() / 2.0,
            vehicle.height() * self.config.ideal_height_ratio,
        )
    }

    /// Computes the normalized deviation of `cog` from the ideal center.
    pub fn deviation(&self, cog: &Vector3<f64>, vehicle: &VehicleSpec) -> DeviationBreakdown {
        let ideal = self.ideal_center(vehicle);

        let lateral = (cog.y - ideal.y).abs() / ideal.y;
        let longitudinal = (cog.x - ideal.x).abs() / ideal.x;
        let vertical = (cog.z - ideal.z).abs() / ideal.z;

        let weighted = lateral * self.config.lateral_weight
            + longitudinal * self.config.longitudinal_weight
            + vertical * self.config.vertical_weight;

        DeviationBreakdown {
            lateral,
            longitudinal,
            vertical,
            weighted,
        }
    }

    /// Converts a weighted deviation ratio into an unrounded score.
    pub fn raw_score(&self, weighted_deviation: f64) -> f64 {
        (100.0 * (1.0 - weighted_deviation)).clamp(0.0, 100.0)
    }

    /// Scores a center of gravity (0-100).
    pub fn score(&self, cog: &Vector3<f64>, vehicle: &VehicleSpec) -> u8 {
        let deviation = self.deviation(cog, vehicle);
        self.raw_score(deviation.weighted).round() as u8
    }

    /// Classifies a score.
    pub fn classify(&self, score: u8) -> StabilityClass {
        StabilityClass::from_score(
            score,
            self.config.safe_threshold,
            self.config.warning_threshold,
        )
    }

    /// Evaluates a center of gravity for a load of `total_weight`.
    pub fn assess(
        &self,
        cog: &Vector3<f64>,
        vehicle: &VehicleSpec,
        total_weight: f64,
    ) -> StabilityAssessment {
        let deviation = self.deviation(cog, vehicle);
        let raw_score = self.raw_score(deviation.weighted);
        let score = raw_score.round() as u8;

        StabilityAssessment {
            deviation,
            raw_score,
            score,
            class: self.classify(score),
            torque: physics::torque(cog, &vehicle.center(), total_weight),
        }
    }
}

/// Scores a center of gravity with the given parameters.
pub fn score(cog: &Vector3<f64>, vehicle: &VehicleSpec, config: &ScoringConfig) -> u8 {
    StabilityScorer::new(config.clone()).score(cog, vehicle)
}
