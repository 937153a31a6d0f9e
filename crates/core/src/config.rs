//! Scoring, safety and search configuration.
//!
//! Every threshold used by the stability scorer and the safety analyzer is a
//! configuration value rather than a constant, so the same load can be
//! evaluated under different calibrations.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of the stability score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringConfig {
    /// Weight of the lateral (y) deviation ratio.
    pub lateral_weight: f64,

    /// Weight of the longitudinal (x) deviation ratio.
    pub longitudinal_weight: f64,

    /// Weight of the vertical (z) deviation ratio.
    pub vertical_weight: f64,

    /// Ideal COG height as a fraction of the load bed height.
    pub ideal_height_ratio: f64,

    /// Minimum score classified as safe.
    pub safe_threshold: u8,

    /// Minimum score classified as warning; anything lower is critical.
    pub warning_threshold: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            lateral_weight: 0.5,
            longitudinal_weight: 0.3,
            vertical_weight: 0.2,
            ideal_height_ratio: 0.4,
            safe_threshold: 70,
            warning_threshold: 50,
        }
    }
}

impl ScoringConfig {
    /// Sets the axis weights (lateral, longitudinal, vertical).
    pub fn with_weights(mut self, lateral: f64, longitudinal: f64, vertical: f64) -> Self {
        self.lateral_weight = lateral;
        self.longitudinal_weight = longitudinal;
        self.vertical_weight = vertical;
        self
    }

    /// Sets the ideal COG height ratio.
    pub fn with_ideal_height_ratio(mut self, ratio: f64) -> Self {
        self.ideal_height_ratio = ratio;
        self
    }

    /// Sets the classification thresholds.
    pub fn with_thresholds(mut self, safe: u8, warning: u8) -> Self {
        self.safe_threshold = safe;
        self.warning_threshold = warning;
        self
    }

    /// Validates the scoring parameters.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            self.lateral_weight,
            self.longitudinal_weight,
            self.vertical_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::ConfigError("Scoring weights must be non-negative".into()));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(Error::ConfigError("At least one scoring weight must be positive".into()));
        }
        check_ratio("ideal_height_ratio", self.ideal_height_ratio)?;
        if self.safe_threshold > 100 || self.warning_threshold > self.safe_threshold {
            return Err(Error::ConfigError(format!(
                "Thresholds must satisfy warning ({}) <= safe ({}) <= 100",
                self.warning_threshold, self.safe_threshold
            )));
        }
        Ok(())
    }
}

/// Thresholds of the rule-based safety checks.
///
/// Balance bands are fractions of the matching vehicle dimension; load
/// ratios are fractions of the vehicle's maximum load.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SafetyConfig {
    /// Lateral offset (fraction of width) that raises a warning.
    pub lateral_warning_ratio: f64,

    /// Lateral offset (fraction of width) that raises a critical warning.
    pub lateral_critical_ratio: f64,

    /// Longitudinal offset (fraction of length) that raises a warning.
    pub longitudinal_warning_ratio: f64,

    /// Longitudinal offset (fraction of length) that raises a critical warning.
    pub longitudinal_critical_ratio: f64,

    /// COG height (fraction of load bed height) above which the load is top-heavy.
    pub vertical_height_ratio: f64,

    /// Load ratio above which a top-heavy load is flagged.
    pub vertical_load_ratio: f64,

    /// Load ratio above which a near-capacity warning is raised.
    pub near_capacity_ratio: f64,

    /// Minimum supported fraction of the base of a raised item.
    pub min_support_ratio: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            lateral_warning_ratio: 0.15,
            lateral_critical_ratio: 0.25,
            longitudinal_warning_ratio: 0.20,
            longitudinal_critical_ratio: 0.35,
            vertical_height_ratio: 0.5,
            vertical_load_ratio: 0.5,
            near_capacity_ratio: 0.9,
            min_support_ratio: 0.75,
        }
    }
}

impl SafetyConfig {
    /// Sets the lateral warning and critical bands.
    pub fn with_lateral_bands(mut self, warning: f64, critical: f64) -> Self {
        self.lateral_warning_ratio = warning;
        self.lateral_critical_ratio = critical;
        self
    }

    /// Sets the longitudinal warning and critical bands.
    pub fn with_longitudinal_bands(mut self, warning: f64, critical: f64) -> Self {
        self.longitudinal_warning_ratio = warning;
        self.longitudinal_critical_ratio = critical;
        self
    }

    /// Sets the vertical instability trigger (height ratio, load ratio).
    pub fn with_vertical_limits(mut self, height_ratio: f64, load_ratio: f64) -> Self {
        self.vertical_height_ratio = height_ratio;
        self.vertical_load_ratio = load_ratio;
        self
    }

    /// Sets the near-capacity ratio.
    pub fn with_near_capacity_ratio(mut self, ratio: f64) -> Self {
        self.near_capacity_ratio = ratio;
        self
    }

    /// Sets the minimum support ratio.
    pub fn with_min_support_ratio(mut self, ratio: f64) -> Self {
        self.min_support_ratio = ratio;
        self
    }

    /// Validates the safety thresholds.
    pub fn validate(&self) -> Result<()> {
        check_band(
            "lateral",
            self.lateral_warning_ratio,
            self.lateral_critical_ratio,
        )?;
        check_band(
            "longitudinal",
            self.longitudinal_warning_ratio,
            self.longitudinal_critical_ratio,
        )?;
        check_ratio("vertical_height_ratio", self.vertical_height_ratio)?;
        check_ratio("vertical_load_ratio", self.vertical_load_ratio)?;
        check_ratio("near_capacity_ratio", self.near_capacity_ratio)?;
        check_ratio("min_support_ratio", self.min_support_ratio)?;
        Ok(())
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Stability score parameters.
    pub scoring: ScoringConfig,

    /// Safety check thresholds.
    pub safety: SafetyConfig,

    /// Whether the placement search may stack cargo once the floor is full.
    pub allow_stacking: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            safety: SafetyConfig::default(),
            allow_stacking: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scoring parameters.
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Sets the safety thresholds.
    pub fn with_safety(mut self, safety: SafetyConfig) -> Self {
        self.safety = safety;
        self
    }

    /// Enables or disables stacking.
    pub fn with_stacking(mut self, enabled: bool) -> Self {
        self.allow_stacking = enabled;
        self
    }

    /// Validates all parameters.
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.safety.validate()
    }
}

fn check_ratio(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::ConfigError(format!(
            "{} must be in (0, 1], got {}",
            name, value
        )))
    }
}

fn check_band(name: &str, warning: f64, critical: f64) -> Result<()> {
    check_ratio(name, warning)?;
    check_ratio(name, critical)?;
    if warning > critical {
        return Err(Error::ConfigError(format!(
            "{} warning band ({}) must not exceed critical band ({})",
            name, warning, critical
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.allow_stacking);
        assert_eq!(config.scoring.safe_threshold, 70);
        assert_eq!(config.scoring.warning_threshold, 50);
    }

    #[test]
    fn test_builder() {
        let config = Config::new()
            .with_scoring(ScoringConfig::default().with_weights(1.0, 0.0, 0.0))
            .with_safety(SafetyConfig::default().with_lateral_bands(0.1, 0.2))
            .with_stacking(false);

        assert_eq!(config.scoring.lateral_weight, 1.0);
        assert_eq!(config.safety.lateral_critical_ratio, 0.2);
        assert!(!config.allow_stacking);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_scoring() {
        let negative = ScoringConfig::default().with_weights(-0.5, 0.3, 0.2);
        assert!(negative.validate().is_err());

        let all_zero = ScoringConfig::default().with_weights(0.0, 0.0, 0.0);
        assert!(all_zero.validate().is_err());

        let inverted = ScoringConfig::default().with_thresholds(40, 60);
        assert!(inverted.validate().is_err());

        let no_height = ScoringConfig::default().with_ideal_height_ratio(0.0);
        assert!(no_height.validate().is_err());
    }

    #[test]
    fn test_invalid_safety() {
        let inverted = SafetyConfig::default().with_lateral_bands(0.3, 0.2);
        assert!(matches!(inverted.validate(), Err(Error::ConfigError(_))));

        let out_of_range = SafetyConfig::default().with_near_capacity_ratio(1.5);
        assert!(out_of_range.validate().is_err());

        let config = Config::new().with_safety(SafetyConfig::default().with_min_support_ratio(0.0));
        assert!(config.validate().is_err());
    }
}
