//! Rule-based safety analysis of a load.
//!
//! The analyzer is independent of the stability score: each rule compares
//! the load against a threshold from [`SafetyConfig`] and produces at most
//! one [`Warning`] (the support rule produces one per unsupported item).
//!
//! Rules run in a fixed order and never short-circuit:
//!
//! 1. **Capacity**: overweight (critical) or near capacity (warning)
//! 2. **Lateral balance**: sideways COG offset, warning and critical bands
//! 3. **Longitudinal balance**: fore/aft COG offset, wider bands
//! 4. **Vertical instability**: high COG combined with a heavy load
//! 5. **Support**: raised items must rest on enough cargo below them

use crate::physics;
use u_loadplan_core::{
    CargoItem, Placement, Result, SafetyConfig, Severity, Vector3, VehicleSpec, Warning,
    WarningKind, EPSILON,
};

/// Tolerance for considering two faces in contact.
const CONTACT_TOLERANCE: f64 = 1e-6;

/// Safety analyzer.
#[derive(Debug, Clone, Default)]
pub struct SafetyAnalyzer {
    config: SafetyConfig,
}

impl SafetyAnalyzer {
    /// Creates an analyzer with the given thresholds.
    pub fn new(config: SafetyConfig) -> Self {
        Self { config }
    }

    /// Returns the thresholds.
    pub fn config(&self) -> &SafetyConfig {
        &self.config
    }

    /// Runs every rule over a set of placements.
    pub fn analyze(
        &self,
        vehicle: &VehicleSpec,
        cargo: &[CargoItem],
        placements: &[Placement],
    ) -> Result<Vec<Warning>> {
        let index = physics::index_cargo(cargo)?;
        let cog = physics::centroid_of(placements, &index)?;
        let total_weight = physics::total_weight(placements, &index)?;

        Ok(self.check_all(vehicle, &cog, total_weight, placements))
    }

    /// Runs every rule given a precomputed center of gravity and weight.
    pub fn check_all(
        &self,
        vehicle: &VehicleSpec,
        cog: &Vector3<f64>,
        total_weight: f64,
        placements: &[Placement],
    ) -> Vec<Warning> {
        let mut warnings: Vec<Warning> = [
            self.check_capacity(vehicle, total_weight),
            self.check_lateral(vehicle, cog),
            self.check_longitudinal(vehicle, cog),
            self.check_vertical(vehicle, cog, total_weight),
        ]
        .into_iter()
        .flatten()
        .collect();

        warnings.extend(self.check_support(placements));
        warnings
    }

    /// Checks the total weight against the vehicle's capacity.
    pub fn check_capacity(&self, vehicle: &VehicleSpec, total_weight: f64) -> Option<Warning> {
        let max_load = vehicle.max_load();

        if total_weight > max_load {
            let overage = total_weight - max_load;
            return Some(
                Warning::new(
                    WarningKind::Overweight,
                    Severity::Critical,
                    format!(
                        "Total weight {:.2} kg exceeds vehicle capacity {:.2} kg by {:.2} kg",
                        total_weight, max_load, overage
                    ),
                )
                .with_deviation(overage),
            );
        }

        let load_ratio = total_weight / max_load;
        if load_ratio > self.config.near_capacity_ratio {
            return Some(
                Warning::new(
                    WarningKind::NearCapacity,
                    Severity::Warning,
                    format!("Load is at {:.1}% of vehicle capacity", load_ratio * 100.0),
                )
                .with_deviation(load_ratio),
            );
        }

        None
    }

    /// Checks the sideways offset of the center of gravity.
    pub fn check_lateral(&self, vehicle: &VehicleSpec, cog: &Vector3<f64>) -> Option<Warning> {
        balance_warning(
            WarningKind::LateralImbalance,
            "lateral",
            "width",
            cog.y,
            vehicle.width(),
            self.config.lateral_warning_ratio,
            self.config.lateral_critical_ratio,
        )
    }

    /// Checks the fore/aft offset of the center of gravity.
    pub fn check_longitudinal(&self, vehicle: &VehicleSpec, cog: &Vector3<f64>) -> Option<Warning> {
        balance_warning(
            WarningKind::LongitudinalImbalance,
            "longitudinal",
            "length",
            cog.x,
            vehicle.length(),
            self.config.longitudinal_warning_ratio,
            self.config.longitudinal_critical_ratio,
        )
    }

    /// Checks for a high center of gravity under a heavy load.
    ///
    /// A light load with a high COG is not flagged.
    pub fn check_vertical(
        &self,
        vehicle: &VehicleSpec,
        cog: &Vector3<f64>,
        total_weight: f64,
    ) -> Option<Warning> {
        let height_limit = vehicle.height() * self.config.vertical_height_ratio;
        let load_limit = vehicle.max_load() * self.config.vertical_load_ratio;

        if cog.z > height_limit && total_weight > load_limit {
            let excess = cog.z - height_limit;
            Some(
                Warning::new(
                    WarningKind::VerticalInstability,
                    Severity::Warning,
                    format!(
                        "Center of gravity at {:.2} m is {:.2} m above the {:.2} m limit under a {:.0}% load",
                        cog.z,
                        excess,
                        height_limit,
                        total_weight / vehicle.max_load() * 100.0
                    ),
                )
                .with_deviation(excess),
            )
        } else {
            None
        }
    }

    /// Checks that every raised placement rests on enough supporting cargo.
    pub fn check_support(&self, placements: &[Placement]) -> Vec<Warning> {
        placements
            .iter()
            .filter(|p| !p.is_on_floor())
            .filter_map(|p| {
                let ratio = support_ratio(p, placements);
                if ratio + EPSILON >= self.config.min_support_ratio {
                    return None;
                }

                let severity = if ratio <= EPSILON {
                    Severity::Critical
                } else {
                    Severity::Warning
                };

                Some(
                    Warning::new(
                        WarningKind::UnsupportedCargo,
                        severity,
                        format!(
                            "Cargo '{}' has {:.0}% of its base supported (minimum {:.0}%)",
                            p.cargo_id,
                            ratio * 100.0,
                            self.config.min_support_ratio * 100.0
                        ),
                    )
                    .with_deviation(ratio),
                )
            })
            .collect()
    }
}

/// Runs every safety rule with the given thresholds.
pub fn analyze(
    vehicle: &VehicleSpec,
    cargo: &[CargoItem],
    placements: &[Placement],
    config: &SafetyConfig,
) -> Result<Vec<Warning>> {
    SafetyAnalyzer::new(config.clone()).analyze(vehicle, cargo, placements)
}

/// Computes the fraction (0.0-1.0) of a placement's base resting on the
/// floor or on the tops of other placements.
pub fn support_ratio(placement: &Placement, placements: &[Placement]) -> f64 {
    if placement.is_on_floor() {
        return 1.0;
    }

    let bottom_z = placement.z();
    let supported_area: f64 = placements
        .iter()
        .filter(|other| (other.bounds.top() - bottom_z).abs() <= CONTACT_TOLERANCE)
        .map(|other| placement.bounds.footprint_overlap(&other.bounds))
        .sum();

    (supported_area / placement.bounds.footprint_area()).min(1.0)
}

fn balance_warning(
    kind: WarningKind,
    direction: &str,
    dimension: &str,
    coordinate: f64,
    extent: f64,
    warning_ratio: f64,
    critical_ratio: f64,
) -> Option<Warning> {
    let offset = (coordinate - extent / 2.0).abs();
    let warning_limit = extent * warning_ratio;
    let critical_limit = extent * critical_ratio;

    if offset <= warning_limit {
        return None;
    }

    let (severity, limit, ratio) = if offset > critical_limit {
        (Severity::Critical, critical_limit, critical_ratio)
    } else {
        (Severity::Warning, warning_limit, warning_ratio)
    };

    Some(
        Warning::new(
            kind,
            severity,
            format!(
                "Center of gravity is {:.2} m off the {} center, beyond {:.0}% of vehicle {} ({:.2} m)",
                offset,
                direction,
                ratio * 100.0,
                dimension,
                limit
            ),
        )
        .with_deviation(offset),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use u_loadplan_core::Rotation;

    fn truck() -> VehicleSpec {
        VehicleSpec::new(6.0, 2.4, 2.6, 5000.0).unwrap()
    }

    fn place(item: &CargoItem, x: f64, y: f64, z: f64) -> Placement {
        Placement::for_cargo(item, Vector3::new(x, y, z), Rotation::None).unwrap()
    }

    #[test]
    fn test_centered_load_has_no_warnings() {
        let vehicle = truck();
        let cargo = vec![CargoItem::new("M1", 2000.0, 2.0, 1.5, 1.6).unwrap()];
        let placements = vec![place(&cargo[0], 2.0, 0.45, 0.0)];

        let warnings = analyze(&vehicle, &cargo, &placements, &SafetyConfig::default()).unwrap();
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_capacity_rules() {
        let analyzer = SafetyAnalyzer::default();
        let vehicle = truck();

        let over = analyzer.check_capacity(&vehicle, 6000.0).unwrap();
        assert_eq!(over.kind, WarningKind::Overweight);
        assert_eq!(over.severity, Severity::Critical);
        assert_relative_eq!(over.deviation.unwrap(), 1000.0);

        let near = analyzer.check_capacity(&vehicle, 4750.0).unwrap();
        assert_eq!(near.kind, WarningKind::NearCapacity);
        assert_eq!(near.severity, Severity::Warning);
        assert_relative_eq!(near.deviation.unwrap(), 0.95);

        assert!(analyzer.check_capacity(&vehicle, 5000.0 * 0.9).is_none());
        assert!(analyzer.check_capacity(&vehicle, 2000.0).is_none());
    }

    #[test]
    fn test_lateral_bands() {
        let analyzer = SafetyAnalyzer::default();
        let vehicle = truck();

        // Within 0.36 m of the center
        assert!(analyzer
            .check_lateral(&vehicle, &Vector3::new(3.0, 1.5, 1.0))
            .is_none());

        // Warning band: 0.36 m < offset <= 0.60 m
        let warning = analyzer
            .check_lateral(&vehicle, &Vector3::new(3.0, 1.7, 1.0))
            .unwrap();
        assert_eq!(warning.kind, WarningKind::LateralImbalance);
        assert_eq!(warning.severity, Severity::Warning);
        assert_relative_eq!(warning.deviation.unwrap(), 0.5, epsilon = 1e-9);

        let critical = analyzer
            .check_lateral(&vehicle, &Vector3::new(3.0, 0.4, 1.0))
            .unwrap();
        assert_eq!(critical.severity, Severity::Critical);
        assert_relative_eq!(critical.deviation.unwrap(), 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_longitudinal_bands() {
        let analyzer = SafetyAnalyzer::default();
        let vehicle = truck();

        // Bands: 1.2 m warning, 2.1 m critical
        assert!(analyzer
            .check_longitudinal(&vehicle, &Vector3::new(4.0, 1.2, 1.0))
            .is_none());

        let warning = analyzer
            .check_longitudinal(&vehicle, &Vector3::new(4.5, 1.2, 1.0))
            .unwrap();
        assert_eq!(warning.kind, WarningKind::LongitudinalImbalance);
        assert_eq!(warning.severity, Severity::Warning);

        let critical = analyzer
            .check_longitudinal(&vehicle, &Vector3::new(0.5, 1.2, 1.0))
            .unwrap();
        assert_eq!(critical.severity, Severity::Critical);
    }

    #[test]
    fn test_vertical_requires_heavy_load() {
        let analyzer = SafetyAnalyzer::default();
        let vehicle = truck();
        let high = Vector3::new(3.0, 1.2, 1.8);

        let heavy = analyzer.check_vertical(&vehicle, &high, 3000.0).unwrap();
        assert_eq!(heavy.kind, WarningKind::VerticalInstability);
        assert_eq!(heavy.severity, Severity::Warning);
        assert_relative_eq!(heavy.deviation.unwrap(), 0.5, epsilon = 1e-9);

        assert!(analyzer.check_vertical(&vehicle, &high, 1000.0).is_none());
        assert!(analyzer
            .check_vertical(&vehicle, &Vector3::new(3.0, 1.2, 1.0), 3000.0)
            .is_none());
    }

    #[test]
    fn test_checks_are_not_short_circuited() {
        let vehicle = truck();
        let cargo = vec![CargoItem::new("H", 6000.0, 1.0, 0.4, 2.4).unwrap()];
        // Against the front-left wall, tall and overweight
        let placements = vec![place(&cargo[0], 0.0, 0.0, 0.0)];

        let warnings = analyze(&vehicle, &cargo, &placements, &SafetyConfig::default()).unwrap();
        let kinds: Vec<WarningKind> = warnings.iter().map(|w| w.kind).collect();

        assert_eq!(
            kinds,
            vec![
                WarningKind::Overweight,
                WarningKind::LateralImbalance,
                WarningKind::LongitudinalImbalance,
            ]
        );
        assert!(warnings.iter().all(|w| w.severity == Severity::Critical));
    }

    #[test]
    fn test_support_ratio() {
        let base = CargoItem::new("base", 100.0, 2.0, 2.0, 1.0).unwrap();
        let top = CargoItem::new("top", 10.0, 2.0, 2.0, 1.0).unwrap();

        let full = vec![place(&base, 0.0, 0.0, 0.0), place(&top, 0.0, 0.0, 1.0)];
        assert_relative_eq!(support_ratio(&full[1], &full), 1.0);
        assert_relative_eq!(support_ratio(&full[0], &full), 1.0);

        let half = vec![place(&base, 0.0, 0.0, 0.0), place(&top, 1.0, 0.0, 1.0)];
        assert_relative_eq!(support_ratio(&half[1], &half), 0.5);

        let floating = vec![place(&base, 0.0, 0.0, 0.0), place(&top, 3.0, 0.0, 1.0)];
        assert_relative_eq!(support_ratio(&floating[1], &floating), 0.0);
    }

    #[test]
    fn test_support_warnings() {
        let analyzer = SafetyAnalyzer::default();
        let base = CargoItem::new("base", 100.0, 2.0, 2.0, 1.0).unwrap();
        let half = CargoItem::new("half", 10.0, 2.0, 2.0, 1.0).unwrap();
        let floating = CargoItem::new("floating", 10.0, 1.0, 1.0, 1.0).unwrap();

        let placements = vec![
            place(&base, 0.0, 0.0, 0.0),
            place(&half, 1.0, 0.0, 1.0),
            place(&floating, 4.0, 0.0, 0.5),
        ];

        let warnings = analyzer.check_support(&placements);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].kind, WarningKind::UnsupportedCargo);
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert!(warnings[0].message.contains("'half'"));
        assert_eq!(warnings[1].severity, Severity::Critical);
        assert!(warnings[1].message.contains("'floating'"));
    }
}
