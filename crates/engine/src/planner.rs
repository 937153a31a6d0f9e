//! Load plan assembly: search, validation and evaluation.

use crate::physics;
use crate::placer;
use crate::safety::SafetyAnalyzer;
use crate::stability::StabilityScorer;
use std::collections::HashSet;
use u_loadplan_core::{
    CargoItem, Config, Error, LoadPlanResult, Placement, Planner, Result, StabilityClass,
    VehicleSpec, Warning, EPSILON,
};

/// Load planner combining the placement search, the stability scorer and the
/// safety analyzer.
#[derive(Debug, Clone, Default)]
pub struct LoadPlanner {
    config: Config,
}

impl LoadPlanner {
    /// Creates a new planner with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Creates a planner with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scores and checks a set of placements that is already known to be valid.
    pub fn evaluate(
        &self,
        vehicle: &VehicleSpec,
        cargo: &[CargoItem],
        placements: Vec<Placement>,
    ) -> Result<LoadPlanResult> {
        let index = physics::index_cargo(cargo)?;
        let cog = physics::centroid_of(&placements, &index)?;
        let total_weight = physics::total_weight(&placements, &index)?;

        let assessment =
            StabilityScorer::new(self.config.scoring.clone()).assess(&cog, vehicle, total_weight);
        let warnings = SafetyAnalyzer::new(self.config.safety.clone()).check_all(
            vehicle,
            &cog,
            total_weight,
            &placements,
        );

        let is_safe = assessment.class == StabilityClass::Safe
            && !warnings.iter().any(Warning::is_critical);

        log::debug!(
            "Evaluated {} placements: cog ({:.3}, {:.3}, {:.3}), score {} ({}), {} warnings",
            placements.len(),
            cog.x,
            cog.y,
            cog.z,
            assessment.score,
            assessment.class,
            warnings.len()
        );

        Ok(LoadPlanResult {
            placements,
            stability_score: assessment.score,
            stability_class: assessment.class,
            center_of_gravity: cog,
            total_weight,
            load_ratio: total_weight / vehicle.max_load(),
            torque: physics::torque_analysis(&cog, vehicle, total_weight),
            warnings,
            is_safe,
        })
    }

    /// Checks that user-supplied placements describe a physically possible load.
    pub fn validate_placements(
        &self,
        vehicle: &VehicleSpec,
        cargo: &[CargoItem],
        placements: &[Placement],
    ) -> Result<()> {
        if cargo.is_empty() {
            return Err(Error::EmptyInput);
        }
        let index = physics::index_cargo(cargo)?;

        let mut placed: HashSet<&str> = HashSet::with_capacity(placements.len());
        for placement in placements {
            let id = placement.cargo_id.as_str();
            let item = index
                .get(id)
                .ok_or_else(|| Error::UnknownCargo(placement.cargo_id.clone()))?;

            if !placed.insert(id) {
                return Err(Error::DuplicatePlacement(placement.cargo_id.clone()));
            }

            let expected = item.oriented_dimensions(placement.rotation);
            let actual = placement.size();
            if (expected - actual).amax() > EPSILON {
                return Err(Error::InvalidPlacement {
                    cargo_id: placement.cargo_id.clone(),
                    reason: format!(
                        "size {:.3} x {:.3} x {:.3} does not match {:.3} x {:.3} x {:.3} at {} deg",
                        actual.x,
                        actual.y,
                        actual.z,
                        expected.x,
                        expected.y,
                        expected.z,
                        placement.rotation.degrees()
                    ),
                });
            }

            if let Some(axis) = placement.bounds.exceeded_axis(vehicle.dimensions()) {
                return Err(Error::OutOfBounds {
                    cargo_id: placement.cargo_id.clone(),
                    axis,
                });
            }
        }

        if let Some(missing) = cargo.iter().find(|c| !placed.contains(c.id().as_str())) {
            return Err(Error::MissingPlacement(missing.id().clone()));
        }

        for (i, first) in placements.iter().enumerate() {
            if let Some(second) = placements[i + 1..]
                .iter()
                .find(|other| first.bounds.intersects(&other.bounds))
            {
                return Err(Error::Overlap {
                    first: first.cargo_id.clone(),
                    second: second.cargo_id.clone(),
                });
            }
        }

        Ok(())
    }
}

impl Planner for LoadPlanner {
    fn generate(&self, vehicle: &VehicleSpec, cargo: &[CargoItem]) -> Result<LoadPlanResult> {
        self.config.validate()?;

        let placements = placer::place(vehicle, cargo, &self.config)?;
        log::debug!(
            "Placed {} items in {:.2} x {:.2} x {:.2} vehicle",
            placements.len(),
            vehicle.length(),
            vehicle.width(),
            vehicle.height()
        );

        self.evaluate(vehicle, cargo, placements)
    }

    fn analyze(
        &self,
        vehicle: &VehicleSpec,
        cargo: &[CargoItem],
        placements: &[Placement],
    ) -> Result<LoadPlanResult> {
        self.config.validate()?;
        self.validate_placements(vehicle, cargo, placements)?;
        self.evaluate(vehicle, cargo, placements.to_vec())
    }
}

/// Generates a load plan with the default configuration.
pub fn generate(vehicle: &VehicleSpec, cargo: &[CargoItem]) -> Result<LoadPlanResult> {
    LoadPlanner::default_config().generate(vehicle, cargo)
}

/// Analyzes user-supplied placements with the default configuration.
pub fn analyze(
    vehicle: &VehicleSpec,
    cargo: &[CargoItem],
    placements: &[Placement],
) -> Result<LoadPlanResult> {
    LoadPlanner::default_config().analyze(vehicle, cargo, placements)
}
