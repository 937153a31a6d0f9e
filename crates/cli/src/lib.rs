//! Request parsing and report formatting for the `loadplan` command.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use u_loadplan::{
    CargoItem, Config, Error, LoadPlanResult, LoadPlanner, Placement, Planner, Rotation, Severity,
    Vector3, VehicleSpec,
};

/// Errors that can occur when loading a request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Plan(#[from] Error),
}

/// One placement as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Placed cargo.
    pub cargo_id: String,
    /// Min corner along the length.
    pub position_x: f64,
    /// Min corner along the width.
    pub position_y: f64,
    /// Min corner height.
    pub position_z: f64,
    /// Rotation about the vertical axis in degrees.
    #[serde(default)]
    pub rotation: i32,
}

impl From<&Placement> for PlacementRecord {
    fn from(placement: &Placement) -> Self {
        Self {
            cargo_id: placement.cargo_id.clone(),
            position_x: placement.x(),
            position_y: placement.y(),
            position_z: placement.z(),
            rotation: i32::from(placement.rotation.degrees()),
        }
    }
}

/// A planning request: the vehicle, its cargo and optionally a hand-made plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Target vehicle.
    pub vehicle: VehicleSpec,
    /// Cargo to load.
    pub cargo: Vec<CargoItem>,
    /// Placements to analyze.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placements: Vec<PlacementRecord>,
}

impl PlanRequest {
    /// Parses a request from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a request from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RequestError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Resolves the placement rows against the cargo list.
    ///
    /// Each row takes its size from the cargo it names, rotated as recorded.
    pub fn placements(&self) -> Result<Vec<Placement>, RequestError> {
        let cargo_by_id: HashMap<&str, &CargoItem> =
            self.cargo.iter().map(|c| (c.id().as_str(), c)).collect();

        self.placements
            .iter()
            .map(|row| -> Result<Placement, RequestError> {
                let item = cargo_by_id
                    .get(row.cargo_id.as_str())
                    .ok_or_else(|| Error::UnknownCargo(row.cargo_id.clone()))?;
                let rotation = Rotation::from_degrees(row.rotation)?;
                let origin = Vector3::new(row.position_x, row.position_y, row.position_z);
                Ok(Placement::for_cargo(item, origin, rotation)?)
            })
            .collect()
    }
}

/// Loads an engine configuration from a JSON file and validates it.
///
/// Missing fields take their default values.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, RequestError> {
    let content = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Generates a plan for the request's cargo.
pub fn run_generate(
    request: &PlanRequest,
    config: &Config,
) -> Result<LoadPlanResult, RequestError> {
    let planner = LoadPlanner::new(config.clone());
    Ok(planner.generate(&request.vehicle, &request.cargo)?)
}

/// Analyzes the request's placements.
pub fn run_analyze(
    request: &PlanRequest,
    config: &Config,
) -> Result<LoadPlanResult, RequestError> {
    let placements = request.placements()?;
    let planner = LoadPlanner::new(config.clone());
    Ok(planner.analyze(&request.vehicle, &request.cargo, &placements)?)
}

/// Formats a human-readable plan summary.
pub fn format_summary(result: &LoadPlanResult) -> String {
    let summary = result.summary();
    let cog = &result.center_of_gravity;
    let rule = format!("{:-<60}", "");

    let mut lines = vec![
        "Load Plan Summary".to_string(),
        "=================".to_string(),
        format!("  Cargo items:     {}", summary.cargo_count),
        format!(
            "  Total weight:    {:.1} kg ({:.1}% of capacity)",
            summary.total_weight, summary.load_percent
        ),
        format!("  Center of mass:  ({:.3}, {:.3}, {:.3}) m", cog.x, cog.y, cog.z),
        format!("  Stability:       {}/100 ({})", summary.stability_score, summary.stability_class),
        format!("  Safe to depart:  {}", if summary.is_safe { "yes" } else { "no" }),
        String::new(),
        "Placements:".to_string(),
        rule.clone(),
    ];

    lines.extend(result.placements.iter().map(|p| {
        format!(
            "  {:<16} x={:<7.3} y={:<7.3} z={:<7.3} rot={}",
            p.cargo_id,
            p.x(),
            p.y(),
            p.z(),
            p.rotation.degrees()
        )
    }));

    if !result.warnings.is_empty() {
        lines.push(String::new());
        lines.push(format!("Warnings ({} critical):", summary.critical_count));
        lines.push(rule);
        lines.extend(result.warnings.iter().map(|w| {
            let severity = match w.severity {
                Severity::Warning => "WARNING",
                Severity::Critical => "CRITICAL",
            };
            format!("  [{}] {}: {}", severity, w.kind, w.message)
        }));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
