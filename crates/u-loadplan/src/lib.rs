//! # U-LoadPlan
//!
//! Cargo load planning engine for road vehicles.
//!
//! This crate provides:
//! - **Plan generation**: heaviest-first greedy placement that keeps the
//!   center of gravity near the ideal point of the load bed
//! - **Plan analysis**: validation and evaluation of hand-made placements
//! - **Stability scoring**: a 0-100 score derived from the COG deviation
//! - **Safety checks**: capacity, balance, vertical and support warnings
//!
//! ## Quick Start
//!
//! ```rust
//! use u_loadplan::{generate, CargoItem, VehicleSpec};
//!
//! let vehicle = VehicleSpec::new(6.0, 2.4, 2.6, 5000.0)?;
//! let cargo = vec![CargoItem::new("M1", 2000.0, 2.0, 1.5, 1.6)?.with_name("Machinery")];
//!
//! let plan = generate(&vehicle, &cargo)?;
//! assert!(plan.is_safe);
//! println!("score {} ({})", plan.stability_score, plan.stability_class);
//! # Ok::<(), u_loadplan::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support

/// Core data model and abstractions.
pub use u_loadplan_core as core;

/// Scoring, safety analysis and placement search.
pub use u_loadplan_engine as engine;

// Re-export commonly used types at root level
pub use u_loadplan_core::{
    Axis, BoundingBox, CargoItem, Config, Error, InfeasibleReason, LoadPlanResult, Placement,
    PlanSummary, Planner, Result, Rotation, SafetyConfig, ScoringConfig, Severity,
    StabilityClass, TorqueAnalysis, Vector3, VehicleSpec, Warning, WarningKind,
};
pub use u_loadplan_engine::{analyze, generate, LoadPlanner};
