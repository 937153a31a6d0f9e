//! # U-LoadPlan Engine
//!
//! Center-of-gravity scoring, safety analysis and cargo placement search.
//!
//! The engine is stateless: [`LoadPlanner`] holds only its configuration and
//! every call computes its result from its arguments alone.
//!
//! ## Quick Start
//!
//! ```rust
//! use u_loadplan_core::{CargoItem, Planner, StabilityClass, VehicleSpec};
//! use u_loadplan_engine::LoadPlanner;
//!
//! let vehicle = VehicleSpec::new(6.0, 2.4, 2.6, 5000.0).unwrap();
//! let cargo = vec![CargoItem::new("M1", 2000.0, 2.0, 1.5, 1.6).unwrap()];
//!
//! let plan = LoadPlanner::default_config().generate(&vehicle, &cargo).unwrap();
//! assert_eq!(plan.placements.len(), 1);
//! assert_eq!(plan.stability_class, StabilityClass::Safe);
//! ```
//!
//! ## Modules
//!
//! - [`physics`]: center of gravity, total weight, torque
//! - [`stability`]: 0-100 stability score
//! - [`safety`]: rule-based warnings
//! - [`free_space`], [`placer`]: greedy placement search
//! - [`planner`]: generate/analyze pipeline

pub mod free_space;
pub mod physics;
pub mod placer;
pub mod planner;
pub mod safety;
pub mod stability;

// Re-exports
pub use planner::{analyze, generate, LoadPlanner};
pub use safety::SafetyAnalyzer;
pub use stability::{StabilityAssessment, StabilityScorer};
pub use u_loadplan_core::{
    CargoItem, Config, Error, LoadPlanResult, Placement, Planner, Result, VehicleSpec,
};
