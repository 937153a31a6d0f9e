//! # U-LoadPlan Core
//!
//! Core data model and abstractions for the U-LoadPlan load optimization engine.
//!
//! This crate provides the types shared between the engine and its callers:
//! the vehicle and cargo records, placements, plan results and warnings, the
//! error taxonomy and the scoring/safety configuration.
//!
//! ## Core Components
//!
//! - **Records**: [`VehicleSpec`], [`CargoItem`], validated at construction
//! - **Geometry**: [`BoundingBox`], [`Rotation`], [`Axis`]
//! - **Results**: [`Placement`], [`LoadPlanResult`], [`Warning`], [`PlanSummary`]
//! - **Configuration**: [`Config`], [`ScoringConfig`], [`SafetyConfig`]
//! - **Planner trait**: [`Planner`] - the generate/analyze interface
//!
//! ## Configuration
//!
//! ```rust
//! use u_loadplan_core::{Config, SafetyConfig, ScoringConfig};
//!
//! let config = Config::new()
//!     .with_scoring(ScoringConfig::default().with_weights(0.5, 0.3, 0.2))
//!     .with_safety(SafetyConfig::default().with_lateral_bands(0.15, 0.25))
//!     .with_stacking(true);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod cargo;
pub mod config;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod planner;
pub mod result;
pub mod vehicle;

// Re-exports
pub use cargo::CargoItem;
pub use config::{Config, SafetyConfig, ScoringConfig};
pub use error::{Error, InfeasibleReason, Result};
pub use geometry::{Axis, BoundingBox, CargoId, Rotation, EPSILON};
pub use nalgebra::Vector3;
pub use placement::Placement;
pub use planner::Planner;
pub use result::{
    LoadPlanResult, PlanSummary, Severity, StabilityClass, TorqueAnalysis, Warning, WarningKind,
};
pub use vehicle::VehicleSpec;
