//! Planner trait shared by load planning engines.

use crate::cargo::CargoItem;
use crate::placement::Placement;
use crate::result::LoadPlanResult;
use crate::vehicle::VehicleSpec;
use crate::Result;

/// Trait for load planners.
///
/// Both operations are pure: the result depends only on the arguments and
/// the planner's configuration, and nothing is retained between calls.
pub trait Planner {
    /// Searches a placement for every cargo item and evaluates it.
    ///
    /// Fails with [`crate::Error::EmptyInput`] when `cargo` is empty and with
    /// [`crate::Error::Infeasible`] when the cargo cannot be fitted.
    fn generate(&self, vehicle: &VehicleSpec, cargo: &[CargoItem]) -> Result<LoadPlanResult>;

    /// Validates and evaluates user-supplied placements.
    ///
    /// Fails with [`crate::Error::Overlap`] or [`crate::Error::OutOfBounds`]
    /// for physically impossible placements. Capacity violations are
    /// reported as warnings, not errors.
    fn analyze(
        &self,
        vehicle: &VehicleSpec,
        cargo: &[CargoItem],
        placements: &[Placement],
    ) -> Result<LoadPlanResult>;
}
