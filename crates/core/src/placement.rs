//! Placement representation for positioned cargo.

use crate::cargo::CargoItem;
use crate::geometry::{BoundingBox, CargoId, Rotation};
use crate::Result;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position, oriented footprint and rotation assigned to one cargo item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// The ID of the placed cargo item.
    pub cargo_id: CargoId,

    /// Occupied box; `size` is the cargo's dimensions after rotation.
    pub bounds: BoundingBox,

    /// Rotation about the vertical axis.
    pub rotation: Rotation,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(cargo_id: impl Into<CargoId>, bounds: BoundingBox, rotation: Rotation) -> Self {
        Self {
            cargo_id: cargo_id.into(),
            bounds,
            rotation,
        }
    }

    /// Creates a placement of `cargo` with its min corner at `origin`.
    pub fn for_cargo(cargo: &CargoItem, origin: Vector3<f64>, rotation: Rotation) -> Result<Self> {
        let bounds = BoundingBox::new(origin, cargo.oriented_dimensions(rotation))?;
        Ok(Self::new(cargo.id().clone(), bounds, rotation))
    }

    /// Returns the min corner.
    pub fn origin(&self) -> &Vector3<f64> {
        self.bounds.origin()
    }

    /// Returns the oriented size.
    pub fn size(&self) -> &Vector3<f64> {
        self.bounds.size()
    }

    /// Returns the geometric center.
    pub fn center(&self) -> Vector3<f64> {
        self.bounds.center()
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f64 {
        self.bounds.origin().x
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> f64 {
        self.bounds.origin().y
    }

    /// Returns the z coordinate.
    pub fn z(&self) -> f64 {
        self.bounds.origin().z
    }

    /// Returns true if this placement rests on the load bed floor.
    pub fn is_on_floor(&self) -> bool {
        self.z().abs() <= crate::geometry::EPSILON
    }
}
