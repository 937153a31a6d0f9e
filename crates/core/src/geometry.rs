//! Core geometry types: axes, rotations and axis-aligned bounding boxes.
//!
//! The load bed frame has `x` along the vehicle length (longitudinal), `y`
//! along its width (lateral) and `z` pointing up. All lengths are meters.

use crate::{Error, Result};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a cargo item.
pub type CargoId = String;

/// Geometric tolerance used for containment and contact tests.
pub const EPSILON: f64 = 1e-9;

/// A coordinate axis of the load bed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Longitudinal axis (vehicle length).
    X,
    /// Lateral axis (vehicle width).
    Y,
    /// Vertical axis (vehicle height).
    Z,
}

impl Axis {
    /// All axes in checking order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the vector component index of this axis.
    pub fn index(&self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "x (length)"),
            Self::Y => write!(f, "y (width)"),
            Self::Z => write!(f, "z (height)"),
        }
    }
}

/// Rotation of an item about the vertical axis.
///
/// Only quarter turns are allowed so footprints stay axis-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// Original orientation (0 degrees).
    #[default]
    None,
    /// Rotated 90 degrees about the vertical axis (length and width swapped).
    Quarter,
}

impl Rotation {
    /// All allowed rotations, in evaluation order.
    pub const ALL: [Rotation; 2] = [Rotation::None, Rotation::Quarter];

    /// Returns the rotation angle in degrees.
    pub fn degrees(&self) -> u16 {
        match self {
            Self::None => 0,
            Self::Quarter => 90,
        }
    }

    /// Converts an angle in degrees to a rotation.
    ///
    /// Half turns leave an axis-aligned footprint unchanged, so multiples of
    /// 180 map to [`Rotation::None`] and odd multiples of 90 to
    /// [`Rotation::Quarter`].
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees.rem_euclid(180) {
            0 => Ok(Self::None),
            90 => Ok(Self::Quarter),
            _ => Err(Error::InvalidGeometry(format!(
                "Rotation of {} degrees is not a quarter turn",
                degrees
            ))),
        }
    }

    /// Returns true if the footprint axes are swapped.
    pub fn is_rotated(&self) -> bool {
        matches!(self, Self::Quarter)
    }

    /// Applies the rotation to a (length, width, height) size.
    pub fn apply(&self, size: &Vector3<f64>) -> Vector3<f64> {
        match self {
            Self::None => *size,
            Self::Quarter => Vector3::new(size.y, size.x, size.z),
        }
    }
}

/// Axis-aligned box given by its min corner and its size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBoundingBox"))]
pub struct BoundingBox {
    origin: Vector3<f64>,
    size: Vector3<f64>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawBoundingBox {
    origin: Vector3<f64>,
    size: Vector3<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBoundingBox> for BoundingBox {
    type Error = Error;

    fn try_from(raw: RawBoundingBox) -> Result<Self> {
        Self::new(raw.origin, raw.size)
    }
}

impl BoundingBox {
    /// Creates a bounding box, validating that the size is positive and all
    /// components are finite.
    pub fn new(origin: Vector3<f64>, size: Vector3<f64>) -> Result<Self> {
        if origin.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidGeometry("Box origin must be finite".into()));
        }
        if size.iter().any(|c| !c.is_finite() || *c <= 0.0) {
            return Err(Error::InvalidGeometry("All box dimensions must be positive".into()));
        }
        Ok(Self { origin, size })
    }

    /// Returns the min corner.
    pub fn origin(&self) -> &Vector3<f64> {
        &self.origin
    }

    /// Returns the size (length, width, height).
    pub fn size(&self) -> &Vector3<f64> {
        &self.size
    }

    /// Returns the min corner.
    pub fn min(&self) -> Vector3<f64> {
        self.origin
    }

    /// Returns the max corner.
    pub fn max(&self) -> Vector3<f64> {
        self.origin + self.size
    }

    /// Returns the geometric center.
    pub fn center(&self) -> Vector3<f64> {
        self.origin + self.size / 2.0
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        self.size.x * self.size.y * self.size.z
    }

    /// Returns the area of the bottom face.
    pub fn footprint_area(&self) -> f64 {
        self.size.x * self.size.y
    }

    /// Returns the z coordinate of the top face.
    pub fn top(&self) -> f64 {
        self.origin.z + self.size.z
    }

    /// Checks if this box intersects another box.
    ///
    /// Boxes that only touch along a face, edge or corner do not intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        let self_max = self.max();
        let other_max = other.max();

        let separated_x =
            self.origin.x >= other_max.x - EPSILON || other.origin.x >= self_max.x - EPSILON;
        let separated_y =
            self.origin.y >= other_max.y - EPSILON || other.origin.y >= self_max.y - EPSILON;
        let separated_z =
            self.origin.z >= other_max.z - EPSILON || other.origin.z >= self_max.z - EPSILON;

        !(separated_x || separated_y || separated_z)
    }

    /// Computes the overlap area between the footprints of two boxes.
    pub fn footprint_overlap(&self, other: &BoundingBox) -> f64 {
        let self_max = self.max();
        let other_max = other.max();

        let x_overlap = (self_max.x.min(other_max.x) - self.origin.x.max(other.origin.x)).max(0.0);
        let y_overlap = (self_max.y.min(other_max.y) - self.origin.y.max(other.origin.y)).max(0.0);

        x_overlap * y_overlap
    }

    /// Returns the first axis along which this box leaves `[0, extent]`.
    pub fn exceeded_axis(&self, extent: &Vector3<f64>) -> Option<Axis> {
        let max = self.max();
        Axis::ALL.into_iter().find(|axis| {
            let i = axis.index();
            self.origin[i] < -EPSILON || max[i] > extent[i] + EPSILON
        })
    }

    /// Checks if this box lies within `[0, extent]` on every axis.
    pub fn is_within(&self, extent: &Vector3<f64>) -> bool {
        self.exceeded_axis(extent).is_none()
    }
}
