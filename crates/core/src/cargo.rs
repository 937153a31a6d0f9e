//! Cargo item definitions.

use crate::geometry::{CargoId, Rotation};
use crate::{Error, Result};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular cargo item to be loaded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "CargoRecord", into = "CargoRecord")
)]
pub struct CargoItem {
    /// Unique identifier.
    id: CargoId,

    /// Weight in kilograms.
    weight: f64,

    /// Dimensions (length, width, height) in the unrotated orientation.
    dimensions: Vector3<f64>,

    /// Optional display name.
    name: Option<String>,

    /// Whether other cargo may be stacked on top of this item.
    stackable: bool,
}

/// Flat wire form of [`CargoItem`], matching the persisted cargo record.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct CargoRecord {
    id: CargoId,
    weight: f64,
    length: f64,
    width: f64,
    height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default = "default_stackable")]
    stackable: bool,
}

#[cfg(feature = "serde")]
fn default_stackable() -> bool {
    true
}

#[cfg(feature = "serde")]
impl From<CargoItem> for CargoRecord {
    fn from(item: CargoItem) -> Self {
        Self {
            id: item.id,
            weight: item.weight,
            length: item.dimensions.x,
            width: item.dimensions.y,
            height: item.dimensions.z,
            name: item.name,
            stackable: item.stackable,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<CargoRecord> for CargoItem {
    type Error = Error;

    fn try_from(raw: CargoRecord) -> Result<Self> {
        let mut item = Self::new(raw.id, raw.weight, raw.length, raw.width, raw.height)?
            .with_stackable(raw.stackable);
        item.name = raw.name;
        Ok(item)
    }
}

impl CargoItem {
    /// Creates a new cargo item.
    ///
    /// Fails with [`Error::InvalidCargo`] if the id is empty or the weight or
    /// any dimension is not a positive finite number.
    pub fn new(
        id: impl Into<CargoId>,
        weight: f64,
        length: f64,
        width: f64,
        height: f64,
    ) -> Result<Self> {
        let id = id.into();

        if id.is_empty() {
            return Err(Error::InvalidCargo("Cargo id must not be empty".into()));
        }

        if !weight.is_finite() || weight <= 0.0 {
            return Err(Error::InvalidCargo(format!(
                "Weight for '{}' must be positive, got {}",
                id, weight
            )));
        }

        if [length, width, height]
            .iter()
            .any(|d| !d.is_finite() || *d <= 0.0)
        {
            return Err(Error::InvalidCargo(format!(
                "All dimensions for '{}' must be positive",
                id
            )));
        }

        Ok(Self {
            id,
            weight,
            dimensions: Vector3::new(length, width, height),
            name: None,
            stackable: true,
        })
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets whether other cargo may be stacked on top.
    pub fn with_stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    /// Returns the identifier.
    pub fn id(&self) -> &CargoId {
        &self.id
    }

    /// Returns the weight in kilograms.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns the dimensions (length, width, height).
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Returns the display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns whether other cargo may be stacked on top.
    pub fn is_stackable(&self) -> bool {
        self.stackable
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Returns the dimensions after applying a rotation.
    pub fn oriented_dimensions(&self, rotation: Rotation) -> Vector3<f64> {
        rotation.apply(&self.dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cargo_accessors() {
        let item = CargoItem::new("M1", 2000.0, 2.0, 1.5, 1.6)
            .unwrap()
            .with_name("Machinery");

        assert_eq!(item.id(), "M1");
        assert_eq!(item.name(), Some("Machinery"));
        assert!(item.is_stackable());
        assert_relative_eq!(item.weight(), 2000.0);
        assert_relative_eq!(item.volume(), 4.8, epsilon = 1e-9);
    }

    #[test]
    fn test_oriented_dimensions() {
        let item = CargoItem::new("B", 10.0, 3.0, 1.0, 2.0).unwrap();

        let rotated = item.oriented_dimensions(Rotation::Quarter);
        assert_relative_eq!(rotated.x, 1.0);
        assert_relative_eq!(rotated.y, 3.0);
        assert_relative_eq!(rotated.z, 2.0);
    }

    #[test]
    fn test_cargo_validation() {
        assert!(matches!(
            CargoItem::new("A", 0.0, 1.0, 1.0, 1.0),
            Err(Error::InvalidCargo(_))
        ));
        assert!(CargoItem::new("B", 10.0, 1.0, -1.0, 1.0).is_err());
        assert!(CargoItem::new("C", f64::NAN, 1.0, 1.0, 1.0).is_err());
        assert!(CargoItem::new("D", 10.0, 1.0, 1.0, 1.0).is_ok());
    }
}
