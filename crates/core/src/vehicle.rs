//! Vehicle load bed specification.

use crate::{Error, Result};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interior load bed of a vehicle together with its payload capacity.
///
/// Dimensions and capacity are validated once at construction and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "VehicleRecord", into = "VehicleRecord")
)]
pub struct VehicleSpec {
    /// Dimensions (length, width, height) in meters.
    dimensions: Vector3<f64>,

    /// Maximum payload in kilograms.
    max_load: f64,

    /// Optional vehicle type label (e.g. "box truck").
    vehicle_type: Option<String>,
}

/// Flat wire form of [`VehicleSpec`], matching the persisted vehicle record.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct VehicleRecord {
    length: f64,
    width: f64,
    height: f64,
    max_load: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vehicle_type: Option<String>,
}

#[cfg(feature = "serde")]
impl From<VehicleSpec> for VehicleRecord {
    fn from(vehicle: VehicleSpec) -> Self {
        Self {
            length: vehicle.dimensions.x,
            width: vehicle.dimensions.y,
            height: vehicle.dimensions.z,
            max_load: vehicle.max_load,
            vehicle_type: vehicle.vehicle_type,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<VehicleRecord> for VehicleSpec {
    type Error = Error;

    fn try_from(raw: VehicleRecord) -> Result<Self> {
        let vehicle = Self::new(raw.length, raw.width, raw.height, raw.max_load)?;
        Ok(match raw.vehicle_type {
            Some(label) => vehicle.with_type(label),
            None => vehicle,
        })
    }
}

impl VehicleSpec {
    /// Creates a new vehicle specification.
    ///
    /// Fails with [`Error::InvalidVehicle`] if any dimension or the maximum
    /// load is not a positive finite number.
    pub fn new(length: f64, width: f64, height: f64, max_load: f64) -> Result<Self> {
        for (name, value) in [
            ("length", length),
            ("width", width),
            ("height", height),
            ("max_load", max_load),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidVehicle(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        Ok(Self {
            dimensions: Vector3::new(length, width, height),
            max_load,
            vehicle_type: None,
        })
    }

    /// Sets the vehicle type label.
    pub fn with_type(mut self, vehicle_type: impl Into<String>) -> Self {
        self.vehicle_type = Some(vehicle_type.into());
        self
    }

    /// Returns the dimensions (length, width, height).
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Returns the load bed length (x extent).
    pub fn length(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the load bed width (y extent).
    pub fn width(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the load bed height (z extent).
    pub fn height(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns the maximum payload in kilograms.
    pub fn max_load(&self) -> f64 {
        self.max_load
    }

    /// Returns the vehicle type label.
    pub fn vehicle_type(&self) -> Option<&str> {
        self.vehicle_type.as_deref()
    }

    /// Returns the geometric center of the load bed.
    pub fn center(&self) -> Vector3<f64> {
        self.dimensions / 2.0
    }

    /// Returns the floor area.
    pub fn floor_area(&self) -> f64 {
        self.dimensions.x * self.dimensions.y
    }

    /// Returns the load bed volume.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }
}
