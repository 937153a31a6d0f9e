//! Integration tests for u-loadplan-core.

use u_loadplan_core::{
    Axis, BoundingBox, CargoItem, Config, Error, Placement, Rotation, Vector3, VehicleSpec,
};

mod geometry_tests {
    use super::*;

    #[test]
    fn test_rotated_cargo_in_vehicle() {
        let vehicle = VehicleSpec::new(3.0, 1.0, 2.0, 1000.0).unwrap();
        let item = CargoItem::new("long", 100.0, 0.8, 2.5, 1.0).unwrap();

        let straight = Placement::for_cargo(&item, Vector3::zeros(), Rotation::None).unwrap();
        assert_eq!(
            straight.bounds.exceeded_axis(vehicle.dimensions()),
            Some(Axis::Y)
        );

        let turned = Placement::for_cargo(&item, Vector3::zeros(), Rotation::Quarter).unwrap();
        assert!(turned.bounds.is_within(vehicle.dimensions()));
    }

    #[test]
    fn test_stacked_boxes_touch_without_intersecting() {
        let base = BoundingBox::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0)).unwrap();
        let top =
            BoundingBox::new(Vector3::new(0.1, 0.1, 1.0), Vector3::new(0.8, 0.8, 0.5)).unwrap();

        assert!(!base.intersects(&top));
        assert!((top.footprint_overlap(&base) - 0.64).abs() < 1e-12);
        assert!((base.top() - top.origin().z).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_degrees() {
        for degrees in [0, 180, -180, 360] {
            assert_eq!(Rotation::from_degrees(degrees).unwrap(), Rotation::None);
        }
        for degrees in [90, 270, -90] {
            assert_eq!(Rotation::from_degrees(degrees).unwrap(), Rotation::Quarter);
        }
        assert!(matches!(
            Rotation::from_degrees(30),
            Err(Error::InvalidGeometry(_))
        ));
    }
}

mod record_tests {
    use super::*;

    #[test]
    fn test_invalid_records() {
        assert!(matches!(
            VehicleSpec::new(0.0, 2.4, 2.6, 5000.0),
            Err(Error::InvalidVehicle(_))
        ));
        assert!(matches!(
            CargoItem::new("x", f64::NAN, 1.0, 1.0, 1.0),
            Err(Error::InvalidCargo(_))
        ));
        assert!(matches!(
            CargoItem::new("", 1.0, 1.0, 1.0, 1.0),
            Err(Error::InvalidCargo(_))
        ));
    }

    #[test]
    fn test_config_validation_chain() {
        assert!(Config::default().validate().is_ok());
        assert!(Config::new().with_stacking(false).validate().is_ok());
    }
}

#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;
    use u_loadplan_core::{LoadPlanResult, StabilityClass, TorqueAnalysis};

    #[test]
    fn test_vehicle_and_cargo_wire_format() {
        let vehicle: VehicleSpec = serde_json::from_str(
            r#"{ "length": 6.0, "width": 2.4, "height": 2.6, "max_load": 5000.0 }"#,
        )
        .unwrap();
        assert_eq!(vehicle.max_load(), 5000.0);
        assert_eq!(vehicle.vehicle_type(), None);

        let cargo: CargoItem = serde_json::from_str(
            r#"{ "id": "M1", "weight": 2000.0, "length": 2.0, "width": 1.5, "height": 1.6 }"#,
        )
        .unwrap();
        assert!(cargo.is_stackable());

        let json = serde_json::to_value(&cargo).unwrap();
        assert_eq!(json["length"], 2.0);
        assert_eq!(json["stackable"], true);
    }

    #[test]
    fn test_validation_on_deserialize() {
        let negative = serde_json::from_str::<CargoItem>(
            r#"{ "id": "M1", "weight": -5.0, "length": 2.0, "width": 1.5, "height": 1.6 }"#,
        );
        assert!(negative.is_err());

        let flat_box = serde_json::from_str::<BoundingBox>(
            r#"{ "origin": [0.0, 0.0, 0.0], "size": [1.0, 0.0, 1.0] }"#,
        );
        assert!(flat_box.is_err());
    }

    #[test]
    fn test_result_round_trip() {
        let bounds =
            BoundingBox::new(Vector3::new(2.0, 0.45, 0.0), Vector3::new(2.0, 1.5, 1.6)).unwrap();
        let result = LoadPlanResult {
            placements: vec![Placement::new("M1", bounds, Rotation::None)],
            stability_score: 95,
            stability_class: StabilityClass::Safe,
            center_of_gravity: Vector3::new(3.0, 1.2, 0.8),
            total_weight: 2000.0,
            load_ratio: 0.4,
            torque: TorqueAnalysis::default(),
            warnings: Vec::new(),
            is_safe: true,
        };

        let json = serde_json::to_string(&result).unwrap();
        let restored: LoadPlanResult = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, result);
    }
}
