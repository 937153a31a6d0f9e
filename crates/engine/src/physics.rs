//! Mass aggregation primitives: center of gravity, total weight and torque.

use std::collections::HashMap;
use u_loadplan_core::{
    CargoItem, Error, Placement, Result, TorqueAnalysis, Vector3, VehicleSpec,
};

/// Cargo lookup by id.
pub type CargoIndex<'a> = HashMap<&'a str, &'a CargoItem>;

/// Builds the id lookup for a cargo list.
///
/// Fails with [`Error::DuplicateCargo`] if two items share an id.
pub fn index_cargo(cargo: &[CargoItem]) -> Result<CargoIndex<'_>> {
    let mut index = HashMap::with_capacity(cargo.len());
    for item in cargo {
        if index.insert(item.id().as_str(), item).is_some() {
            return Err(Error::DuplicateCargo(item.id().clone()));
        }
    }
    Ok(index)
}

fn lookup<'a>(cargo_by_id: &CargoIndex<'a>, placement: &Placement) -> Result<&'a CargoItem> {
    cargo_by_id
        .get(placement.cargo_id.as_str())
        .copied()
        .ok_or_else(|| Error::UnknownCargo(placement.cargo_id.clone()))
}

/// Computes the weight-averaged geometric center of the placed cargo.
///
/// Fails with [`Error::EmptyInput`] when there are no placements, since the
/// center of gravity is undefined.
pub fn centroid_of(placements: &[Placement], cargo_by_id: &CargoIndex<'_>) -> Result<Vector3<f64>> {
    if placements.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut weighted = Vector3::zeros();
    let mut total = 0.0;
    for placement in placements {
        let weight = lookup(cargo_by_id, placement)?.weight();
        weighted += placement.center() * weight;
        total += weight;
    }

    Ok(weighted / total)
}

/// Sums the weight of the placed cargo.
pub fn total_weight(placements: &[Placement], cargo_by_id: &CargoIndex<'_>) -> Result<f64> {
    placements
        .iter()
        .map(|p| lookup(cargo_by_id, p).map(CargoItem::weight))
        .sum()
}

/// Torque proxy: weight times the horizontal distance between the center of
/// gravity and the vehicle center.
pub fn torque(cog: &Vector3<f64>, vehicle_center: &Vector3<f64>, weight: f64) -> f64 {
    let dx = cog.x - vehicle_center.x;
    let dy = cog.y - vehicle_center.y;
    weight * (dx * dx + dy * dy).sqrt()
}

/// Splits the torque proxy into roll (lateral) and pitch (longitudinal) moments.
pub fn torque_analysis(cog: &Vector3<f64>, vehicle: &VehicleSpec, weight: f64) -> TorqueAnalysis {
    let center = vehicle.center();
    TorqueAnalysis {
        roll: weight * (cog.y - center.y).abs(),
        pitch: weight * (cog.x - center.x).abs(),
        horizontal: torque(cog, &center, weight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use u_loadplan_core::Rotation;

    fn cargo() -> Vec<CargoItem> {
        vec![
            CargoItem::new("A", 100.0, 2.0, 2.0, 2.0).unwrap(),
            CargoItem::new("B", 300.0, 2.0, 2.0, 2.0).unwrap(),
        ]
    }

    fn place(item: &CargoItem, x: f64, y: f64, z: f64) -> Placement {
        Placement::for_cargo(item, Vector3::new(x, y, z), Rotation::None).unwrap()
    }

    #[test]
    fn test_centroid_weighted() {
        let cargo = cargo();
        let index = index_cargo(&cargo).unwrap();
        let placements = vec![place(&cargo[0], 0.0, 0.0, 0.0), place(&cargo[1], 4.0, 0.0, 0.0)];

        // Centers at x=1 (100 kg) and x=5 (300 kg)
        let cog = centroid_of(&placements, &index).unwrap();
        assert_relative_eq!(cog.x, 4.0);
        assert_relative_eq!(cog.y, 1.0);
        assert_relative_eq!(cog.z, 1.0);
    }

    #[test]
    fn test_centroid_empty() {
        let cargo = cargo();
        let index = index_cargo(&cargo).unwrap();
        assert_eq!(centroid_of(&[], &index), Err(Error::EmptyInput));
    }

    #[test]
    fn test_centroid_unknown_cargo() {
        let cargo = cargo();
        let index = index_cargo(&cargo).unwrap();
        let stranger = CargoItem::new("Z", 1.0, 1.0, 1.0, 1.0).unwrap();

        let result = centroid_of(&[place(&stranger, 0.0, 0.0, 0.0)], &index);
        assert_eq!(result, Err(Error::UnknownCargo("Z".into())));
    }

    #[test]
    fn test_total_weight() {
        let cargo = cargo();
        let index = index_cargo(&cargo).unwrap();
        let placements = vec![place(&cargo[0], 0.0, 0.0, 0.0), place(&cargo[1], 4.0, 0.0, 0.0)];

        assert_relative_eq!(total_weight(&placements, &index).unwrap(), 400.0);
        assert_relative_eq!(total_weight(&[], &index).unwrap(), 0.0);
    }

    #[test]
    fn test_duplicate_cargo_ids() {
        let cargo = vec![
            CargoItem::new("A", 1.0, 1.0, 1.0, 1.0).unwrap(),
            CargoItem::new("A", 2.0, 1.0, 1.0, 1.0).unwrap(),
        ];
        assert_eq!(
            index_cargo(&cargo).err(),
            Some(Error::DuplicateCargo("A".into()))
        );
    }

    #[test]
    fn test_torque() {
        let center = Vector3::new(3.0, 1.2, 1.3);

        // Vertical offset does not contribute
        assert_relative_eq!(torque(&Vector3::new(3.0, 1.2, 2.5), &center, 1000.0), 0.0);

        // 3-4-5 triangle
        let cog = Vector3::new(3.3, 1.6, 0.0);
        assert_relative_eq!(torque(&cog, &center, 100.0), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_torque_analysis() {
        let vehicle = VehicleSpec::new(6.0, 2.4, 2.6, 5000.0).unwrap();
        let cog = Vector3::new(3.3, 1.6, 1.0);

        let analysis = torque_analysis(&cog, &vehicle, 100.0);
        assert_relative_eq!(analysis.roll, 40.0, epsilon = 1e-9);
        assert_relative_eq!(analysis.pitch, 30.0, epsilon = 1e-9);
        assert_relative_eq!(analysis.horizontal, 50.0, epsilon = 1e-9);
    }
}
