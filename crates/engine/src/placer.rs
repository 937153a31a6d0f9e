//! Greedy balance-seeking placement search.
//!
//! Items are placed heaviest-first. Each item goes to the floor position that
//! keeps the running center of gravity closest to the ideal center, measured
//! by the stability scorer's weighted deviation. Floor space is tracked as a
//! set of free rectangles (see [`crate::free_space`]). When no floor position
//! fits, the item is stacked on the least-loaded column that can carry it.
//!
//! Besides the rectangle corners, the search tries anchors that center the
//! item on the ideal center, slide it from there against a rectangle edge, or
//! pull the running center back onto the ideal center. Off-corner anchors can
//! fragment the floor, so a candidate is only committed when a corner-only
//! greedy pass can still load the remaining cargo after it. Completions that
//! keep everything on the floor are preferred over ones that need stacking.
//! If no candidate admits a completion, the most balanced one is taken.
//!
//! The search is a single deterministic pass and is not globally optimal.

use crate::free_space::FreeSpace;
use crate::physics;
use crate::stability::StabilityScorer;
use std::cmp::Ordering;
use u_loadplan_core::{
    CargoItem, Config, Error, InfeasibleReason, Placement, Result, Rotation, Vector3, VehicleSpec,
    EPSILON,
};

/// A candidate position for the item being placed.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    /// Index of the free rectangle the candidate lies in.
    rect_index: usize,
    origin: Vector3<f64>,
    rotation: Rotation,
    /// Weighted deviation of the running COG including the item.
    deviation: f64,
    /// Distance of the item center from the longitudinal center.
    longitudinal_offset: f64,
    /// Distance of the item center from the lateral center.
    lateral_offset: f64,
}

/// Which anchors to enumerate inside each free rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchors {
    /// Rectangle corners only.
    Corners,
    /// Corners plus the centering, edge and balancing anchors.
    Balanced,
}

/// A pile of cargo rooted on one floor placement.
#[derive(Debug, Clone)]
struct StackColumn {
    /// Index of the topmost placement.
    top: usize,
    /// Whether the topmost item accepts load.
    top_stackable: bool,
    /// Total weight of the column.
    weight: f64,
}

/// A stacking position: column index, origin and rotation.
type StackPosition = (usize, Vector3<f64>, Rotation);

/// Running state of the search.
#[derive(Clone)]
struct SearchState<'a> {
    vehicle: &'a VehicleSpec,
    scorer: StabilityScorer,
    ideal: Vector3<f64>,
    allow_stacking: bool,
    free: FreeSpace,
    placements: Vec<Placement>,
    columns: Vec<StackColumn>,
    weighted_center: Vector3<f64>,
    total_weight: f64,
}

impl<'a> SearchState<'a> {
    fn new(vehicle: &'a VehicleSpec, config: &Config) -> Self {
        let scorer = StabilityScorer::new(config.scoring.clone());
        let ideal = scorer.ideal_center(vehicle);

        Self {
            vehicle,
            scorer,
            ideal,
            allow_stacking: config.allow_stacking,
            free: FreeSpace::new(vehicle.length(), vehicle.width()),
            placements: Vec::new(),
            columns: Vec::new(),
            weighted_center: Vector3::zeros(),
            total_weight: 0.0,
        }
    }

    /// Weighted deviation of the running COG if `item` were placed at `origin`.
    fn deviation_with(&self, item: &CargoItem, origin: &Vector3<f64>, size: &Vector3<f64>) -> f64 {
        let center = *origin + *size / 2.0;
        let cog =
            (self.weighted_center + center * item.weight()) / (self.total_weight + item.weight());
        self.scorer.deviation(&cog, self.vehicle).weighted
    }

    /// Anchor whose item center pulls the running horizontal COG onto the ideal center.
    fn balancing_anchor(&self, item: &CargoItem, size: &Vector3<f64>) -> (f64, f64) {
        let weight = item.weight();
        let combined = self.total_weight + weight;
        let center_x = (self.ideal.x * combined - self.weighted_center.x) / weight;
        let center_y = (self.ideal.y * combined - self.weighted_center.y) / weight;
        (center_x - size.x / 2.0, center_y - size.y / 2.0)
    }

    /// Enumerates floor candidates in rectangle, rotation, anchor order.
    fn floor_candidates(&self, item: &CargoItem, anchors: Anchors) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (rect_index, rect) in self.free.rects().iter().enumerate() {
            for &rotation in orientations(item) {
                let size = item.oriented_dimensions(rotation);
                if !rect.fits(size.x, size.y) {
                    continue;
                }

                let mut points = rect.corners(size.x, size.y).to_vec();
                if anchors == Anchors::Balanced {
                    let ideal_x = self.ideal.x - size.x / 2.0;
                    let ideal_y = self.ideal.y - size.y / 2.0;
                    let (bx, by) = self.balancing_anchor(item, &size);

                    points.extend(rect.edge_anchors(ideal_x, ideal_y, size.x, size.y));
                    points.push(rect.clamp_anchor(ideal_x, ideal_y, size.x, size.y));
                    points.push(rect.clamp_anchor(bx, by, size.x, size.y));
                }

                for (x, y) in points {
                    let origin = Vector3::new(x, y, 0.0);
                    let center = origin + size / 2.0;
                    candidates.push(Candidate {
                        rect_index,
                        origin,
                        rotation,
                        deviation: self.deviation_with(item, &origin, &size),
                        longitudinal_offset: (center.x - self.vehicle.length() / 2.0).abs(),
                        lateral_offset: (center.y - self.vehicle.width() / 2.0).abs(),
                    });
                }
            }
        }

        candidates
    }

    /// Picks the floor candidate for `item`, given the cargo still to load after it.
    fn choose_floor(&self, item: &CargoItem, rest: &[&CargoItem]) -> Option<Candidate> {
        let mut candidates = self.floor_candidates(item, Anchors::Balanced);
        if candidates.is_empty() || rest.is_empty() {
            return take_best(&mut candidates);
        }

        let mut passes = Vec::with_capacity(2);
        if self.floor_can_hold(item, rest) {
            passes.push(false);
        }
        if self.allow_stacking {
            passes.push(true);
        }

        for stacking in passes {
            let mut pool = candidates.clone();
            while let Some(candidate) = take_best(&mut pool) {
                if self.completes_with(item, &candidate, rest, stacking) {
                    return Some(candidate);
                }
            }
        }

        take_best(&mut candidates)
    }

    /// Whether the free floor area could still hold `item` and every footprint in `rest`.
    fn floor_can_hold(&self, item: &CargoItem, rest: &[&CargoItem]) -> bool {
        let needed: f64 = rest.iter().map(|c| footprint_area(c)).sum();
        self.free.total_area() - footprint_area(item) + EPSILON >= needed
    }

    /// Runs a corner-only greedy pass over `rest` after placing `item` at `candidate`.
    fn completes_with(
        &self,
        item: &CargoItem,
        candidate: &Candidate,
        rest: &[&CargoItem],
        stacking: bool,
    ) -> bool {
        let mut trial = self.clone();
        if trial.place_on_floor(item, candidate).is_err() {
            return false;
        }

        rest.iter().all(|&next| {
            if let Some(c) = take_best(&mut trial.floor_candidates(next, Anchors::Corners)) {
                return trial.place_on_floor(next, &c).is_ok();
            }
            if !stacking {
                return false;
            }
            match trial.best_stack_position(next) {
                Some(position) => trial.place_on_stack(next, position).is_ok(),
                None => false,
            }
        })
    }

    /// Finds the least-loaded column that can carry `item`.
    fn best_stack_position(&self, item: &CargoItem) -> Option<StackPosition> {
        let mut best: Option<StackPosition> = None;
        let mut best_weight = f64::INFINITY;

        for (column_index, column) in self.columns.iter().enumerate() {
            if !column.top_stackable || column.weight >= best_weight - EPSILON {
                continue;
            }

            let support = &self.placements[column.top].bounds;
            let support_size = support.size();
            let support_center = support.center();

            for &rotation in orientations(item) {
                let size = item.oriented_dimensions(rotation);
                let contained = size.x <= support_size.x + EPSILON
                    && size.y <= support_size.y + EPSILON;
                let clears_roof = support.top() + size.z <= self.vehicle.height() + EPSILON;

                if contained && clears_roof {
                    let origin = Vector3::new(
                        support_center.x - size.x / 2.0,
                        support_center.y - size.y / 2.0,
                        support.top(),
                    );
                    best = Some((column_index, origin, rotation));
                    best_weight = column.weight;
                    break;
                }
            }
        }

        best
    }

    /// Places `item` on the floor and opens a new stack column on it.
    fn place_on_floor(&mut self, item: &CargoItem, candidate: &Candidate) -> Result<()> {
        let placement = Placement::for_cargo(item, candidate.origin, candidate.rotation)?;
        let size = *placement.size();

        self.free.occupy(
            candidate.rect_index,
            candidate.origin.x,
            candidate.origin.y,
            size.x,
            size.y,
        );
        self.columns.push(StackColumn {
            top: self.placements.len(),
            top_stackable: item.is_stackable(),
            weight: item.weight(),
        });
        self.commit(item, placement);
        Ok(())
    }

    /// Places `item` on top of a stack column.
    fn place_on_stack(&mut self, item: &CargoItem, position: StackPosition) -> Result<()> {
        let (column_index, origin, rotation) = position;
        let placement = Placement::for_cargo(item, origin, rotation)?;

        let top = self.placements.len();
        let column = &mut self.columns[column_index];
        column.top = top;
        column.top_stackable = item.is_stackable();
        column.weight += item.weight();
        self.commit(item, placement);
        Ok(())
    }

    fn commit(&mut self, item: &CargoItem, placement: Placement) {
        self.weighted_center += placement.center() * item.weight();
        self.total_weight += item.weight();
        self.placements.push(placement);
    }
}

/// Places every cargo item inside the vehicle.
///
/// Returns placements in loading order (heaviest first), or
/// [`Error::Infeasible`] naming the first item that cannot be placed.
pub fn place(
    vehicle: &VehicleSpec,
    cargo: &[CargoItem],
    config: &Config,
) -> Result<Vec<Placement>> {
    if cargo.is_empty() {
        return Err(Error::EmptyInput);
    }
    physics::index_cargo(cargo)?;

    let order = loading_order(cargo);
    check_capacity(vehicle, cargo, &order)?;
    check_dimensions(vehicle, cargo, &order)?;

    let items: Vec<&CargoItem> = order.iter().map(|&i| &cargo[i]).collect();
    let mut state = SearchState::new(vehicle, config);

    for (k, &item) in items.iter().enumerate() {
        if let Some(candidate) = state.choose_floor(item, &items[k + 1..]) {
            log::trace!(
                "Placed '{}' on the floor at ({:.3}, {:.3}), rotation {} deg, deviation {:.4}",
                item.id(),
                candidate.origin.x,
                candidate.origin.y,
                candidate.rotation.degrees(),
                candidate.deviation
            );
            state.place_on_floor(item, &candidate)?;
            continue;
        }

        if !state.allow_stacking {
            return Err(no_space(item));
        }

        let Some(position) = state.best_stack_position(item) else {
            return Err(no_space(item));
        };

        log::trace!(
            "No floor space for '{}', stacking on column {} at z = {:.3}",
            item.id(),
            position.0,
            position.1.z
        );
        state.place_on_stack(item, position)?;
    }

    Ok(state.placements)
}

/// Indices of `cargo` sorted heaviest-first; equal weights keep input order.
pub fn loading_order(cargo: &[CargoItem]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..cargo.len()).collect();
    order.sort_by(|&a, &b| cargo[b].weight().total_cmp(&cargo[a].weight()));
    order
}

fn check_capacity(vehicle: &VehicleSpec, cargo: &[CargoItem], order: &[usize]) -> Result<()> {
    let total: f64 = cargo.iter().map(CargoItem::weight).sum();
    if total <= vehicle.max_load() {
        return Ok(());
    }

    let mut running = 0.0;
    for &i in order {
        running += cargo[i].weight();
        if running > vehicle.max_load() {
            return Err(Error::Infeasible {
                cargo_id: cargo[i].id().clone(),
                reason: InfeasibleReason::Overweight {
                    total,
                    max_load: vehicle.max_load(),
                },
            });
        }
    }

    Ok(())
}

fn check_dimensions(vehicle: &VehicleSpec, cargo: &[CargoItem], order: &[usize]) -> Result<()> {
    for &i in order {
        let item = &cargo[i];
        let dims = item.dimensions();

        let fits_floor = Rotation::ALL.iter().any(|&rotation| {
            let size = item.oriented_dimensions(rotation);
            size.x <= vehicle.length() + EPSILON && size.y <= vehicle.width() + EPSILON
        });
        if !fits_floor {
            return Err(Error::Infeasible {
                cargo_id: item.id().clone(),
                reason: InfeasibleReason::FootprintTooLarge,
            });
        }

        if dims.z > vehicle.height() + EPSILON {
            return Err(Error::Infeasible {
                cargo_id: item.id().clone(),
                reason: InfeasibleReason::TooTall,
            });
        }
    }

    Ok(())
}

fn no_space(item: &CargoItem) -> Error {
    Error::Infeasible {
        cargo_id: item.id().clone(),
        reason: InfeasibleReason::NoSpace,
    }
}

/// Distinct orientations of an item; a square footprint has only one.
fn orientations(item: &CargoItem) -> &'static [Rotation] {
    let dims = item.dimensions();
    if (dims.x - dims.y).abs() <= EPSILON {
        &[Rotation::None]
    } else {
        &Rotation::ALL
    }
}

fn footprint_area(item: &CargoItem) -> f64 {
    let dims = item.dimensions();
    dims.x * dims.y
}

/// Removes and returns the best candidate; full ties keep enumeration order.
fn take_best(candidates: &mut Vec<Candidate>) -> Option<Candidate> {
    let mut best: Option<usize> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        match best {
            Some(current) if !is_better(candidate, &candidates[current]) => {}
            _ => best = Some(i),
        }
    }
    best.map(|i| candidates.remove(i))
}

/// Compares candidates: lower deviation, then closer to the longitudinal
/// center, then closer to the lateral center, then lower z. Full ties keep
/// the earlier candidate.
fn is_better(new: &Candidate, current: &Candidate) -> bool {
    let keys = [
        (new.deviation, current.deviation),
        (new.longitudinal_offset, current.longitudinal_offset),
        (new.lateral_offset, current.lateral_offset),
        (new.origin.z, current.origin.z),
    ];

    for (a, b) in keys {
        match compare_with_epsilon(a, b) {
            Ordering::Less => return true,
            Ordering::Greater => return false,
            Ordering::Equal => {}
        }
    }

    false
}

fn compare_with_epsilon(a: f64, b: f64) -> Ordering {
    if (a - b).abs() <= EPSILON {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}
