//! Placement engine.
//!
//! Finds a feasible position and orientation for one item at a time under a
//! [`PlacementPolicy`] and records accepted placements.
//!
//! # Search space
//!
//! `x` and `y` are scanned on a lattice of `scan_step` units, `z` over the
//! floor and the top faces of placed boxes (no other height can be
//! supported). Each `(z, y)` pair is a row: the boxes overlapping the row's
//! slab are turned into blocked `x` intervals once, so the scan jumps over
//! every lattice position that would overlap the same box. Above the floor
//! the row is further restricted to the `x` spans of possible supporters.
//! The result matches a dense lattice scan.

use crate::occupancy::OccupancyIndex;
use crate::policy::{PlacementPolicy, ScanOrder, Selection};
use crate::section::{section_bounds, section_kinds, Section, SectionKind};
use crate::support::is_supported;
use nalgebra::Vector3;
use std::cmp::Ordering;
use u_loading_core::geometry::{approx, Cuboid, Orientation, EPSILON};
use u_loading_core::{Container, Item, PackingResult, PlacedItem};

/// Relative tolerance for lattice index rounding.
const LATTICE_TOLERANCE: f64 = 1e-9;

/// A feasible placement proposed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Minimum corner.
    pub position: Vector3<f64>,
    /// Chosen orientation.
    pub orientation: Orientation,
    /// Index of the orientation in the policy's orientation set.
    pub orientation_index: usize,
    /// Section the candidate was found in.
    pub section: SectionKind,
    /// Contact score (only computed by best-fit selection).
    pub score: f64,
}

impl Candidate {
    /// Returns the occupied box.
    pub fn cuboid(&self) -> Cuboid {
        Cuboid::new(self.position, self.orientation)
    }
}

/// What the scan does after visiting a feasible position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Continue,
    NextRow,
    Stop,
}

/// Sequential placement engine for one container.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    container: Container,
    policy: PlacementPolicy,
    scan_step: f64,
    occupancy: OccupancyIndex,
    placed: Vec<PlacedItem>,
    unplaced: Vec<Item>,
}

impl PlacementEngine {
    /// Creates an engine for an empty container.
    pub fn new(container: Container, policy: PlacementPolicy, scan_step: f64) -> Self {
        Self {
            container,
            policy,
            scan_step,
            occupancy: OccupancyIndex::new(),
            placed: Vec::new(),
            unplaced: Vec::new(),
        }
    }

    /// Returns the container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Returns the active policy.
    pub fn policy(&self) -> &PlacementPolicy {
        &self.policy
    }

    /// Returns the items placed so far, in load order.
    pub fn placed(&self) -> &[PlacedItem] {
        &self.placed
    }

    /// Returns the items that could not be placed.
    pub fn unplaced(&self) -> &[Item] {
        &self.unplaced
    }

    /// Returns the occupancy index.
    pub fn occupancy(&self) -> &OccupancyIndex {
        &self.occupancy
    }

    /// Placed volume over container volume.
    pub fn utilization(&self) -> f64 {
        self.occupancy.volume() / self.container.volume()
    }

    /// Places an item, or records it as unplaced.
    pub fn place(&mut self, item: &Item) -> Option<&PlacedItem> {
        match self.find_placement(item) {
            Some(candidate) => {
                let placed = PlacedItem::new(
                    item.id(),
                    candidate.position,
                    candidate.orientation,
                    item.zone().clone(),
                    self.placed.len() + 1,
                    item.weight(),
                );
                self.occupancy.insert(placed.cuboid());
                self.placed.push(placed);
                self.placed.last()
            }
            None => {
                self.unplaced.push(item.clone());
                None
            }
        }
    }

    /// Consumes the engine and returns its packing.
    pub fn into_result(self) -> PackingResult {
        let utilization = self.utilization();
        PackingResult {
            placed: self.placed,
            unplaced: self.unplaced,
            utilization,
            ..PackingResult::default()
        }
    }

    /// Finds the placement the policy would choose, without placing.
    pub fn find_placement(&self, item: &Item) -> Option<Candidate> {
        let orientations = self.distinct_orientations(item);
        let levels = self.occupancy.levels();

        section_kinds(self.policy.sectioning.as_ref())
            .into_iter()
            .find_map(|kind| self.search_section(&orientations, &levels, kind))
    }

    /// Contact score of a box: wall contact plus face contact with placed
    /// boxes.
    pub fn contact_score(&self, cuboid: &Cuboid) -> f64 {
        let max = cuboid.max();
        let (dx, dy, dz) = (cuboid.size.x, cuboid.size.y, cuboid.size.z);
        let mut score = 0.0;

        if approx(cuboid.min.x, 0.0) {
            score += dy * dz;
        }
        if approx(max.x, self.container.width()) {
            score += dy * dz;
        }
        if approx(cuboid.min.y, 0.0) {
            score += dx * dz;
        }
        if approx(max.y, self.container.length()) {
            score += dx * dz;
        }
        if approx(cuboid.min.z, 0.0) {
            score += dx * dy;
        }

        score
            + self
                .occupancy
                .boxes()
                .iter()
                .map(|b| cuboid.contact_area(b))
                .sum::<f64>()
    }

    /// Orientations under the policy, duplicates (cubes, square faces)
    /// removed. Keeps the index of the first occurrence.
    fn distinct_orientations(&self, item: &Item) -> Vec<(usize, Orientation)> {
        let mut result: Vec<(usize, Orientation)> = Vec::new();
        for (idx, o) in item.orientations(self.policy.orientations).enumerate() {
            if !result.iter().any(|(_, seen)| seen.approx_eq(&o)) {
                result.push((idx, o));
            }
        }
        result
    }

    fn search_section(
        &self,
        orientations: &[(usize, Orientation)],
        levels: &[f64],
        kind: SectionKind,
    ) -> Option<Candidate> {
        let scan = self.policy.scan;
        let mut best: Option<Candidate> = None;

        for &(orientation_index, orientation) in orientations {
            let mut found: Option<Candidate> = None;
            let section = &section_bounds(
                kind,
                self.container.width(),
                orientation.dx,
                self.policy.sectioning.as_ref(),
            );

            match self.policy.selection {
                Selection::FirstPerOrientation | Selection::FirstFit => {
                    let early_stop = scan == ScanOrder::BottomLeft;
                    self.scan(orientation, section, levels, |position| {
                        let better = found
                            .as_ref()
                            .map_or(true, |f| precedes(scan, &position, &f.position));
                        if better {
                            found = Some(Candidate {
                                position,
                                orientation,
                                orientation_index,
                                section: section.kind,
                                score: 0.0,
                            });
                        }
                        if early_stop {
                            Visit::Stop
                        } else {
                            Visit::NextRow
                        }
                    });
                }
                Selection::BestContact => {
                    self.scan(orientation, section, levels, |position| {
                        let score = self.contact_score(&Cuboid::new(position, orientation));
                        let better = found.as_ref().map_or(true, |f| {
                            score > f.score + EPSILON
                                || (score > f.score - EPSILON
                                    && precedes(scan, &position, &f.position))
                        });
                        if better {
                            found = Some(Candidate {
                                position,
                                orientation,
                                orientation_index,
                                section: section.kind,
                                score,
                            });
                        }
                        Visit::Continue
                    });
                }
            }

            let Some(found) = found else { continue };

            if self.policy.selection == Selection::FirstFit {
                return Some(found);
            }

            let replace = match &best {
                None => true,
                Some(b) => match self.policy.selection {
                    Selection::BestContact => {
                        found.score > b.score + EPSILON
                            || (found.score > b.score - EPSILON
                                && precedes(scan, &found.position, &b.position))
                    }
                    _ => precedes(scan, &found.position, &b.position),
                },
            };
            if replace {
                best = Some(found);
            }
        }

        best
    }

    /// Visits feasible positions for one orientation inside a section.
    ///
    /// Levels are visited bottom-up; rows front-to-back (or back-to-front for
    /// [`ScanOrder::BackToFront`]); positions within a row by ascending `x`.
    fn scan<F>(&self, o: Orientation, section: &Section, levels: &[f64], mut visit: F)
    where
        F: FnMut(Vector3<f64>) -> Visit,
    {
        let step = self.scan_step;
        let container = &self.container;

        let y_span = container.length() - o.dy;
        let x_hi = section.x_max - o.dx;
        if y_span < -EPSILON || !section.fits(section.x_min, o.dx) {
            return;
        }
        let (kx_min, kx_max) = lattice_range(section.x_min, x_hi, step);
        let ky_max = ((y_span / step) + LATTICE_TOLERANCE).floor().max(0.0) as i64;
        let from_back = self.policy.scan == ScanOrder::BackToFront;

        for &z in levels {
            if z + o.dz > container.height() + EPSILON {
                break;
            }
            let on_floor = z <= EPSILON;

            let slab: Vec<&Cuboid> = self
                .occupancy
                .boxes()
                .iter()
                .filter(|b| b.min.z < z + o.dz - EPSILON && b.max().z > z + EPSILON)
                .collect();
            let supporters = if on_floor {
                Vec::new()
            } else {
                self.occupancy.resting_at(z)
            };
            if !on_floor && supporters.is_empty() {
                continue;
            }

            for ky in 0..=ky_max {
                let y = if from_back {
                    y_span - ky as f64 * step
                } else {
                    ky as f64 * step
                };
                let y_hi = y + o.dy;
                let spans_row = |b: &&Cuboid| b.min.y < y_hi - EPSILON && b.max().y > y + EPSILON;

                let row_supporters: Vec<&Cuboid> =
                    supporters.iter().copied().filter(spans_row).collect();
                if !on_floor && row_supporters.is_empty() {
                    continue;
                }

                let blocked: Vec<(f64, f64)> = slab
                    .iter()
                    .copied()
                    .filter(spans_row)
                    .map(|b| (b.min.x - o.dx + EPSILON, b.max().x - EPSILON))
                    .collect();
                let allowed: Option<Vec<(f64, f64)>> = (!on_floor).then(|| {
                    row_supporters
                        .iter()
                        .map(|s| (s.min.x - o.dx, s.max().x))
                        .collect()
                });

                for x in free_positions(kx_min, kx_max, step, allowed, blocked) {
                    let position = Vector3::new(x, y, z);
                    if !on_floor {
                        let cuboid = Cuboid::new(position, o);
                        if !is_supported(
                            &cuboid,
                            row_supporters.iter().copied(),
                            self.policy.support_threshold,
                        ) {
                            continue;
                        }
                    }
                    match visit(position) {
                        Visit::Continue => {}
                        Visit::NextRow => break,
                        Visit::Stop => return,
                    }
                }
            }
        }
    }
}

/// Returns true if `a` comes strictly before `b` in the scan order.
fn precedes(scan: ScanOrder, a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    let asc = |p: f64, q: f64| {
        if approx(p, q) {
            Ordering::Equal
        } else {
            p.partial_cmp(&q).unwrap_or(Ordering::Equal)
        }
    };

    let ordering = match scan {
        ScanOrder::BottomLeft => asc(a.z, b.z)
            .then_with(|| asc(a.y, b.y))
            .then_with(|| asc(a.x, b.x)),
        ScanOrder::LeftToRight => asc(a.x, b.x)
            .then_with(|| asc(a.y, b.y))
            .then_with(|| asc(a.z, b.z)),
        ScanOrder::BackToFront => asc(b.y, a.y)
            .then_with(|| asc(a.x, b.x))
            .then_with(|| asc(a.z, b.z)),
    };

    ordering == Ordering::Less
}

/// Lattice indices `k` with `lo <= k * step <= hi`.
fn lattice_range(lo: f64, hi: f64, step: f64) -> (i64, i64) {
    let k_min = ((lo / step) - LATTICE_TOLERANCE).ceil() as i64;
    let k_max = ((hi / step) + LATTICE_TOLERANCE).floor() as i64;
    (k_min, k_max)
}

/// Merges intervals sorted by start. `touching` also merges intervals that
/// only share an endpoint.
fn merge_intervals(mut intervals: Vec<(f64, f64)>, touching: bool) -> Vec<(f64, f64)> {
    intervals.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match merged.last_mut() {
            Some(last) if start < last.1 || (touching && start <= last.1 + EPSILON) => {
                last.1 = last.1.max(end);
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Lattice positions in `[k_min, k_max]` that fall inside some closed
/// `allowed` interval (all of them when `None`) and inside no open `blocked`
/// interval, ascending.
fn free_positions(
    k_min: i64,
    k_max: i64,
    step: f64,
    allowed: Option<Vec<(f64, f64)>>,
    blocked: Vec<(f64, f64)>,
) -> Vec<f64> {
    let ranges: Vec<(i64, i64)> = match allowed {
        None => vec![(k_min, k_max)],
        Some(allowed) => merge_intervals(allowed, true)
            .into_iter()
            .map(|(a, b)| {
                let (lo, hi) = lattice_range(a, b, step);
                (lo.max(k_min), hi.min(k_max))
            })
            .filter(|(lo, hi)| lo <= hi)
            .collect(),
    };
    let blocked = merge_intervals(blocked, false);

    let mut positions = Vec::new();
    let mut b = 0;
    for (lo, hi) in ranges {
        let mut k = lo;
        while k <= hi {
            let x = k as f64 * step;
            while b < blocked.len() && blocked[b].1 <= x {
                b += 1;
            }
            match blocked.get(b) {
                Some(&(start, end)) if start < x => {
                    let jump = ((end / step) - LATTICE_TOLERANCE).ceil() as i64;
                    k = jump.max(k + 1);
                }
                _ => {
                    positions.push(x);
                    k += 1;
                }
            }
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn item(id: u32, w: f64, l: f64, h: f64) -> Item {
        Item::new(id, w, l, h, 1.0, "po1").unwrap()
    }

    fn engine(policy: PlacementPolicy, w: f64, l: f64, h: f64) -> PlacementEngine {
        PlacementEngine::new(Container::new(w, l, h).unwrap(), policy, 1.0)
    }

    #[test]
    fn test_free_positions_jump_over_blocks() {
        // Blocked x in (1, 4) for an item of width 2 next to a box at [3, 4].
        let xs = free_positions(0, 8, 1.0, None, vec![(1.0 + EPSILON, 4.0 - EPSILON)]);
        assert_eq!(xs, vec![0.0, 1.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_free_positions_restricted_to_allowed() {
        let xs = free_positions(0, 10, 1.0, Some(vec![(2.0, 4.0), (3.0, 5.0)]), vec![]);
        assert_eq!(xs, vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_precedes() {
        let a = Vector3::new(5.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 1.0, 0.0);
        assert!(precedes(ScanOrder::BottomLeft, &a, &b));
        assert!(!precedes(ScanOrder::LeftToRight, &a, &b));
        assert!(precedes(ScanOrder::BackToFront, &b, &a));
        assert!(!precedes(ScanOrder::BottomLeft, &a, &a));
    }

    #[test]
    fn test_blf_fills_floor_first() {
        let mut engine = engine(PlacementPolicy::bottom_left_fill(), 8.0, 8.0, 8.0);
        let first = engine.place(&item(1, 4.0, 4.0, 4.0)).cloned().unwrap();
        let second = engine.place(&item(2, 4.0, 4.0, 4.0)).cloned().unwrap();

        assert_eq!(first.position, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(second.position, Vector3::new(4.0, 0.0, 0.0));
        assert_eq!(second.load_order, 2);
        assert_relative_eq!(engine.utilization(), 0.25);
    }

    #[test]
    fn test_blf_ties_keep_first_orientation() {
        // Every orientation fits at the origin.
        let mut engine = engine(PlacementPolicy::bottom_left_fill(), 10.0, 10.0, 10.0);
        let placed = engine.place(&item(1, 2.0, 3.0, 4.0)).cloned().unwrap();
        assert_eq!(placed.position, Vector3::zeros());
        assert_eq!(placed.orientation, Orientation::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_item_too_large_is_unplaced() {
        let mut engine = engine(PlacementPolicy::bottom_left_fill(), 5.0, 5.0, 5.0);
        assert!(engine.place(&item(1, 10.0, 10.0, 10.0)).is_none());
        assert_eq!(engine.unplaced().len(), 1);
        assert_eq!(engine.utilization(), 0.0);
    }

    #[test]
    fn test_rotation_makes_item_fit() {
        let mut engine = engine(PlacementPolicy::bottom_left_fill(), 4.0, 10.0, 4.0);
        let placed = engine.place(&item(1, 8.0, 2.0, 2.0)).cloned().unwrap();
        assert!(placed.orientation.dy >= 8.0 - EPSILON);
    }

    #[test]
    fn test_stacking_on_full_support() {
        let mut engine = engine(PlacementPolicy::bottom_left_fill(), 4.0, 4.0, 3.0);
        engine.place(&item(1, 4.0, 4.0, 2.0));
        let placed = engine.place(&item(2, 2.0, 2.0, 1.0)).cloned().unwrap();
        assert_eq!(placed.position, Vector3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_overhang_is_rejected() {
        // Only a quarter of the slab would rest on the small box.
        let mut engine = engine(PlacementPolicy::bottom_left_fill(), 4.0, 4.0, 3.0);
        engine.place(&item(1, 2.0, 2.0, 2.0));
        assert!(engine.place(&item(2, 4.0, 4.0, 1.0)).is_none());
    }

    #[test]
    fn test_support_threshold_per_policy() {
        // The slab rests on 80 % of its footprint.
        let strict = PlacementPolicy {
            sectioning: None,
            ..PlacementPolicy::strict_support_subvolume()
        };
        let mut engine_strict = engine(strict, 5.0, 4.0, 4.0);
        engine_strict.place(&item(1, 4.0, 4.0, 2.0));
        assert!(engine_strict.find_placement(&item(2, 5.0, 4.0, 1.0)).is_none());

        let mut engine_blf = engine(PlacementPolicy::bottom_left_fill(), 5.0, 4.0, 4.0);
        engine_blf.place(&item(1, 4.0, 4.0, 2.0));
        let candidate = engine_blf.find_placement(&item(2, 5.0, 4.0, 1.0)).unwrap();
        assert_relative_eq!(candidate.position.z, 2.0);
    }

    #[test]
    fn test_strict_first_fit_stacks_before_moving_right() {
        let mut engine = engine(PlacementPolicy::strict_support_subvolume(), 20.0, 10.0, 10.0);
        engine.place(&item(1, 2.0, 2.0, 2.0));
        let second = engine.place(&item(2, 2.0, 2.0, 2.0)).cloned().unwrap();
        assert_eq!(second.position, Vector3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_rotated_item_bridges_sections() {
        // Only the (40, 5, 5) orientation fits, and only across the boundary
        // at x = 70.
        let mut engine = engine(PlacementPolicy::back_to_front_best_fit(), 100.0, 10.0, 5.0);
        let slab = engine.place(&item(1, 45.0, 10.0, 5.0)).cloned().unwrap();
        assert_relative_eq!(slab.position.x, 0.0);

        let candidate = engine.find_placement(&item(2, 5.0, 40.0, 5.0)).unwrap();
        assert_eq!(candidate.section, SectionKind::Bridge);
        assert_relative_eq!(candidate.orientation.dx, 40.0);
        assert!(candidate.position.x >= 45.0 - EPSILON);
        assert!(candidate.position.x + 40.0 <= 100.0 + EPSILON);
    }

    #[test]
    fn test_large_section_first_for_every_zone() {
        let engine = engine(PlacementPolicy::back_to_front_best_fit(), 100.0, 20.0, 10.0);
        for zone in ["po1", "po3", "dock"] {
            let it = Item::new(1, 10.0, 10.0, 5.0, 1.0, zone).unwrap();
            let candidate = engine.find_placement(&it).unwrap();
            assert_eq!(candidate.section, SectionKind::Large);
            assert!(candidate.position.x + candidate.orientation.dx <= 70.0 + EPSILON);
        }
    }

    #[test]
    fn test_best_fit_starts_in_back_corner() {
        let mut engine = engine(PlacementPolicy::back_to_front_best_fit(), 20.0, 30.0, 10.0);
        let placed = engine.place(&item(1, 4.0, 5.0, 3.0)).cloned().unwrap();
        assert_relative_eq!(placed.position.x, 0.0);
        assert_relative_eq!(placed.position.z, 0.0);
        assert_relative_eq!(placed.position.y + placed.orientation.dy, 30.0);
    }

    #[test]
    fn test_best_fit_packs_against_neighbours() {
        let mut engine = engine(PlacementPolicy::back_to_front_best_fit(), 20.0, 30.0, 10.0);
        engine.place(&item(1, 4.0, 5.0, 3.0));
        let second = engine.place(&item(2, 4.0, 5.0, 3.0)).cloned().unwrap();
        let first = engine.placed()[0].cuboid();
        assert!(first.contact_area(&second.cuboid()) > 0.0);
        assert!(!first.overlaps(&second.cuboid()));
    }

    #[test]
    fn test_sectioned_policy_keeps_items_in_one_section() {
        let mut engine = engine(PlacementPolicy::strict_support_subvolume(), 10.0, 4.0, 2.0);
        for id in 1..=5 {
            engine.place(&item(id, 2.0, 4.0, 2.0));
        }
        let boundary = 7.0;
        for p in engine.placed() {
            let max_x = p.x() + p.orientation.dx;
            assert!(max_x <= boundary + EPSILON || p.x() >= boundary - EPSILON);
        }
        // Three fit in [0, 7) and one in [7, 10).
        assert_eq!(engine.placed().len(), 4);
    }

    #[test]
    fn test_contact_score() {
        let engine = engine(PlacementPolicy::back_to_front_best_fit(), 10.0, 10.0, 10.0);
        let corner = Cuboid::from_coords(0.0, 0.0, 0.0, 2.0, 3.0, 4.0);
        // x = 0 face 3*4, y = 0 face 2*4, floor 2*3
        assert_relative_eq!(engine.contact_score(&corner), 12.0 + 8.0 + 6.0);
    }
}
