//! Occupancy index over the boxes already placed in a container.
//!
//! Boxes are kept in placement order and additionally bucketed by the height
//! of their top face, which is what support and candidate-height queries
//! look up.

use std::collections::BTreeMap;
use u_loading_core::geometry::{approx, Cuboid};

/// Resolution of the top-face buckets.
const HEIGHT_KEY_SCALE: f64 = 1e6;

fn height_key(z: f64) -> i64 {
    (z * HEIGHT_KEY_SCALE).round() as i64
}

/// Placed boxes with a top-face height index.
#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    boxes: Vec<Cuboid>,
    by_top: BTreeMap<i64, Vec<usize>>,
}

impl OccupancyIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placed box.
    pub fn insert(&mut self, cuboid: Cuboid) {
        let idx = self.boxes.len();
        self.by_top
            .entry(height_key(cuboid.top()))
            .or_default()
            .push(idx);
        self.boxes.push(cuboid);
    }

    /// Returns all placed boxes in insertion order.
    pub fn boxes(&self) -> &[Cuboid] {
        &self.boxes
    }

    /// Returns the number of placed boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true if nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Returns the boxes whose top face is exactly at height `z`.
    pub fn resting_at(&self, z: f64) -> Vec<&Cuboid> {
        let key = height_key(z);
        self.by_top
            .range(key - 1..=key + 1)
            .flat_map(|(_, ids)| ids.iter().map(|&i| &self.boxes[i]))
            .filter(|b| approx(b.top(), z))
            .collect()
    }

    /// Candidate bottom heights: the floor plus every distinct top face,
    /// ascending.
    pub fn levels(&self) -> Vec<f64> {
        let mut levels = vec![0.0];
        for ids in self.by_top.values() {
            let z = self.boxes[ids[0]].top();
            if levels.last().map_or(true, |last| !approx(*last, z)) {
                levels.push(z);
            }
        }
        levels
    }

    /// Returns the first placed box whose interior intersects `cuboid`.
    pub fn first_overlap(&self, cuboid: &Cuboid) -> Option<&Cuboid> {
        self.boxes.iter().find(|b| b.overlaps(cuboid))
    }

    /// Returns true if `cuboid` intersects no placed box.
    pub fn is_free(&self, cuboid: &Cuboid) -> bool {
        self.first_overlap(cuboid).is_none()
    }

    /// Total placed volume.
    pub fn volume(&self) -> f64 {
        self.boxes.iter().map(Cuboid::volume).sum()
    }
}
