//! Blocking predicate: which items keep a worker from taking another out.
//!
//! Items leave through the door at `y = 0`. An item is blocked by anything
//! resting on it, by anything in its slide corridor towards the door, and by
//! anything in front of it that rises above the worker's reach line.

use u_loading_core::geometry::{overlap_length, EPSILON};
use u_loading_core::PlacedItem;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why one item blocks another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Rests on top of the target.
    Above,
    /// Sits in the target's path to the door.
    SlideCorridor,
    /// Sits in front of the target above the reach line.
    ReachWedge,
}

/// Reach geometry of the worker unloading the container.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReachModel {
    /// Height of the worker's hands at the edge of the reach window.
    pub reach_height: f64,
    /// Reach window depth for an item on the floor.
    pub window_base: f64,
    /// Minimum reach window depth.
    pub window_min: f64,
}

impl Default for ReachModel {
    fn default() -> Self {
        Self {
            reach_height: 180.0,
            window_base: 200.0,
            window_min: 60.0,
        }
    }
}

impl ReachModel {
    /// Creates a reach model.
    pub fn new(reach_height: f64, window_base: f64, window_min: f64) -> Self {
        Self {
            reach_height,
            window_base,
            window_min,
        }
    }

    /// Depth of the reach window in front of an item at height `z`.
    pub fn window(&self, z: f64) -> f64 {
        (self.window_base - z).max(self.window_min)
    }

    /// Classifies how `other` blocks `target`, if it does.
    pub fn blocking_kind(&self, target: &PlacedItem, other: &PlacedItem) -> Option<BlockKind> {
        if other.item_id == target.item_id {
            return None;
        }

        let t = target.cuboid();
        let o = other.cuboid();
        let (t_max, o_max) = (t.max(), o.max());

        let x_overlap = overlap_length(t.min.x, t_max.x, o.min.x, o_max.x) > EPSILON;
        let y_overlap = overlap_length(t.min.y, t_max.y, o.min.y, o_max.y) > EPSILON;

        if x_overlap && y_overlap && o.min.z >= t_max.z - EPSILON {
            return Some(BlockKind::Above);
        }

        let in_front = o_max.y <= t.min.y + EPSILON;
        if !(in_front && x_overlap) {
            return None;
        }

        if overlap_length(t.min.z, t_max.z, o.min.z, o_max.z) > EPSILON {
            return Some(BlockKind::SlideCorridor);
        }

        // Reach line from `reach_height` at the window edge down (or up) to
        // the target's centre height at its front face.
        let front = t.min.y;
        let window = self.window(t.min.z);
        let edge = front - window;
        if o_max.y <= edge + EPSILON {
            return None;
        }

        let centre = target.center_height();
        let line = |y: f64| self.reach_height + (centre - self.reach_height) * (y - edge) / window;
        let near = o_max.y.min(front);
        let far = o.min.y.max(edge);
        let top = o_max.z;

        if top > line(near) + EPSILON || top > line(far) + EPSILON {
            Some(BlockKind::ReachWedge)
        } else {
            None
        }
    }

    /// Returns true if `other` blocks `target`.
    pub fn blocks(&self, target: &PlacedItem, other: &PlacedItem) -> bool {
        self.blocking_kind(target, other).is_some()
    }

    /// Items among `on_board` blocking `target`, front to back and top to
    /// bottom.
    pub fn blocking_items<'a, I>(&self, target: &PlacedItem, on_board: I) -> Vec<&'a PlacedItem>
    where
        I: IntoIterator<Item = &'a PlacedItem>,
    {
        let mut blockers: Vec<&PlacedItem> = on_board
            .into_iter()
            .filter(|other| self.blocks(target, other))
            .collect();
        blockers.sort_by(|a, b| {
            a.y()
                .partial_cmp(&b.y())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.z()
                        .partial_cmp(&a.z())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.item_id.cmp(&b.item_id))
        });
        blockers
    }
}
