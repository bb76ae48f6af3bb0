//! Handling cost model.

use u_loading_core::PlacedItem;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cost of taking items out of the container.
///
/// Taking an item out costs `base`, plus a term growing with its depth from
/// the door, plus a term growing with the distance between its centre and
/// the worker's comfortable reach height. Temporary unloads and reloads are
/// charged the flat `handling_cost`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostModel {
    pub base: f64,
    pub depth_coefficient: f64,
    pub height_coefficient: f64,
    /// Divides lengths before they are weighted.
    pub unit_scale: f64,
    pub handling_cost: f64,
    pub reach_height: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            base: 1.0,
            depth_coefficient: 1.0,
            height_coefficient: 1.0,
            unit_scale: 100.0,
            handling_cost: 1.0,
            reach_height: 180.0,
        }
    }
}

impl CostModel {
    /// Flat cost for every operation.
    pub fn flat(cost: f64) -> Self {
        Self {
            base: cost,
            depth_coefficient: 0.0,
            height_coefficient: 0.0,
            handling_cost: cost,
            ..Self::default()
        }
    }

    pub fn with_handling_cost(mut self, cost: f64) -> Self {
        self.handling_cost = cost;
        self
    }

    pub fn with_reach_height(mut self, height: f64) -> Self {
        self.reach_height = height;
        self
    }

    /// Cost of unloading `item` for good.
    pub fn unload_cost(&self, item: &PlacedItem) -> f64 {
        let depth = item.y() / self.unit_scale;
        let height = (self.reach_height - item.center_height()).abs() / self.unit_scale;
        self.base + self.depth_coefficient * depth + self.height_coefficient * height
    }

    /// Cost of a temporary unload or a reload.
    pub fn handling_cost(&self) -> f64 {
        self.handling_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use u_loading_core::{Orientation, Zone};

    fn placed(y: f64, z: f64, h: f64) -> PlacedItem {
        PlacedItem::new(
            1,
            Vector3::new(0.0, y, z),
            Orientation::new(10.0, 10.0, h),
            Zone::new("po1"),
            1,
            1.0,
        )
    }

    #[test]
    fn test_unload_cost() {
        let model = CostModel::default();
        // Centre at 180: only depth counts.
        assert_relative_eq!(model.unload_cost(&placed(250.0, 160.0, 40.0)), 3.5);
        // Floor item at the door: centre 20 is 160 below reach.
        assert_relative_eq!(model.unload_cost(&placed(0.0, 0.0, 40.0)), 2.6);
        // Above reach counts the same as below.
        assert_relative_eq!(model.unload_cost(&placed(0.0, 220.0, 20.0)), 1.5);
    }

    #[test]
    fn test_flat_model() {
        let model = CostModel::flat(1.0);
        assert_relative_eq!(model.unload_cost(&placed(250.0, 0.0, 40.0)), 1.0);
        assert_relative_eq!(model.handling_cost(), 1.0);
    }
}
