//! Packing result representation.

use crate::item::{Item, ItemId};
use crate::placement::PlacedItem;
use crate::solver::PackingMethod;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a packing run.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackingResult {
    /// Placed items, in load order.
    pub placed: Vec<PlacedItem>,

    /// Items that could not be placed, with their full data.
    pub unplaced: Vec<Item>,

    /// Utilization ratio (0.0 - 1.0).
    /// Calculated as: total placed volume / container volume
    pub utilization: f64,

    /// Method used for packing.
    pub method: Option<PackingMethod>,

    /// Number of optimizer iterations that were run.
    pub iterations_run: usize,

    /// Index (0-based) of the iteration that produced this result.
    pub best_iteration: usize,

    /// Best utilization seen after each iteration.
    pub utilization_history: Vec<f64>,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl PackingResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if all items were placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Returns the number of placed items.
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// Returns the number of unplaced items.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Returns true if at least one item was placed.
    pub fn is_successful(&self) -> bool {
        !self.placed.is_empty()
    }

    /// Returns the total volume of the placed items.
    pub fn placed_volume(&self) -> f64 {
        self.placed.iter().map(PlacedItem::volume).sum()
    }

    /// Looks up the placement of an item.
    pub fn get(&self, id: ItemId) -> Option<&PlacedItem> {
        self.placed.iter().find(|p| p.item_id == id)
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.utilization * 100.0)
    }

    /// Sets the packing method.
    pub fn with_method(mut self, method: PackingMethod) -> Self {
        self.method = Some(method);
        self
    }
}

/// Summary statistics for a packing result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackingSummary {
    /// Total items requested.
    pub total_requested: usize,
    /// Total items placed.
    pub total_placed: usize,
    /// Utilization percentage.
    pub utilization_percent: f64,
    /// Optimizer iterations run.
    pub iterations: usize,
    /// Computation time in milliseconds.
    pub time_ms: u64,
    /// Method used.
    pub method: String,
}

impl From<&PackingResult> for PackingSummary {
    fn from(result: &PackingResult) -> Self {
        Self {
            total_requested: result.placed.len() + result.unplaced.len(),
            total_placed: result.placed.len(),
            utilization_percent: result.utilization * 100.0,
            iterations: result.iterations_run,
            time_ms: result.computation_time_ms,
            method: result
                .method
                .map(|m| m.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }
}
