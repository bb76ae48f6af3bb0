//! Unloading operations and the report they form.

use nalgebra::Vector3;
use std::fmt;
use u_loading_core::{ItemId, Zone};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of handling step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    /// Item leaves the container at its destination.
    Unload,
    /// Item of a later zone is taken out to clear the way.
    TemporarilyUnload,
    /// Temporarily unloaded item goes back in after the zone is done.
    Reload,
    /// Item of the active zone is taken out while clearing the way.
    UnloadBlockingItem,
    /// Temporarily unloaded item goes back in right after the item it blocked.
    ReloadBlockingItem,
}

impl Action {
    /// Returns true for either reload kind.
    pub fn is_reload(&self) -> bool {
        matches!(self, Action::Reload | Action::ReloadBlockingItem)
    }

    /// Returns true if the item leaves the container for good.
    pub fn is_final(&self) -> bool {
        matches!(self, Action::Unload | Action::UnloadBlockingItem)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Unload => "Unload",
            Action::TemporarilyUnload => "Temporarily unload",
            Action::Reload => "Reload",
            Action::UnloadBlockingItem => "Unload blocking item",
            Action::ReloadBlockingItem => "Reload blocking item",
        };
        f.write_str(name)
    }
}

/// One logged handling step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operation {
    /// What happened.
    pub action: Action,
    /// Item handled.
    pub item_id: ItemId,
    /// Destination zone of the item.
    pub zone: Zone,
    /// Position of the item in the container.
    pub position: Vector3<f64>,
    /// Global 1-based sequence number.
    pub unload_order: usize,
    /// Cost charged for the step.
    pub cost: f64,
}

/// Operations performed while the container stands at one zone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnloadStep {
    /// Zone being served.
    pub zone: Zone,
    /// Operations in execution order.
    pub operations: Vec<Operation>,
}

impl UnloadStep {
    /// Creates an empty step for a zone.
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            operations: Vec::new(),
        }
    }

    /// Sum of the operation costs.
    pub fn cost(&self) -> f64 {
        self.operations.iter().map(|op| op.cost).sum()
    }
}

/// Result of an unload simulation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnloadReport {
    /// One step per zone, in processing order.
    pub steps: Vec<UnloadStep>,
    /// Number of logged operations.
    pub total_operations: usize,
    /// Sum of all operation costs.
    pub unloading_cost: f64,
    /// Number of reloads of either kind.
    pub reloading_count: usize,
}

impl UnloadReport {
    /// Builds a report from its steps.
    pub fn from_steps(steps: Vec<UnloadStep>) -> Self {
        let operations = || steps.iter().flat_map(|s| s.operations.iter());
        let total_operations = operations().count();
        let unloading_cost = operations().map(|op| op.cost).sum();
        let reloading_count = operations().filter(|op| op.action.is_reload()).count();

        Self {
            steps,
            total_operations,
            unloading_cost,
            reloading_count,
        }
    }

    /// Iterates over all operations in execution order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.steps.iter().flat_map(|s| s.operations.iter())
    }

    /// Number of operations of the given kind.
    pub fn count(&self, action: Action) -> usize {
        self.operations().filter(|op| op.action == action).count()
    }
}
