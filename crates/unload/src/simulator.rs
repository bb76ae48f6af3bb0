//! Zone-by-zone unload simulation.

use crate::cost::CostModel;
use crate::operation::{Action, Operation, UnloadReport, UnloadStep};
use crate::reach::ReachModel;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use u_loading_core::{Error, ItemId, PlacedItem, Result, Zone};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which the container visits its destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneOrder(Vec<Zone>);

impl ZoneOrder {
    /// Creates an order from zone labels. Repeated zones are rejected.
    pub fn new<I, Z>(zones: I) -> Result<Self>
    where
        I: IntoIterator<Item = Z>,
        Z: Into<Zone>,
    {
        let zones: Vec<Zone> = zones.into_iter().map(Into::into).collect();
        for (i, zone) in zones.iter().enumerate() {
            if zones[..i].contains(zone) {
                return Err(Error::InvalidConfig(format!(
                    "Zone {} appears twice in the zone order",
                    zone
                )));
            }
        }
        Ok(Self(zones))
    }

    /// Distinct zones in natural order (`po1`, `po2`, ...).
    pub fn natural<I>(zones: I) -> Self
    where
        I: IntoIterator<Item = Zone>,
    {
        let mut zones: Vec<Zone> = zones.into_iter().collect();
        zones.sort();
        zones.dedup();
        Self(zones)
    }

    /// Distinct zones of the placed items in natural order.
    pub fn from_items(placed: &[PlacedItem]) -> Self {
        Self::natural(placed.iter().map(|p| p.zone.clone()))
    }

    pub fn zones(&self) -> &[Zone] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of a zone in the order.
    pub fn position(&self, zone: &Zone) -> Option<usize> {
        self.0.iter().position(|z| z == zone)
    }

    /// Checks that every placed item is headed for a zone of this order.
    pub fn check(&self, placed: &[PlacedItem]) -> Result<()> {
        match placed.iter().find(|p| self.position(&p.zone).is_none()) {
            Some(p) => Err(Error::InvalidConfig(format!(
                "Zone {} of item {} is not in the zone order",
                p.zone, p.item_id
            ))),
            None => Ok(()),
        }
    }
}

/// When temporarily unloaded items go back into the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReloadPolicy {
    /// Once the current zone is done, except after the last zone.
    #[default]
    AfterZone,
    /// Right after the item they were blocking has left.
    AfterEachItem,
}

/// Which items are checked when looking for blockers of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlockerScope {
    /// Every item not yet unloaded for good. Items set aside earlier in the
    /// zone still count and are handled again, each handling queueing its
    /// own reload.
    #[default]
    Remaining,
    /// Only items physically in the container.
    OnBoard,
}

/// Unload simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnloadConfig {
    pub reach: ReachModel,
    pub cost: CostModel,
    pub reload_policy: ReloadPolicy,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocker_scope: BlockerScope,
}

impl UnloadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reach(mut self, reach: ReachModel) -> Self {
        self.reach = reach;
        self
    }

    pub fn with_cost(mut self, cost: CostModel) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_reload_policy(mut self, policy: ReloadPolicy) -> Self {
        self.reload_policy = policy;
        self
    }

    pub fn with_blocker_scope(mut self, scope: BlockerScope) -> Self {
        self.blocker_scope = scope;
        self
    }
}

/// Simulates unloading a packed container destination by destination.
#[derive(Debug, Clone, Default)]
pub struct UnloadSimulator {
    config: UnloadConfig,
}

/// Mutable state of one simulation run.
struct Run<'a> {
    on_board: BTreeMap<ItemId, &'a PlacedItem>,
    next_order: usize,
}

impl<'a> Run<'a> {
    fn record(&mut self, step: &mut UnloadStep, action: Action, item: &PlacedItem, cost: f64) {
        step.operations.push(Operation {
            action,
            item_id: item.item_id,
            zone: item.zone.clone(),
            position: item.position,
            unload_order: self.next_order,
            cost,
        });
        self.next_order += 1;
    }

    /// Items on board plus the `held` ones set aside, each once.
    fn snapshot(&self, held: &[&'a PlacedItem]) -> Vec<&'a PlacedItem> {
        let mut items = self.on_board.clone();
        for item in held {
            items.insert(item.item_id, item);
        }
        items.into_values().collect()
    }
}

impl UnloadSimulator {
    pub fn new(config: UnloadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UnloadConfig {
        &self.config
    }

    /// Items blocking `item_id` while the whole layout is on board.
    pub fn blockers_of<'a>(
        &self,
        placed: &'a [PlacedItem],
        item_id: ItemId,
    ) -> Result<Vec<&'a PlacedItem>> {
        let target = placed
            .iter()
            .find(|p| p.item_id == item_id)
            .ok_or(Error::UnknownItem(item_id))?;
        Ok(self.config.reach.blocking_items(target, placed))
    }

    /// Unloads `placed` visiting the zones in `order` and logs every
    /// handling step.
    pub fn simulate(&self, placed: &[PlacedItem], order: &ZoneOrder) -> Result<UnloadReport> {
        order.check(placed)?;

        let mut on_board = BTreeMap::new();
        for p in placed {
            if on_board.insert(p.item_id, p).is_some() {
                return Err(Error::InvalidItem(format!(
                    "Item {} is placed twice",
                    p.item_id
                )));
            }
        }

        let mut run = Run {
            on_board,
            next_order: 1,
        };
        let mut steps = Vec::with_capacity(order.len());

        for (index, zone) in order.zones().iter().enumerate() {
            let is_last = index + 1 == order.len();
            let step = self.unload_zone(&mut run, zone, is_last);
            log::debug!(
                "zone {}: {} operations, cost {:.3}, {} items left on board",
                zone,
                step.operations.len(),
                step.cost(),
                run.on_board.len()
            );
            steps.push(step);
        }

        Ok(UnloadReport::from_steps(steps))
    }

    fn unload_zone<'a>(&self, run: &mut Run<'a>, zone: &Zone, is_last: bool) -> UnloadStep {
        let cost = &self.config.cost;
        let mut step = UnloadStep::new(zone.clone());

        let mut candidates: Vec<&PlacedItem> = run
            .on_board
            .values()
            .copied()
            .filter(|p| &p.zone == zone)
            .collect();
        candidates.sort_by(|a, b| front_to_back(a, b));

        let mut held: Vec<&'a PlacedItem> = Vec::new();

        for candidate in candidates {
            if !run.on_board.contains_key(&candidate.item_id) {
                continue;
            }

            let snapshot = match self.config.blocker_scope {
                BlockerScope::Remaining => run.snapshot(&held),
                BlockerScope::OnBoard => run.snapshot(&[]),
            };
            let blockers = self
                .config
                .reach
                .blocking_items(candidate, snapshot.iter().copied());

            let mut cleared = Vec::new();
            for blocker in blockers {
                run.on_board.remove(&blocker.item_id);
                if &blocker.zone == zone {
                    run.record(
                        &mut step,
                        Action::UnloadBlockingItem,
                        blocker,
                        cost.unload_cost(blocker),
                    );
                } else {
                    run.record(
                        &mut step,
                        Action::TemporarilyUnload,
                        blocker,
                        cost.handling_cost(),
                    );
                    cleared.push(blocker);
                }
            }

            run.on_board.remove(&candidate.item_id);
            run.record(&mut step, Action::Unload, candidate, cost.unload_cost(candidate));

            match self.config.reload_policy {
                ReloadPolicy::AfterEachItem => {
                    self.reload(run, &mut step, cleared, Action::ReloadBlockingItem)
                }
                ReloadPolicy::AfterZone => held.extend(cleared),
            }
        }

        if !is_last {
            self.reload(run, &mut step, held, Action::Reload);
        }

        step
    }

    fn reload<'a>(
        &self,
        run: &mut Run<'a>,
        step: &mut UnloadStep,
        mut items: Vec<&'a PlacedItem>,
        action: Action,
    ) {
        items.sort_by(|a, b| front_to_back(b, a));
        for item in items {
            run.on_board.insert(item.item_id, item);
            run.record(step, action, item, self.config.cost.handling_cost());
        }
    }
}

/// Door side first, then top first.
fn front_to_back(a: &PlacedItem, b: &PlacedItem) -> Ordering {
    a.y()
        .partial_cmp(&b.y())
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.z().partial_cmp(&a.z()).unwrap_or(Ordering::Equal))
        .then_with(|| a.item_id.cmp(&b.item_id))
}
