//! Iterative ordering optimizer.
//!
//! Runs the placement engine over the items in a fresh ordering per
//! iteration and keeps the packing with the highest utilization.

use crate::engine::PlacementEngine;
use crate::ordering::order_items;
use crate::policy::PlacementPolicy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use u_loading_core::{Config, Container, Item, OrderingStrategy, PackingResult};

/// Outcome of a single iteration.
#[derive(Debug, Clone)]
pub struct IterationOutcome {
    /// 0-based iteration index.
    pub iteration: usize,
    /// Packing produced by the iteration.
    pub result: PackingResult,
}

/// Packs items with one ordering per iteration and keeps the best packing.
#[derive(Debug, Clone)]
pub struct Optimizer {
    config: Config,
    policy: PlacementPolicy,
}

impl Optimizer {
    /// Creates an optimizer using the policy of the configured method.
    pub fn new(config: Config) -> Self {
        let policy = PlacementPolicy::for_method(config.method);
        Self { config, policy }
    }

    /// Replaces the placement policy.
    pub fn with_policy(mut self, policy: PlacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs a single iteration.
    pub fn run_iteration(
        &self,
        items: &[Item],
        container: &Container,
        ordering: OrderingStrategy,
        iteration: usize,
        base_seed: u64,
    ) -> IterationOutcome {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(iteration as u64));
        let ordered = order_items(items, ordering, &mut rng);

        let mut engine = PlacementEngine::new(container.clone(), self.policy, self.config.scan_step);
        for item in ordered {
            engine.place(item);
        }

        IterationOutcome {
            iteration,
            result: engine.into_result(),
        }
    }

    /// Runs all iterations and returns the best packing.
    ///
    /// The first iteration becomes the initial best; later iterations replace
    /// it only with a strictly higher utilization. `utilization_history`
    /// holds the best utilization after each iteration.
    pub fn optimize(&self, items: &[Item], container: &Container) -> PackingResult {
        let ordering = self.config.effective_ordering();
        let iterations = self.config.effective_iterations().max(1);
        let base_seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());

        let outcomes: Vec<IterationOutcome> = if self.config.parallel && iterations > 1 {
            (0..iterations)
                .into_par_iter()
                .map(|i| self.run_iteration(items, container, ordering, i, base_seed))
                .collect()
        } else {
            (0..iterations)
                .map(|i| self.run_iteration(items, container, ordering, i, base_seed))
                .collect()
        };

        let mut best: Option<IterationOutcome> = None;
        let mut history = Vec::with_capacity(iterations);

        for outcome in outcomes {
            log::debug!(
                "{} iteration {}: utilization={:.4}, placed={}, unplaced={}",
                self.config.method,
                outcome.iteration,
                outcome.result.utilization,
                outcome.result.placed.len(),
                outcome.result.unplaced.len()
            );

            let improves = best
                .as_ref()
                .map_or(true, |b| outcome.result.utilization > b.result.utilization);
            if improves {
                best = Some(outcome);
            }
            history.push(best.as_ref().map_or(0.0, |b| b.result.utilization));
        }

        let (best_iteration, mut result) = best
            .map(|b| (b.iteration, b.result))
            .unwrap_or_else(|| (0, PackingResult::new()));

        result.method = Some(self.config.method);
        result.iterations_run = iterations;
        result.best_iteration = best_iteration;
        result.utilization_history = history;
        result
    }
}
