//! Container packer.

use crate::optimizer::Optimizer;
use crate::policy::PlacementPolicy;
use std::collections::HashSet;
use std::time::Instant;
use u_loading_core::solver::{Config, Solver};
use u_loading_core::{Container, Error, Item, PackingResult, Result};

/// Packs items into a single container with the configured method.
#[derive(Debug, Clone)]
pub struct Packer {
    config: Config,
}

impl Packer {
    /// Creates a new packer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the placement policy of the configured method.
    pub fn policy(&self) -> PlacementPolicy {
        PlacementPolicy::for_method(self.config.method)
    }

    fn check_items(items: &[Item]) -> Result<()> {
        let mut ids = HashSet::with_capacity(items.len());
        for item in items {
            if !ids.insert(item.id()) {
                return Err(Error::InvalidItem(format!(
                    "Duplicate item id {}",
                    item.id()
                )));
            }
        }
        Ok(())
    }
}

impl Solver for Packer {
    fn solve(&self, items: &[Item], container: &Container) -> Result<PackingResult> {
        self.config.validate()?;
        Self::check_items(items)?;

        let start = Instant::now();

        if items.is_empty() {
            let mut result = PackingResult::new().with_method(self.config.method);
            result.computation_time_ms = start.elapsed().as_millis() as u64;
            return Ok(result);
        }

        let mut result = Optimizer::new(self.config.clone()).optimize(items, container);
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        if !result.unplaced.is_empty() {
            log::warn!(
                "{}: {} of {} items could not be placed",
                self.config.method,
                result.unplaced.len(),
                items.len()
            );
        }
        log::info!(
            "{}: utilization {} with {} items after {} iteration(s) in {} ms",
            self.config.method,
            result.utilization_percent(),
            result.placed.len(),
            result.iterations_run,
            result.computation_time_ms
        );

        Ok(result)
    }
}
