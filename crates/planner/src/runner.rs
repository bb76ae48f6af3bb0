//! Runs the packing and unloading pipeline on a scenario.

use crate::report::Comparison;
use crate::scenario::Scenario;
use serde::Serialize;
use std::time::Instant;
use u_loading::pack::{rearrange_result, validate_layout, Packer, PlacementPolicy};
use u_loading::unload::{UnloadConfig, UnloadReport, UnloadSimulator, ZoneOrder};
use u_loading::{Config, PackingMethod, PackingResult, Result, Solver};

/// Pipeline settings shared by every method.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Overrides the method's default iteration count.
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub scan_step: f64,
    pub unload: UnloadConfig,
    /// Destination order; natural zone order when `None`.
    pub zone_order: Option<ZoneOrder>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: None,
            seed: None,
            parallel: false,
            scan_step: 1.0,
            unload: UnloadConfig::default(),
            zone_order: None,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_scan_step(mut self, step: f64) -> Self {
        self.scan_step = step;
        self
    }

    pub fn with_unload(mut self, unload: UnloadConfig) -> Self {
        self.unload = unload;
        self
    }

    pub fn with_zone_order(mut self, order: ZoneOrder) -> Self {
        self.zone_order = Some(order);
        self
    }

    fn packing_config(&self, method: PackingMethod) -> Config {
        let mut config = Config::new()
            .with_method(method)
            .with_scan_step(self.scan_step)
            .with_parallel(self.parallel);
        if let Some(iterations) = self.iterations {
            config = config.with_iterations(iterations);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

/// Outcome of one method on one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct MethodRun {
    pub method: PackingMethod,
    /// Packing after load-order rearrangement.
    pub packing: PackingResult,
    pub unload: UnloadReport,
    /// Wall time of the whole pipeline.
    pub total_time_ms: u64,
}

/// Runs scenarios through pack, validate, rearrange and unload.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs a single packing method.
    pub fn run_method(&self, scenario: &Scenario, method: PackingMethod) -> Result<MethodRun> {
        let start = Instant::now();
        let container = &scenario.container;

        let packer = Packer::new(self.config.packing_config(method));
        let result = packer.solve(&scenario.items, container)?;
        validate_layout(
            &result,
            container,
            PlacementPolicy::for_method(method).support_threshold,
        )?;

        let packing = rearrange_result(&result, container);

        let order = match &self.config.zone_order {
            Some(order) => order.clone(),
            None => scenario.zone_order(),
        };
        let unload = UnloadSimulator::new(self.config.unload).simulate(&packing.placed, &order)?;

        log::info!(
            "{} on {}: {} operations, unloading cost {:.2}, {} reloads",
            method,
            scenario.name,
            unload.total_operations,
            unload.unloading_cost,
            unload.reloading_count
        );

        Ok(MethodRun {
            method,
            packing,
            unload,
            total_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Runs every packing method on the scenario.
    pub fn compare(&self, scenario: &Scenario) -> Result<Comparison> {
        let mut comparison = Comparison::new(&scenario.name);
        for method in PackingMethod::ALL {
            comparison.add_run(self.run_method(scenario, method)?);
        }
        Ok(comparison)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioParser;

    fn scenario() -> Scenario {
        let json = r#"{
            "container_size": [50, 50, 50],
            "items": {
                "1": {"width": 10, "length": 10, "height": 10, "weight": 1, "location": "po1"},
                "2": {"width": 10, "length": 10, "height": 10, "weight": 1, "location": "po2"},
                "3": {"width": 20, "length": 10, "height": 10, "weight": 1, "location": "po1"},
                "4": {"width": 10, "length": 20, "height": 10, "weight": 1, "location": "po3"}
            }
        }"#;
        ScenarioParser::new().parse_json(json).unwrap()
    }

    #[test]
    fn test_run_method() {
        let runner = Runner::new(RunConfig::new().with_seed(3).with_iterations(2));
        let run = runner
            .run_method(&scenario(), PackingMethod::BottomLeftFill)
            .unwrap();

        assert_eq!(run.packing.placed.len(), 4);
        assert_eq!(run.unload.steps.len(), 3);
        let finals = run.unload.operations().filter(|op| op.action.is_final()).count();
        assert_eq!(finals, 4);
    }

    #[test]
    fn test_compare_runs_every_method() {
        let runner = Runner::new(RunConfig::new().with_seed(3).with_iterations(2));
        let comparison = runner.compare(&scenario()).unwrap();

        let methods: Vec<PackingMethod> = comparison.runs.iter().map(|r| r.method).collect();
        assert_eq!(methods, PackingMethod::ALL.to_vec());
    }

    #[test]
    fn test_zone_order_must_cover_items() {
        let order = ZoneOrder::new(["po1", "po2"]).unwrap();
        let runner = Runner::new(RunConfig::new().with_seed(1).with_zone_order(order));
        assert!(runner
            .run_method(&scenario(), PackingMethod::BottomLeftFill)
            .is_err());
    }
}
