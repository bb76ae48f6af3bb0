//! Scenario planner for U-Loading.
//!
//! This crate provides:
//! - JSON scenario parser (container size + item map)
//! - Runner packing, rearranging and unloading with each method
//! - Comparison report with JSON and CSV output

mod report;
mod runner;
mod scenario;

pub use report::{Comparison, RunSummary};
pub use runner::{MethodRun, RunConfig, Runner};
pub use scenario::{Scenario, ScenarioError, ScenarioParser};
