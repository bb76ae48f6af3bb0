//! Method comparison report.

use crate::runner::MethodRun;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use u_loading::PackingMethod;

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub method: PackingMethod,
    pub placed: usize,
    pub unplaced: usize,
    pub utilization: f64,
    pub iterations: usize,
    pub best_iteration: usize,
    pub time_ms: u64,
    pub total_operations: usize,
    pub unloading_cost: f64,
    pub reloading_count: usize,
}

impl From<&MethodRun> for RunSummary {
    fn from(run: &MethodRun) -> Self {
        Self {
            method: run.method,
            placed: run.packing.placed.len(),
            unplaced: run.packing.unplaced.len(),
            utilization: run.packing.utilization,
            iterations: run.packing.iterations_run,
            best_iteration: run.packing.best_iteration,
            time_ms: run.total_time_ms,
            total_operations: run.unload.total_operations,
            unloading_cost: run.unload.unloading_cost,
            reloading_count: run.unload.reloading_count,
        }
    }
}

/// Results of every method on one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub scenario: String,
    pub runs: Vec<MethodRun>,
}

impl Comparison {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            runs: Vec::new(),
        }
    }

    pub fn add_run(&mut self, run: MethodRun) {
        self.runs.push(run);
    }

    pub fn summaries(&self) -> Vec<RunSummary> {
        self.runs.iter().map(RunSummary::from).collect()
    }

    /// Run with the fewest unload operations, ties broken by cost.
    pub fn best_for_unloading(&self) -> Option<&MethodRun> {
        self.runs.iter().min_by(|a, b| {
            a.unload
                .total_operations
                .cmp(&b.unload.total_operations)
                .then_with(|| {
                    a.unload
                        .unloading_cost
                        .partial_cmp(&b.unload.unloading_cost)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        })
    }

    /// Formats the comparison table.
    pub fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Scenario: {}", self.scenario);
        let _ = writeln!(
            out,
            "{:<12} {:>8} {:>8} {:>8} {:>10} {:>8} {:>8} {:>8}",
            "method", "util%", "placed", "unplaced", "operations", "cost", "reloads", "ms"
        );
        let _ = writeln!(out, "{:-<80}", "");
        for s in self.summaries() {
            let _ = writeln!(
                out,
                "{:<12} {:>8.1} {:>8} {:>8} {:>10} {:>8.2} {:>8} {:>8}",
                s.method.name(),
                s.utilization * 100.0,
                s.placed,
                s.unplaced,
                s.total_operations,
                s.unloading_cost,
                s.reloading_count,
                s.time_ms
            );
        }
        out
    }

    pub fn print_summary(&self) {
        print!("{}", self.table());
        if let Some(best) = self.best_for_unloading() {
            println!("\nFewest unload operations: {}", best.method);
        }
    }

    /// Writes the full comparison, layouts and operation logs included.
    pub fn save_json(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Writes one CSV row per method.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(
            writer,
            "scenario,method,placed,unplaced,utilization,iterations,best_iteration,time_ms,total_operations,unloading_cost,reloading_count"
        )?;
        for s in self.summaries() {
            writeln!(
                writer,
                "{},{},{},{},{:.6},{},{},{},{},{:.4},{}",
                self.scenario,
                s.method.name(),
                s.placed,
                s.unplaced,
                s.utilization,
                s.iterations,
                s.best_iteration,
                s.time_ms,
                s.total_operations,
                s.unloading_cost,
                s.reloading_count
            )?;
        }
        writer.flush()
    }
}
