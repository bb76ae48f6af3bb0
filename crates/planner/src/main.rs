//! Container load planner CLI

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use u_loading::unload::{BlockerScope, CostModel, ReloadPolicy, UnloadConfig, ZoneOrder};
use u_loading::PackingMethod;
use u_loading_planner::{Comparison, RunConfig, Runner, ScenarioParser};

#[derive(Parser)]
#[command(name = "load-planner")]
#[command(about = "Container loading and unload planning for U-Loading")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a scenario with one method and simulate unloading
    Run {
        /// Path to the JSON scenario file
        scenario: PathBuf,

        /// Packing method
        #[arg(short, long, value_enum, default_value = "blf")]
        method: MethodArg,

        #[command(flatten)]
        options: RunOptions,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run every packing method on a scenario and compare them
    Compare {
        /// Path to the JSON scenario file
        scenario: PathBuf,

        #[command(flatten)]
        options: RunOptions,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for CSV results
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunOptions {
    /// Number of ordering iterations (method default when omitted)
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run optimizer iterations in parallel
    #[arg(long)]
    parallel: bool,

    /// Lattice step of the placement search
    #[arg(long, default_value = "1.0")]
    scan_step: f64,

    /// Destination order, e.g. po1,po2,po3 (natural order when omitted)
    #[arg(short, long, value_delimiter = ',')]
    zones: Option<Vec<String>>,

    /// Reload blocking items right after the item they blocked
    #[arg(long)]
    reload_each: bool,

    /// Charge every operation the same unit cost
    #[arg(long)]
    flat_cost: bool,

    /// Ignore items already set aside when looking for blockers
    #[arg(long)]
    on_board_only: bool,
}

impl RunOptions {
    fn into_config(self) -> anyhow::Result<RunConfig> {
        let mut unload = UnloadConfig::new();
        if self.reload_each {
            unload = unload.with_reload_policy(ReloadPolicy::AfterEachItem);
        }
        if self.flat_cost {
            unload = unload.with_cost(CostModel::flat(1.0));
        }
        if self.on_board_only {
            unload = unload.with_blocker_scope(BlockerScope::OnBoard);
        }

        let mut config = RunConfig::new()
            .with_parallel(self.parallel)
            .with_scan_step(self.scan_step)
            .with_unload(unload);
        if let Some(iterations) = self.iterations {
            config = config.with_iterations(iterations);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(zones) = self.zones {
            config = config.with_zone_order(ZoneOrder::new(zones)?);
        }
        Ok(config)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    /// Bottom-Left Fill
    Blf,
    /// Back-to-front best fit
    BestFit,
    /// Strict-support subvolume
    Subvolume,
}

impl From<MethodArg> for PackingMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Blf => PackingMethod::BottomLeftFill,
            MethodArg::BestFit => PackingMethod::BackToFrontBestFit,
            MethodArg::Subvolume => PackingMethod::StrictSupportSubvolume,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            method,
            options,
            output,
        } => {
            let scenario = ScenarioParser::new().parse_file(&scenario)?;
            let runner = Runner::new(options.into_config()?);

            println!(
                "Scenario {}: {} items, container {} x {} x {}",
                scenario.name,
                scenario.items.len(),
                scenario.container.width(),
                scenario.container.length(),
                scenario.container.height()
            );

            let run = runner.run_method(&scenario, method.into())?;

            if !run.packing.unplaced.is_empty() {
                let ids: Vec<String> = run
                    .packing
                    .unplaced
                    .iter()
                    .map(|i| i.id().to_string())
                    .collect();
                println!("Unplaced items: {}", ids.join(", "));
            }

            let mut comparison = Comparison::new(&scenario.name);
            comparison.add_run(run);
            comparison.print_summary();

            if let Some(path) = output {
                comparison.save_json(&path)?;
                println!("Results saved to: {}", path.display());
            }
        }

        Commands::Compare {
            scenario,
            options,
            output,
            csv,
        } => {
            let scenario = ScenarioParser::new().parse_file(&scenario)?;
            let runner = Runner::new(options.into_config()?);

            let comparison = runner.compare(&scenario)?;
            comparison.print_summary();

            if let Some(path) = output {
                comparison.save_json(&path)?;
                println!("Results saved to: {}", path.display());
            }

            if let Some(path) = csv {
                comparison.save_csv(&path)?;
                println!("CSV saved to: {}", path.display());
            }
        }
    }

    Ok(())
}
