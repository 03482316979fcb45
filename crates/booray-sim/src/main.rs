use std::path::PathBuf;

use clap::Parser;

use booray_core::AppInfo;
use booray_sim::config::{ResolvedOutputs, SimulationConfig};
use booray_sim::logging::init_logging;
use booray_sim::simulation::SimulationRunner;

/// House-edge simulator for Oh Hey BooRay.
#[derive(Debug, Parser)]
#[command(
    name = "booray-sim",
    author,
    version,
    about = "Monte Carlo house edge and frequency estimates for Oh Hey BooRay"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/booray.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of trials to simulate.
    #[arg(short = 'n', long, value_name = "TRIALS")]
    trials: Option<usize>,

    /// Override the RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no trials are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimulationConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(trials) = cli.trials {
        config.trials.count = trials;
    }

    if let Some(seed) = cli.seed {
        config.trials.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let trials = config.trials.count;

    println!(
        "{} ({}): configuration '{run_id}' loaded ({trials} trial{})",
        AppInfo::codename(),
        AppInfo::version(),
        if trials == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SimulationRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    println!("Running Oh Hey BooRay simulation...");
    let summary = runner.run()?;

    println!();
    print!("{}", summary.report.text_report());
    println!();
    println!(
        "Simulation complete for '{run_id}': {} trials (seed {})",
        summary.trials, summary.seed
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(jsonl_path) = summary.jsonl_path.as_ref() {
        println!(
            "Trial log: {} ({} rows)",
            jsonl_path.display(),
            summary.rows_written
        );
    }
    if let Some(plot_path) = summary.plot_path.as_ref() {
        println!("House edge plot: {}", plot_path.display());
    }
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
