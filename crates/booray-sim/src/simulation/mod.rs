mod rows;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use booray_core::play_one_trial;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsError, Aggregator, SimulationReport};
use crate::config::{ResolvedOutputs, SimulationConfig};
use crate::logging::TELEMETRY_FILE;

use rows::TrialLogRow;

const PROGRESS_INTERVAL: usize = 100_000;

/// Primary entry point for a simulation run.
pub struct SimulationRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub trials: usize,
    pub seed: u64,
    pub rows_written: usize,
    pub report: SimulationReport,
    pub jsonl_path: Option<PathBuf>,
    pub summary_path: PathBuf,
    pub plot_path: Option<PathBuf>,
    pub telemetry_path: Option<PathBuf>,
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.trials.count == 0 {
            return Err(RunnerError::NoTrials);
        }

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
        })
    }

    /// Play every trial, folding results into the aggregator and streaming
    /// optional JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.summary_md.parent())?;
        let mut writer = match self.outputs.jsonl.as_ref() {
            Some(path) => {
                ensure_parent(path.parent())?;
                Some(BufWriter::new(File::create(path)?))
            }
            None => None,
        };

        let seed = self.config.trials.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut aggregator = Aggregator::new(self.config.metrics.confidence);
        let mut rows_written = 0usize;

        event!(
            target: "booray_sim::run",
            Level::INFO,
            run_id = %self.config.run_id,
            trials = self.config.trials.count as u64,
            seed,
            "simulation started"
        );

        for trial_index in 0..self.config.trials.count {
            // Each trial gets its own stream so any row can be replayed alone.
            let trial_seed = rng.next_u64();
            let mut trial_rng = StdRng::seed_from_u64(trial_seed);
            let result = play_one_trial(&mut trial_rng).map_err(|err| {
                RunnerError::game(format!("trial {trial_index} (seed {trial_seed}): {err}"))
            })?;

            aggregator.record(&result);

            if self.logging_enabled && tracing::enabled!(Level::DEBUG) {
                event!(
                    target: "booray_sim::trial",
                    Level::DEBUG,
                    run_id = %self.config.run_id,
                    trial_index = trial_index as u64,
                    trial_seed,
                    tricks_won = result.tricks_won,
                    og3 = result.og3.label(),
                    drew = result.drawn.len() as u64,
                    booray = result.payouts.booray
                );
            }

            if let Some(writer) = writer.as_mut() {
                let row = TrialLogRow::new(&self.config.run_id, trial_index, trial_seed, &result);
                serde_json::to_writer(&mut *writer, &row)?;
                writer.write_all(b"\n")?;
                rows_written += 1;
            }

            if (trial_index + 1) % PROGRESS_INTERVAL == 0 {
                event!(
                    target: "booray_sim::run",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    completed = (trial_index + 1) as u64,
                    "progress"
                );
            }
        }

        if let Some(writer) = writer.as_mut() {
            writer.flush()?;
        }

        let report = aggregator.finalize()?;
        report.write_markdown(&self.outputs.summary_md)?;

        let plot_path = match self.outputs.plots_dir.as_ref() {
            Some(dir) => match report.render_plot(dir) {
                Ok(path) => Some(path),
                Err(err) => {
                    eprintln!("WARN: {}", err);
                    None
                }
            },
            None => None,
        };

        let telemetry_path = if self.logging_enabled {
            Some(self.outputs.report_dir().join(TELEMETRY_FILE))
        } else {
            None
        };

        event!(
            target: "booray_sim::run",
            Level::INFO,
            run_id = %self.config.run_id,
            trials = report.trials,
            total_house_edge = report.total_house_edge,
            "simulation complete"
        );

        Ok(RunSummary {
            trials: self.config.trials.count,
            seed,
            rows_written,
            report,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            plot_path,
            telemetry_path,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {message}")]
    Game { message: String },
    #[error("configuration requests zero trials")]
    NoTrials,
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}
