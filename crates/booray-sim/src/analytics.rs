use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use booray_core::GameResult;
use booray_core::game::og3::Og3Category;
use booray_core::game::payout::WagerLine;
use plotters::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

pub const ALL_TRUMP_LABEL: &str = "all_trump";
pub const AKQ_TRUMP_LABEL: &str = "akq_trump";
pub const REDRAW_LABEL: &str = "redraw";

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("no trials recorded; at least one trial is required")]
    NoTrials,
    #[error("invalid confidence level {0}")]
    Confidence(f64),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render plot: {0}")]
    Plot(String),
}

pub fn tricks_label(tricks_won: u8) -> String {
    format!("tricks_{tricks_won}")
}

pub fn og3_label(category: Og3Category) -> String {
    format!("og3_{}", category.label())
}

/// Running tallies for one simulation run. Starts zeroed and is consumed by
/// [`Aggregator::finalize`].
pub struct Aggregator {
    trials: u64,
    counts: BTreeMap<String, u64>,
    payouts: BTreeMap<WagerLine, Vec<f64>>,
    confidence: f64,
}

impl Aggregator {
    pub fn new(confidence: f64) -> Self {
        let mut counts = BTreeMap::new();
        for tricks in 0..=3 {
            counts.insert(tricks_label(tricks), 0);
        }
        for category in Og3Category::ALL {
            counts.insert(og3_label(category), 0);
        }
        for label in [ALL_TRUMP_LABEL, AKQ_TRUMP_LABEL, REDRAW_LABEL] {
            counts.insert(label.to_string(), 0);
        }

        let payouts = WagerLine::ALL
            .iter()
            .map(|line| (*line, Vec::new()))
            .collect();

        Self {
            trials: 0,
            counts,
            payouts,
            confidence,
        }
    }

    pub fn record(&mut self, result: &GameResult) {
        self.trials += 1;
        self.bump(tricks_label(result.tricks_won));
        self.bump(og3_label(result.og3));
        if result.used_all_trump {
            self.bump(ALL_TRUMP_LABEL.to_string());
        }
        if result.used_akq_trump {
            self.bump(AKQ_TRUMP_LABEL.to_string());
        }
        if result.drew_cards() {
            self.bump(REDRAW_LABEL.to_string());
        }

        for line in WagerLine::ALL {
            self.payouts
                .entry(line)
                .or_default()
                .push(f64::from(result.payout(line)));
        }
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn finalize(self) -> Result<SimulationReport, AnalyticsError> {
        if self.trials == 0 {
            return Err(AnalyticsError::NoTrials);
        }
        let z = critical_value(self.confidence)?;
        let trials = self.trials as f64;

        let frequencies = self
            .counts
            .into_iter()
            .map(|(label, count)| FrequencyRow {
                label,
                count,
                frequency: count as f64 / trials,
            })
            .collect();

        let mut lines = Vec::with_capacity(WagerLine::ALL.len());
        for line in WagerLine::ALL {
            let values = self.payouts.get(&line).map(Vec::as_slice).unwrap_or(&[]);
            let (mean, margin) = mean_with_margin(values, z);
            lines.push(LineReport {
                line,
                mean_payout: mean,
                house_edge: -mean * 100.0,
                ci: (-(mean + margin) * 100.0, -(mean - margin) * 100.0),
            });
        }
        let total_house_edge = -lines.iter().map(|l| l.mean_payout).sum::<f64>() * 100.0;

        Ok(SimulationReport {
            trials: self.trials,
            confidence: self.confidence,
            frequencies,
            lines,
            total_house_edge,
        })
    }

    fn bump(&mut self, label: String) {
        *self.counts.entry(label).or_insert(0) += 1;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrequencyRow {
    pub label: String,
    pub count: u64,
    pub frequency: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineReport {
    pub line: WagerLine,
    pub mean_payout: f64,
    /// Percent of stake kept by the house.
    pub house_edge: f64,
    pub ci: (f64, f64),
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub trials: u64,
    pub confidence: f64,
    pub frequencies: Vec<FrequencyRow>,
    pub lines: Vec<LineReport>,
    pub total_house_edge: f64,
}

impl SimulationReport {
    pub fn house_edge(&self, line: WagerLine) -> Option<f64> {
        self.lines
            .iter()
            .find(|report| report.line == line)
            .map(|report| report.house_edge)
    }

    pub fn frequency(&self, label: &str) -> Option<f64> {
        self.frequencies
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.frequency)
    }

    /// Plain-text listing in the shape the command line prints.
    pub fn text_report(&self) -> String {
        let mut out = String::from("Frequencies:\n");
        for row in &self.frequencies {
            out.push_str(&format!("{}: {:.2}%\n", row.label, row.frequency * 100.0));
        }
        out.push_str("\nHouse Edge:\n");
        for line in &self.lines {
            out.push_str(&format!("{}: {:.2}%\n", line.line, line.house_edge));
        }
        out.push_str(&format!("total: {:.2}%\n", self.total_house_edge));
        out
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str("# Oh Hey BooRay Simulation\n\n");
        rows.push_str(&format!("Trials: {}\n\n", self.trials));

        rows.push_str("## House Edge\n\n");
        rows.push_str(&format!(
            "| Line | Mean payout | House edge | {:.0}% CI |\n",
            self.confidence * 100.0
        ));
        rows.push_str("|------|-------------|------------|--------|\n");
        for line in &self.lines {
            rows.push_str(&format!(
                "| {name} | {mean:+.4} | {edge:.2}% | [{low:.2}%, {high:.2}%] |\n",
                name = line.line,
                mean = line.mean_payout,
                edge = line.house_edge,
                low = line.ci.0,
                high = line.ci.1,
            ));
        }
        rows.push_str(&format!(
            "| total | | {:.2}% | |\n\n",
            self.total_house_edge
        ));

        rows.push_str("## Frequencies\n\n");
        rows.push_str("| Outcome | Count | Frequency |\n");
        rows.push_str("|---------|-------|-----------|\n");
        for row in &self.frequencies {
            rows.push_str(&format!(
                "| {} | {} | {:.4}% |\n",
                row.label,
                row.count,
                row.frequency * 100.0
            ));
        }

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }

    pub fn render_plot(&self, dir: impl AsRef<Path>) -> Result<PathBuf, AnalyticsError> {
        let dir = dir.as_ref();
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|e| AnalyticsError::Io {
                context: "creating plots directory",
                source: e,
            })?;
        }

        let output_path = dir.join("house_edge.png");
        let mut bars: Vec<(String, f64)> = self
            .lines
            .iter()
            .map(|line| (line.line.to_string(), line.house_edge))
            .collect();
        bars.push(("total".to_string(), self.total_house_edge));

        let prev_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));

        let plot_attempt = std::panic::catch_unwind(move || {
            let root = BitMapBackend::new(&output_path, (800, 480)).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            let y_min = bars.iter().map(|(_, v)| *v).fold(0.0f64, f64::min);
            let y_max = bars.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
            let margin = ((y_max - y_min).abs() * 0.1).max(1.0);

            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .caption("House edge by wager line (%)", ("sans-serif", 22))
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 60)
                .build_cartesian_2d(0..bars.len(), (y_min - margin)..(y_max + margin))
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            chart
                .configure_mesh()
                .disable_mesh()
                .y_desc("House edge %")
                .x_desc("Wager line")
                .x_label_formatter(&|idx| {
                    bars.get(*idx)
                        .map(|(name, _)| name.clone())
                        .unwrap_or_default()
                })
                .draw()
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            chart
                .draw_series(bars.iter().enumerate().map(|(idx, (_, edge))| {
                    let color = if *edge >= 0.0 { &RED } else { &GREEN };
                    Rectangle::new([(idx, 0.0), (idx + 1, *edge)], color.filled())
                }))
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            drop(chart);

            root.present()
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            drop(root);

            Ok(output_path)
        });

        std::panic::set_hook(prev_hook);

        match plot_attempt {
            Ok(result) => result,
            Err(_) => Err(AnalyticsError::Plot(
                "plotters panicked while rendering (missing font support?)".into(),
            )),
        }
    }
}

/// Two-sided standard normal quantile for `confidence`.
fn critical_value(confidence: f64) -> Result<f64, AnalyticsError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(AnalyticsError::Confidence(confidence));
    }
    let normal = Normal::new(0.0, 1.0).map_err(|_| AnalyticsError::Confidence(confidence))?;
    Ok(normal.inverse_cdf(0.5 + confidence / 2.0))
}

/// Sample mean and the half-width of its normal-approximation interval.
fn mean_with_margin(values: &[f64], z: f64) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if values.len() == 1 {
        return (mean, 0.0);
    }
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (values.len() as f64 - 1.0);
    let std_error = (variance / values.len() as f64).sqrt();
    (mean, z * std_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use booray_core::model::card::Card;
    use booray_core::model::deck::Deal;
    use booray_core::model::rank::Rank;
    use booray_core::model::suit::Suit;
    use booray_core::play_dealt;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn sweep_with_akq() -> GameResult {
        let deal = Deal {
            player: [
                card(Rank::Queen, Suit::Spades),
                card(Rank::King, Suit::Spades),
                card(Rank::Ace, Suit::Spades),
            ],
            dealer: [
                card(Rank::Two, Suit::Hearts),
                card(Rank::Three, Suit::Diamonds),
                card(Rank::Four, Suit::Spades),
            ],
        };
        play_dealt(deal, &mut StdRng::seed_from_u64(0)).expect("trial")
    }

    fn blank_loss() -> GameResult {
        let deal = Deal {
            player: [
                card(Rank::Two, Suit::Clubs),
                card(Rank::Three, Suit::Clubs),
                card(Rank::Nine, Suit::Hearts),
            ],
            dealer: [
                card(Rank::Ace, Suit::Hearts),
                card(Rank::Ace, Suit::Clubs),
                card(Rank::Five, Suit::Clubs),
            ],
        };
        play_dealt(deal, &mut StdRng::seed_from_u64(0)).expect("trial")
    }

    #[test]
    fn finalize_without_trials_is_rejected() {
        let aggregator = Aggregator::new(0.95);
        assert!(matches!(aggregator.finalize(), Err(AnalyticsError::NoTrials)));
    }

    #[test]
    fn counts_labels_and_house_edge() {
        let mut aggregator = Aggregator::new(0.95);
        aggregator.record(&sweep_with_akq());
        aggregator.record(&blank_loss());
        assert_eq!(aggregator.trials(), 2);
        assert_eq!(aggregator.count("tricks_3"), 1);
        assert_eq!(aggregator.count("tricks_0"), 1);
        assert_eq!(aggregator.count("og3_Mini Royal"), 1);
        assert_eq!(aggregator.count(AKQ_TRUMP_LABEL), 1);
        assert_eq!(aggregator.count(ALL_TRUMP_LABEL), 1);

        let report = aggregator.finalize().expect("report");
        // ante: (+1, -1) / 2 = 0; booray: (500, -1) / 2 = 249.5
        assert_eq!(report.house_edge(WagerLine::Ante), Some(0.0));
        assert_eq!(report.house_edge(WagerLine::Booray), Some(-24_950.0));
        assert_eq!(report.house_edge(WagerLine::Play), Some(-50.0));
        assert_eq!(report.frequency("tricks_3"), Some(0.5));
        assert_eq!(report.frequency("tricks_1"), Some(0.0));

        let sum: f64 = report.lines.iter().map(|l| l.house_edge).sum();
        assert!((report.total_house_edge - sum).abs() < 1e-9);
    }

    #[test]
    fn interval_brackets_the_point_estimate() {
        let mut aggregator = Aggregator::new(0.95);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let result = booray_core::play_one_trial(&mut rng).expect("trial");
            aggregator.record(&result);
        }
        let report = aggregator.finalize().expect("report");
        for line in &report.lines {
            assert!(line.ci.0 <= line.house_edge && line.house_edge <= line.ci.1);
        }
    }

    #[test]
    fn critical_value_matches_normal_table() {
        let z = critical_value(0.95).expect("z");
        assert!((z - 1.959964).abs() < 1e-4);
        assert!(critical_value(1.0).is_err());
    }

    #[test]
    fn text_report_lists_every_line() {
        let mut aggregator = Aggregator::new(0.9);
        aggregator.record(&blank_loss());
        let text = aggregator.finalize().expect("report").text_report();
        assert!(text.contains("tricks_0: 100.00%"));
        assert!(text.contains("ante: 100.00%"));
        assert!(text.contains("og3: 100.00%"));
        assert!(text.contains("total: 400.00%"));
    }
}
