//! Price command implementation
//!
//! Reads observation rows and a rate file, runs the early-exercise premium
//! batch and writes one output line per input row.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use pricer_risk::{BatchPricer, BatchReport};
use tracing::info;

use crate::config::PipelineConfig;
use crate::io::{read_observations, read_rate_history, write_results, write_summary, SummaryFormat};
use crate::Result;

/// Arguments of the price command.
#[derive(Debug, Clone)]
pub struct PriceArgs {
    /// Observation file.
    pub observations: PathBuf,
    /// Wide rate file.
    pub rates: PathBuf,
    /// Result file (stdout when absent).
    pub output: Option<PathBuf>,
    /// Summary format name (`table` or `json`).
    pub summary: String,
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &PipelineConfig) -> Result<BatchReport> {
    let summary: SummaryFormat = args.summary.parse()?;
    info!("Starting EEP batch...");
    info!("  Observations: {}", args.observations.display());
    info!("  Rates: {}", args.rates.display());
    info!("  Grid: {} x {}", config.space_steps, config.time_steps);

    let rows = read_observations(&args.observations, &config.date_format)?;
    let history = read_rate_history(&args.rates, &config.rate_date_format, config.rates_in_percent)?;
    info!(rows = rows.len(), snapshots = history.len(), "inputs loaded");

    let pricer = BatchPricer::new(config.batch_config())?;
    let (results, report) = pricer.price(&rows, &history)?.into_parts();

    match &args.output {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            write_results(file, &rows, &results, &config.date_format)?;
            info!("Results written to {}", path.display());
            write_summary(io::stdout().lock(), &report, summary)?;
        }
        None => {
            write_results(io::stdout().lock(), &rows, &results, &config.date_format)?;
            write_summary(io::stderr().lock(), &report, summary)?;
        }
    }

    info!("Pricing complete");
    Ok(report)
}
