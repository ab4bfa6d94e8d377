//! American command implementation
//!
//! Prices one contract on the dividend-adjusted spot and reports the
//! early-exercise premia.

use pricer_pricing::{EarlyExercisePremiumEngine, EepBreakdown, EepInputs};
use tracing::info;

use crate::config::PipelineConfig;
use crate::io::SummaryFormat;
use crate::{CliError, Result};

/// One contract to price.
#[derive(Debug, Clone)]
pub struct ContractArgs {
    /// Spot of the underlying.
    pub spot: f64,
    /// Strike.
    pub strike: f64,
    /// Years to expiry.
    pub expiry: f64,
    /// Risk-free rate (decimal).
    pub rate: f64,
    /// Volatility.
    pub volatility: f64,
    /// Present value of dividends before expiry.
    pub pv_dividends: f64,
    /// Output format name (`table` or `json`).
    pub format: String,
}

/// Run the american command
pub fn run(args: &ContractArgs, config: &PipelineConfig) -> Result<EepBreakdown> {
    let format: SummaryFormat = args.format.parse()?;
    let engine = EarlyExercisePremiumEngine::new(config.eep_config())?;
    info!(
        "Pricing on a {} x {} grid (omega {}, tolerance {})",
        config.space_steps, config.time_steps, config.omega, config.tolerance
    );

    let inputs = EepInputs {
        spot: Some(args.spot),
        strike: Some(args.strike),
        expiry: Some(args.expiry),
        rate: Some(args.rate),
        volatility: Some(args.volatility),
        pv_dividends: Some(args.pv_dividends),
    };
    let breakdown = engine.estimate(&inputs).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "No price for spot {} less dividends {}: adjusted spot must be positive and inputs finite",
            args.spot, args.pv_dividends
        ))
    })?;

    match format {
        SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(&breakdown)?),
        SummaryFormat::Table => print_table(&breakdown),
    }
    Ok(breakdown)
}

fn print_table(b: &EepBreakdown) {
    let opt = |v: Option<f64>| v.map(|x| format!("{:.6}", x)).unwrap_or_else(|| "-".to_string());
    println!("{:<16} {:>12.6}", "adjusted_spot", b.adjusted_spot);
    println!("{:<16} {:>12.6}", "s_max", b.s_max);
    println!("{:<16} {:>12.6}", "american_call", b.american_call);
    println!("{:<16} {:>12.6}", "american_put", b.american_put);
    println!("{:<16} {:>12}", "european_call", opt(b.european_call));
    println!("{:<16} {:>12}", "european_put", opt(b.european_put));
    println!("{:<16} {:>12.6}", "eep", b.eep);
    println!("{:<16} {:>12}", "eep_call", opt(b.eep_call));
    println!("{:<16} {:>12}", "eep_put", opt(b.eep_put));
}
