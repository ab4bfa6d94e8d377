//! Early-exercise premium CLI
//!
//! Operational entry point for the American early-exercise premium pipeline.
//!
//! # Commands
//!
//! - `eep price --observations <file> --rates <file>` - Run the batch over an observation file
//! - `eep implied-vol ...` - Invert Black-Scholes for one quote
//! - `eep american ...` - Price one contract and report its early-exercise premia
//! - `eep check` - Print the resolved configuration
//!
//! # Configuration
//!
//! Settings come from CLI flags, then `EEP_*` environment variables, then
//! the TOML file given by `--config` (or `eep.toml` in the working
//! directory), then built-in defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod io;

pub use error::{CliError, Result};

use commands::american::ContractArgs;
use commands::implied_vol::QuoteArgs;
use commands::price::PriceArgs;
use config::{build_config, CliArgs, LogLevel};

/// American early-exercise premium pipeline CLI
#[derive(Parser)]
#[command(name = "eep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Worker threads (defaults to one per logical CPU)
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    /// Spot steps of the finite-difference grid
    #[arg(long, global = true)]
    space_steps: Option<usize>,

    /// Time steps of the finite-difference grid
    #[arg(long, global = true)]
    time_steps: Option<usize>,

    /// Rate file quotes decimals instead of percentages
    #[arg(long, global = true)]
    decimal_rates: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the early-exercise premium batch over an observation file
    Price {
        /// Observation file (CSV)
        #[arg(short = 'i', long)]
        observations: PathBuf,

        /// Rate file (CSV, Date column plus one column per rate series)
        #[arg(short, long)]
        rates: PathBuf,

        /// Output file (CSV); stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Summary format (table, json)
        #[arg(short, long, default_value = "table")]
        summary: String,
    },

    /// Implied volatility of one quoted option
    ImpliedVol {
        #[arg(long)]
        spot: f64,
        #[arg(long)]
        strike: f64,
        /// Years to expiry
        #[arg(long)]
        expiry: f64,
        /// Risk-free rate (decimal)
        #[arg(long)]
        rate: f64,
        /// Quoted premium
        #[arg(long)]
        price: f64,
        /// Option side (call, put)
        #[arg(long, default_value = "call")]
        side: String,
    },

    /// American prices and early-exercise premia of one contract
    American {
        #[arg(long)]
        spot: f64,
        #[arg(long)]
        strike: f64,
        /// Years to expiry
        #[arg(long)]
        expiry: f64,
        /// Risk-free rate (decimal)
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        volatility: f64,
        /// Present value of dividends paid before expiry
        #[arg(long, default_value = "0")]
        pv_dividends: f64,
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check the resolved configuration
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let log_level = if self.verbose {
            Some(LogLevel::Debug.as_filter_str().to_string())
        } else {
            self.log_level.clone()
        };
        CliArgs {
            config_file: self.config.clone(),
            log_level,
            workers: self.workers,
            space_steps: self.space_steps,
            time_steps: self.time_steps,
            rates_in_percent: self.decimal_rates.then_some(false),
        }
    }
}

/// Initialise tracing with `RUST_LOG` taking precedence over the configured level
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;
    init_tracing(config.log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Price {
            observations,
            rates,
            output,
            summary,
        } => {
            let args = PriceArgs {
                observations,
                rates,
                output,
                summary,
            };
            commands::price::run(&args, &config).map(|_| ())
        }
        Commands::ImpliedVol {
            spot,
            strike,
            expiry,
            rate,
            price,
            side,
        } => {
            let args = QuoteArgs {
                spot,
                strike,
                expiry,
                rate,
                price,
                side,
            };
            commands::implied_vol::run(&args).map(|_| ())
        }
        Commands::American {
            spot,
            strike,
            expiry,
            rate,
            volatility,
            pv_dividends,
            format,
        } => {
            let args = ContractArgs {
                spot,
                strike,
                expiry,
                rate,
                volatility,
                pv_dividends,
                format,
            };
            commands::american::run(&args, &config).map(|_| ())
        }
        Commands::Check => commands::check::run(&config).map(|_| ()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_map_to_config_args() {
        let cli = Cli::parse_from([
            "eep",
            "--workers",
            "4",
            "--decimal-rates",
            "price",
            "-i",
            "rows.csv",
            "-r",
            "rates.csv",
            "--space-steps",
            "80",
        ]);
        let args = cli.config_args();
        assert_eq!(args.workers, Some(4));
        assert_eq!(args.space_steps, Some(80));
        assert_eq!(args.rates_in_percent, Some(false));
        assert_eq!(args.log_level, None);
        assert!(matches!(cli.command, Commands::Price { .. }));
    }

    #[test]
    fn test_verbose_forces_debug() {
        let cli = Cli::parse_from(["eep", "-v", "--log-level", "warn", "check"]);
        assert_eq!(cli.config_args().log_level.as_deref(), Some("debug"));
    }
}
