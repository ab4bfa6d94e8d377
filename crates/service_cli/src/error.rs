//! CLI error types.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::PricingError;
use pricer_pricing::FdError;
use pricer_risk::BatchError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Command-line argument rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input file content rejected.
    #[error("{path}, line {line}: {message}")]
    InvalidInput {
        /// File being read.
        path: String,
        /// 1-based line number.
        line: u64,
        /// What went wrong.
        message: String,
    },

    /// Configuration could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Batch stopped.
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// Rate history rejected.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Finite-difference setup rejected.
    #[error(transparent)]
    Fd(#[from] FdError),

    /// Pricing input rejected.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
