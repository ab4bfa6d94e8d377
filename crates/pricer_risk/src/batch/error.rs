//! Batch error types.
//!
//! Only conditions that invalidate the whole batch are errors. A row whose
//! inputs are missing or undefined still gets a result with `None` columns.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::PricingError;
use pricer_models::RowKey;
use pricer_pricing::FdError;
use thiserror::Error;

/// Errors that stop a batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A row names a country without a rate table.
    #[error("Row {row}: {source}")]
    UnknownCountry {
        /// Offending row.
        row: RowKey,
        /// Lookup failure.
        #[source]
        source: MarketDataError,
    },

    /// Two rows share the same `(date, underlying, country)`.
    #[error("Duplicate row identity: {0}")]
    DuplicateRow(RowKey),

    /// Grid or PSOR settings rejected.
    #[error("Invalid EEP engine configuration: {0}")]
    Engine(#[from] FdError),

    /// Implied-vol settings rejected.
    #[error("Invalid implied-vol configuration: {0}")]
    ImpliedVol(#[from] PricingError),

    /// Worker pool could not be started.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
