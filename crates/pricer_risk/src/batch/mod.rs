//! Batch pipeline: observation rows in, per-row pricing results out.
//!
//! - [`BatchPricer`]: validates rows, resolves rates and dividends per
//!   series and fans row pricing out on a worker pool
//! - [`BatchConfig`]: implied-vol, EEP and pool settings
//! - [`BatchReport`]: missing-value counts per output column
//! - [`BatchError`]: conditions that stop a batch

mod config;
mod error;
mod pipeline;
mod report;

pub use config::{BatchConfig, SpotBasis};
pub use error::BatchError;
pub use pipeline::{BatchOutput, BatchPricer};
pub use report::{BatchReport, MissingCount};
