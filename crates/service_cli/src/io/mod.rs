//! CSV adapters for observation rows, rate files and batch outputs.

pub mod observations;
pub mod output;
pub mod rates;

pub use observations::read_observations;
pub use output::{write_results, write_summary, SummaryFormat};
pub use rates::read_rate_history;

use std::path::Path;

use crate::{CliError, Result};

/// Fails with `FileNotFound` before handing the path to the csv reader.
pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::FileNotFound(path.display().to_string()))
    }
}

/// Finite values only; anything else is missing.
#[inline]
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
