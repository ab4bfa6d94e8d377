//! Batch summary: row counts, missing values per output column, timing.

use std::fmt;
use std::time::Duration;

use pricer_models::PricingResult;

/// Missing-value count of one output column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MissingCount {
    /// Column name, as in [`PricingResult::COLUMNS`].
    pub column: &'static str,
    /// Rows where the column is `None`.
    pub missing: usize,
}

/// Summary of one batch run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BatchReport {
    /// Rows priced.
    pub rows: usize,
    /// Distinct `(underlying, country)` series.
    pub series: usize,
    /// Worker threads available to the batch.
    pub workers: usize,
    /// Missing counts in column order.
    pub missing: Vec<MissingCount>,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl BatchReport {
    /// Tallies missing values over `results`.
    pub fn from_results(
        results: &[PricingResult],
        series: usize,
        workers: usize,
        elapsed: Duration,
    ) -> Self {
        let mut counts = [0_usize; PricingResult::COLUMNS.len()];
        for result in results {
            for (count, value) in counts.iter_mut().zip(result.values()) {
                if value.is_none() {
                    *count += 1;
                }
            }
        }

        let missing = PricingResult::COLUMNS
            .iter()
            .zip(counts)
            .map(|(&column, missing)| MissingCount { column, missing })
            .collect();

        Self {
            rows: results.len(),
            series,
            workers,
            missing,
            elapsed,
        }
    }

    /// Missing count of `column`, `None` for an unknown column.
    pub fn missing_in(&self, column: &str) -> Option<usize> {
        self.missing
            .iter()
            .find(|m| m.column == column)
            .map(|m| m.missing)
    }

    /// Missing values summed over all columns.
    pub fn total_missing(&self) -> usize {
        self.missing.iter().map(|m| m.missing).sum()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} rows, {} series, {} workers, {:.3}s",
            self.rows,
            self.series,
            self.workers,
            self.elapsed.as_secs_f64()
        )?;
        writeln!(f, "{:<20} {:>10}", "column", "missing")?;
        for m in &self.missing {
            writeln!(f, "{:<20} {:>10}", m.column, m.missing)?;
        }
        Ok(())
    }
}
