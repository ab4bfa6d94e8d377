//! Wide rate file reader.
//!
//! Layout: a `Date` column followed by one column per named rate series
//! (`OINOKSWD=`, `STISEK3MDFI=`, ...). Each line becomes one [`RateSnapshot`];
//! blank or non-numeric cells (a vendor `#N/A`) are missing quotes.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use pricer_core::market_data::{RateCurveHistory, RateSnapshot};
use pricer_core::types::Date;
use tracing::debug;

use super::ensure_exists;
use crate::{CliError, Result};

/// Reads a wide rate file into a [`RateCurveHistory`].
///
/// With `in_percent` every quote is divided by 100.
///
/// # Errors
///
/// `CliError::InvalidInput` for a file without a `Date` column or with an
/// unparsable date; `CliError::MarketData` when two lines share a date.
pub fn read_rate_history(path: &Path, date_format: &str, in_percent: bool) -> Result<RateCurveHistory> {
    ensure_exists(path)?;
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let headers = reader.headers()?.clone();

    let date_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("date"))
        .ok_or_else(|| CliError::InvalidInput {
            path: path.display().to_string(),
            line: 1,
            message: "missing Date column".to_string(),
        })?;
    let scale = if in_percent { 0.01 } else { 1.0 };

    let mut snapshots = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        snapshots.push(parse_snapshot(path, &headers, &record, date_col, date_format, scale)?);
    }

    debug!(path = %path.display(), snapshots = snapshots.len(), "read rate history");
    Ok(RateCurveHistory::from_snapshots(snapshots)?)
}

fn parse_snapshot(
    path: &Path,
    headers: &StringRecord,
    record: &StringRecord,
    date_col: usize,
    date_format: &str,
    scale: f64,
) -> Result<RateSnapshot> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let invalid = |message: String| CliError::InvalidInput {
        path: path.display().to_string(),
        line,
        message,
    };

    let raw_date = record.get(date_col).unwrap_or_default();
    let date = Date::parse_with_format(raw_date, date_format).map_err(|e| invalid(e.to_string()))?;

    let mut snapshot = RateSnapshot::new(date);
    for (col, (series, cell)) in headers.iter().zip(record.iter()).enumerate() {
        if col == date_col || cell.is_empty() {
            continue;
        }
        match cell.parse::<f64>() {
            Ok(quote) if quote.is_finite() => snapshot.insert(series, quote * scale),
            Ok(_) => {}
            Err(_) => {
                debug!(series, cell, line, "unparsable rate quote treated as missing");
            }
        }
    }
    Ok(snapshot)
}
