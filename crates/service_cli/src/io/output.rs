//! Result file writer and batch summary rendering.

use std::io::Write;
use std::str::FromStr;

use csv::WriterBuilder;
use pricer_models::{MarketObservation, PricingResult};
use pricer_risk::BatchReport;

use crate::{CliError, Result};

/// Input columns echoed in front of the outputs.
pub const INPUT_COLUMNS: [&str; 13] = [
    "date",
    "underlying",
    "country",
    "spot",
    "strike",
    "maturity",
    "rate",
    "call_price",
    "put_price",
    "call_volume",
    "put_volume",
    "underlying_volume",
    "dividend",
];

/// How the batch summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    /// Aligned text table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for SummaryFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(SummaryFormat::Table),
            "json" => Ok(SummaryFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown summary format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn input_cells(row: &MarketObservation, date_format: &str) -> [String; 13] {
    [
        row.date.format(date_format),
        row.underlying.clone(),
        row.country.clone(),
        cell(row.spot),
        cell(row.strike),
        cell(row.maturity),
        cell(row.rate),
        cell(row.call_price),
        cell(row.put_price),
        cell(row.call_volume),
        cell(row.put_volume),
        cell(row.underlying_volume),
        row.dividend.to_string(),
    ]
}

/// Writes one line per row: input columns, then [`PricingResult::COLUMNS`].
///
/// Missing values are written as empty cells.
pub fn write_results<W: Write>(
    writer: W,
    rows: &[MarketObservation],
    results: &[PricingResult],
    date_format: &str,
) -> Result<()> {
    if rows.len() != results.len() {
        return Err(CliError::InvalidArgument(format!(
            "{} rows but {} results",
            rows.len(),
            results.len()
        )));
    }

    let mut out = WriterBuilder::new().from_writer(writer);
    out.write_record(INPUT_COLUMNS.iter().chain(PricingResult::COLUMNS.iter()))?;
    for (row, result) in rows.iter().zip(results) {
        let outputs = result.values().map(cell);
        out.write_record(input_cells(row, date_format).iter().chain(outputs.iter()))?;
    }
    out.flush()?;
    Ok(())
}

/// Prints the batch summary.
pub fn write_summary<W: Write>(mut writer: W, report: &BatchReport, format: SummaryFormat) -> Result<()> {
    match format {
        SummaryFormat::Table => write!(writer, "{}", report)?,
        SummaryFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
