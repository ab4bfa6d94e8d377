//! Observation file reader.
//!
//! One row per `(date, underlying, country)`. Column names follow the
//! vendor export (`ulying_price`, `call_v`, `risk_free_rate`, ...) or the
//! field names of [`MarketObservation`]. Blank, unparsable and non-finite
//! numeric cells become missing values.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use pricer_core::types::Date;
use pricer_models::MarketObservation;
use serde::Deserialize;
use tracing::debug;

use super::{ensure_exists, finite};
use crate::{CliError, Result};

#[derive(Debug, Deserialize)]
struct ObservationRecord {
    #[serde(alias = "Date")]
    date: String,
    #[serde(alias = "ulying", alias = "ulying_name", alias = "ticker")]
    underlying: String,
    #[serde(alias = "Country")]
    country: String,
    #[serde(default, alias = "ulying_price", deserialize_with = "csv::invalid_option")]
    spot: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    strike: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    maturity: Option<f64>,
    #[serde(default, alias = "risk_free_rate", deserialize_with = "csv::invalid_option")]
    rate: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    call_price: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    put_price: Option<f64>,
    #[serde(default, alias = "call_v", deserialize_with = "csv::invalid_option")]
    call_volume: Option<f64>,
    #[serde(default, alias = "put_v", deserialize_with = "csv::invalid_option")]
    put_volume: Option<f64>,
    #[serde(default, alias = "ulying_volume", deserialize_with = "csv::invalid_option")]
    underlying_volume: Option<f64>,
    #[serde(default, alias = "ulying_div", deserialize_with = "csv::invalid_option")]
    dividend: Option<f64>,
}

impl ObservationRecord {
    fn into_observation(self, date: Date) -> MarketObservation {
        MarketObservation {
            date,
            underlying: self.underlying.trim().to_string(),
            country: self.country.trim().to_string(),
            spot: finite(self.spot),
            strike: finite(self.strike),
            maturity: finite(self.maturity),
            rate: finite(self.rate),
            call_price: finite(self.call_price),
            put_price: finite(self.put_price),
            call_volume: finite(self.call_volume),
            put_volume: finite(self.put_volume),
            underlying_volume: finite(self.underlying_volume),
            dividend: finite(self.dividend).unwrap_or(0.0),
        }
    }
}

/// Reads every observation row of `path`.
///
/// `date_format` is a chrono format string for the date column. Rates in the
/// file are taken as decimals.
///
/// # Errors
///
/// `CliError::FileNotFound` for a missing file, `CliError::InvalidInput`
/// (with the line number) for a row lacking an identity field or carrying
/// an unparsable date.
pub fn read_observations(path: &Path, date_format: &str) -> Result<Vec<MarketObservation>> {
    ensure_exists(path)?;
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let invalid = |message: String| CliError::InvalidInput {
            path: path.display().to_string(),
            line,
            message,
        };

        let parsed: ObservationRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| invalid(e.to_string()))?;
        let date = Date::parse_with_format(&parsed.date, date_format)
            .map_err(|e| invalid(e.to_string()))?;
        if parsed.underlying.trim().is_empty() {
            return Err(invalid("empty underlying".to_string()));
        }
        rows.push(parsed.into_observation(date));
    }

    debug!(path = %path.display(), rows = rows.len(), "read observations");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_canonical_columns() {
        let file = write_csv(
            "date,underlying,country,spot,strike,maturity,rate,call_price,put_price,dividend\n\
             2024-03-01,EQNR,NORWAY,300,280,0.25,0.04,25.5,3.1,0\n\
             2024-03-04,EQNR,NORWAY,302,280,0.24,,26.0,2.9,1.5\n",
        );
        let rows = read_observations(file.path(), "%Y-%m-%d").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, Date::from_ymd(2024, 3, 1).unwrap());
        assert_eq!(rows[0].underlying, "EQNR");
        assert_eq!(rows[0].spot, Some(300.0));
        assert_eq!(rows[0].rate, Some(0.04));
        assert_eq!(rows[1].rate, None);
        assert_eq!(rows[1].dividend, 1.5);
        assert_eq!(rows[1].call_volume, None);
    }

    #[test]
    fn test_reads_vendor_columns() {
        let file = write_csv(
            "Date,ulying,country,ulying_price,ulying_div,call_v,put_v,ulying_volume,risk_free_rate,strike,maturity,call_price,put_price\n\
             3/7/19,VOLV-B,SWEDEN,150.2,,120,80,1e6,0.01,150,0.5,9.1,7.4\n",
        );
        let rows = read_observations(file.path(), "%m/%d/%y").unwrap();

        let row = &rows[0];
        assert_eq!(row.date, Date::from_ymd(2019, 3, 7).unwrap());
        assert_eq!(row.country, "SWEDEN");
        assert_eq!(row.spot, Some(150.2));
        assert_eq!(row.dividend, 0.0);
        assert_eq!(row.call_volume, Some(120.0));
        assert_eq!(row.underlying_volume, Some(1e6));
        assert_eq!(row.rate, Some(0.01));
    }

    #[test]
    fn test_unparsable_and_non_finite_cells_are_missing() {
        let file = write_csv(
            "date,underlying,country,spot,strike,call_price\n\
             2024-03-01,EQNR,NORWAY,n/a,inf,NaN\n",
        );
        let rows = read_observations(file.path(), "%Y-%m-%d").unwrap();
        assert_eq!(rows[0].spot, None);
        assert_eq!(rows[0].strike, None);
        assert_eq!(rows[0].call_price, None);
    }

    #[test]
    fn test_bad_date_reports_line() {
        let file = write_csv(
            "date,underlying,country\n\
             2024-03-01,EQNR,NORWAY\n\
             01.03.2024,EQNR,NORWAY\n",
        );
        match read_observations(file.path(), "%Y-%m-%d") {
            Err(CliError::InvalidInput { line, message, .. }) => {
                assert_eq!(line, 3);
                assert!(message.contains("01.03.2024"));
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = read_observations(Path::new("/nonexistent/rows.csv"), "%Y-%m-%d").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
