//! Market data error types.
//!
//! This module provides structured error handling for rate-table lookups
//! and rate-history construction.

use crate::types::{Date, PricingError};
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `UnknownCountry`: Country has no bucket table (fatal for a batch)
/// - `NonChronologicalSnapshot`: Rate history is append-only in date order
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::UnknownCountry("FINLAND".to_string());
/// assert_eq!(format!("{}", err), "Unknown country: FINLAND (supported: NORWAY, SWEDEN, DENMARK)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Country not covered by any rate table.
    #[error("Unknown country: {0} (supported: NORWAY, SWEDEN, DENMARK)")]
    UnknownCountry(String),

    /// Snapshot dated at or before the latest entry of an append-only history.
    #[error("Non-chronological rate snapshot: {got} is not after {latest}")]
    NonChronologicalSnapshot {
        /// Latest date already in the history
        latest: Date,
        /// Date of the rejected snapshot
        got: Date,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::UnknownCountry(_) => PricingError::Configuration(err.to_string()),
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_chronological_display() {
        let err = MarketDataError::NonChronologicalSnapshot {
            latest: Date::from_ymd(2024, 1, 2).unwrap(),
            got: Date::from_ymd(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            format!("{}", err),
            "Non-chronological rate snapshot: 2024-01-01 is not after 2024-01-02"
        );
    }

    #[test]
    fn test_unknown_country_is_configuration_error() {
        let pricing_err: PricingError = MarketDataError::UnknownCountry("X".to_string()).into();
        assert!(matches!(pricing_err, PricingError::Configuration(_)));
    }

    #[test]
    fn test_other_errors_are_invalid_input() {
        let latest = Date::from_ymd(2024, 1, 2).unwrap();
        let pricing_err: PricingError =
            MarketDataError::NonChronologicalSnapshot { latest, got: latest }.into();
        match pricing_err {
            PricingError::InvalidInput(msg) => assert!(msg.contains("2024-01-02")),
            other => panic!("Expected InvalidInput variant, got {:?}", other),
        }
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = MarketDataError::UnknownCountry("X".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
