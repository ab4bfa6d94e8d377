//! Market data for discounting: country bucket tables, rate snapshots and
//! their as-of history, and the bucket interpolator.
//!
//! # Components
//!
//! - [`country`]: Supported markets and their nine-bucket series tables
//! - [`rates`]: `RateSnapshot`, `RateCurveHistory`, `RiskFreeRateInterpolator`
//! - [`error`]: Market data error types (MarketDataError)
//!
//! Rates are decimals (0.05 = 5%). Missing quotes are absent, never NaN.

pub mod country;
pub mod error;
pub mod rates;

pub use country::{Country, MATURITY_BUCKET_DAYS};
pub use error::MarketDataError;
pub use rates::{RateCurveHistory, RateSnapshot, RiskFreeRateInterpolator};
