//! Core time, option, and error types.
//!
//! This module provides:
//! - `time`: [`Date`] wrapper used for observation rows and rate snapshots
//! - `option`: [`OptionSide`] with intrinsic-value helpers
//! - `error`: Structured error types for pricing, date, and solver operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod option;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, PricingError};
pub use option::OptionSide;
pub use time::{Date, DAYS_PER_YEAR};
