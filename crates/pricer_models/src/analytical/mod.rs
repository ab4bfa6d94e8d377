//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - Black-Scholes pricing kernel with floored inputs and per-point vega
//! - Standard normal CDF / PDF
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**
//! - **Missing, not infinite**: non-finite results are `None`

pub mod black_scholes;
pub mod distributions;

// Re-export main types at module level
pub use black_scholes::{BlackScholes, INPUT_FLOOR};
pub use distributions::{norm_cdf, norm_pdf};
