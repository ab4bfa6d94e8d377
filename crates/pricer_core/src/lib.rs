//! # pricer_core: Foundation layer for the early-exercise premium pipeline
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Time types: `Date` with ACT/365 day arithmetic (`types::time`)
//! - Option side and payoff helpers: `OptionSide` (`types::option`)
//! - Error types: `PricingError`, `DateError` (`types::error`)
//! - Newton-Raphson root finding, strict and bounded (`math::solvers`)
//! - Country rate tables, rate history and interpolation (`market_data`)
//!
//! ## Minimal Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::{Country, RateCurveHistory, RateSnapshot, RiskFreeRateInterpolator};
//! use pricer_core::types::{Date, OptionSide};
//!
//! let pricing = Date::from_ymd(2024, 3, 1).unwrap();
//! let snapshot = RateSnapshot::new(pricing)
//!     .with_rate("STISEKTNDFI=", 0.039)
//!     .with_rate("STISEK3MDFI=", 0.041);
//! let history = RateCurveHistory::from_snapshots([snapshot]).unwrap();
//!
//! let interp = RiskFreeRateInterpolator::new(Country::Sweden);
//! let r = interp.rate_as_of(&history, pricing, 45.0).unwrap();
//! assert!(r > 0.039 && r < 0.041);
//!
//! assert_eq!(OptionSide::Put.intrinsic(90.0, 100.0), 10.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, OptionSide, Country and RateSnapshot

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
