//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form pricing, volatility inversion, dividends, and the observation
//! row model.
//!
//! This crate provides:
//! - Black-Scholes kernel with floored inputs (`analytical`)
//! - Bounded Newton-Raphson implied volatility (`implied_vol`)
//! - Dividend schedules and their present value before expiry (`dividends`)
//! - Observation rows, row identity and pricing results (`observations`)
//!
//! ## Design Principles
//!
//! - **Missing, not NaN**: undefined results are `Option::None`
//! - **Best effort**: non-convergence returns the last iterate
//! - **Builder pattern** for configuration with sensible defaults

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod dividends;
pub mod implied_vol;
pub mod observations;

pub use dividends::{DividendEvent, DividendPvEngine, DividendSchedule};
pub use implied_vol::{ImpliedVolConfig, ImpliedVolSolver};
pub use observations::{MarketObservation, PricingResult, RowKey};
