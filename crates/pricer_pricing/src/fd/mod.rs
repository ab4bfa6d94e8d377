//! Finite-difference pricing of American options.
//!
//! - [`PricingGrid`]: value grid owned by one pricing call
//! - [`AmericanFdSolver`]: Crank-Nicolson stepping with projected SOR
//! - [`FdConfig`]: relaxation factor, tolerance and sweep cap
//! - [`FdError`]: setup errors

mod config;
mod error;
mod grid;
mod solver;

pub use config::{FdConfig, DEFAULT_MAX_SWEEPS, DEFAULT_OMEGA, DEFAULT_TOLERANCE};
pub use error::FdError;
pub use grid::PricingGrid;
pub use solver::{AmericanFdSolver, AmericanOption, FdSolution, GridSpec, SweepStats};
