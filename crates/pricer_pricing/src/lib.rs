//! # Pricer Pricing (Layer 3: Numerical Engines)
//!
//! American option pricing on a Crank-Nicolson finite-difference grid and
//! the early-exercise premium (EEP) derived from it.
//!
//! ## Modules
//!
//! - [`fd`]: value grid, PSOR configuration and the American solver
//! - [`eep`]: EEP engine and put-call parity residuals
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::eep::{EarlyExercisePremiumEngine, EepConfig, EepInputs};
//!
//! let engine = EarlyExercisePremiumEngine::new(EepConfig::default().with_grid(60, 60)).unwrap();
//! let inputs = EepInputs {
//!     spot: Some(52.0),
//!     strike: Some(50.0),
//!     expiry: Some(0.25),
//!     rate: Some(0.03),
//!     volatility: Some(0.35),
//!     pv_dividends: Some(1.0),
//! };
//! let eep = engine.premium(&inputs).unwrap();
//! assert!(eep >= 0.0);
//! ```
//!
//! ## Concurrency
//!
//! Every pricing call allocates and owns its grid, so engines are `Sync`
//! and can be shared across worker threads without locking.

#![warn(missing_docs)]

pub mod eep;
pub mod fd;

pub use eep::{EarlyExercisePremiumEngine, EepBreakdown, EepConfig, EepInputs};
pub use fd::{AmericanFdSolver, AmericanOption, FdConfig, FdError, GridSpec, PricingGrid};
