//! Early-exercise premium estimation and the parity residual it adjusts.
//!
//! - [`EarlyExercisePremiumEngine`]: American call and put on the
//!   dividend-adjusted spot, combined and per-side premia
//! - [`ParityResidual`]: observed vs model put-call parity, before and
//!   after the premium adjustment

mod config;
mod engine;
mod parity;

pub use config::EepConfig;
pub use engine::{EarlyExercisePremiumEngine, EepBreakdown, EepInputs};
pub use parity::{ParityInputs, ParityResidual};
