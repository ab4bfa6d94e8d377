//! Error types for the finite-difference solver.
//!
//! Grid and configuration problems are reported before any stepping starts.
//! A PSOR step that runs out of sweeps is not an error: the solver keeps the
//! last sweep and records it in [`SweepStats`](super::SweepStats).

use pricer_core::types::PricingError;
use thiserror::Error;

/// Finite-difference setup errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FdError {
    /// Grid needs at least two spot steps and one time step.
    #[error("Invalid grid: {space_steps} spot steps x {time_steps} time steps (need >= 2 x >= 1)")]
    InvalidGrid {
        /// Number of spot steps `M`.
        space_steps: usize,
        /// Number of time steps `N`.
        time_steps: usize,
    },

    /// Upper spot boundary must be finite and positive.
    #[error("Invalid upper spot boundary: {s_max}")]
    InvalidSpotMax {
        /// Offending boundary.
        s_max: f64,
    },

    /// Contract input is not a finite number.
    #[error("Non-finite input '{name}': {value}")]
    NonFiniteInput {
        /// Input name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Invalid solver configuration.
    #[error("Invalid configuration '{name}': {value}")]
    InvalidConfig {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<FdError> for PricingError {
    fn from(err: FdError) -> Self {
        match err {
            FdError::InvalidConfig { .. } => PricingError::Configuration(err.to_string()),
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fd_error_display() {
        let err = FdError::InvalidGrid {
            space_steps: 1,
            time_steps: 0,
        };
        assert!(err.to_string().contains("1 spot steps x 0 time steps"));

        let err = FdError::InvalidSpotMax { s_max: -1.0 };
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = FdError::InvalidConfig {
            name: "omega",
            value: "2.5 outside (0, 2)".to_string(),
        }
        .into();
        assert!(matches!(err, PricingError::Configuration(_)));

        let err: PricingError = FdError::NonFiniteInput {
            name: "volatility",
            value: f64::NAN,
        }
        .into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }
}
