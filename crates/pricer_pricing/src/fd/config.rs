//! PSOR configuration.

use super::error::FdError;

/// Default over-relaxation factor.
pub const DEFAULT_OMEGA: f64 = 1.2;

/// Default max-norm stopping tolerance for one time step.
pub const DEFAULT_TOLERANCE: f64 = 1e-2;

/// Default sweep cap per time step.
pub const DEFAULT_MAX_SWEEPS: usize = 10_000;

/// Projected SOR settings for the Crank-Nicolson stepper.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::fd::FdConfig;
///
/// let config = FdConfig::default().with_tolerance(1e-3);
/// assert_eq!(config.omega, 1.2);
/// assert!(config.validate().is_ok());
///
/// assert!(FdConfig::default().with_omega(2.0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FdConfig {
    /// Over-relaxation factor, in `(0, 2)`.
    pub omega: f64,
    /// Sweeps stop once the largest node change falls below this.
    pub tolerance: f64,
    /// Sweep cap per time step.
    pub max_sweeps: usize,
}

impl Default for FdConfig {
    fn default() -> Self {
        Self {
            omega: DEFAULT_OMEGA,
            tolerance: DEFAULT_TOLERANCE,
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }
}

impl FdConfig {
    /// Sets the over-relaxation factor.
    pub fn with_omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    /// Sets the stopping tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the sweep cap.
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `FdError::InvalidConfig` if:
    /// - `omega` is outside `(0, 2)`
    /// - `tolerance` is not finite and positive
    /// - `max_sweeps` is 0
    pub fn validate(&self) -> Result<(), FdError> {
        if !(self.omega > 0.0 && self.omega < 2.0) {
            return Err(FdError::InvalidConfig {
                name: "omega",
                value: format!("{} outside (0, 2)", self.omega),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(FdError::InvalidConfig {
                name: "tolerance",
                value: format!("{} must be finite and positive", self.tolerance),
            });
        }
        if self.max_sweeps == 0 {
            return Err(FdError::InvalidConfig {
                name: "max_sweeps",
                value: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
