//! Grid resolution and PSOR settings for EEP estimation.

use crate::fd::{FdConfig, FdError};

/// Settings of the two finite-difference solves behind one EEP.
///
/// Defaults to a 100 x 100 grid with PSOR tolerance 1e-3, the resolution
/// used for batch runs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EepConfig {
    /// Spot steps `M`.
    pub space_steps: usize,
    /// Time steps `N`.
    pub time_steps: usize,
    /// PSOR settings.
    pub fd: FdConfig,
}

impl Default for EepConfig {
    fn default() -> Self {
        Self {
            space_steps: 100,
            time_steps: 100,
            fd: FdConfig::default().with_tolerance(1e-3),
        }
    }
}

impl EepConfig {
    /// Sets both grid dimensions.
    pub fn with_grid(mut self, space_steps: usize, time_steps: usize) -> Self {
        self.space_steps = space_steps;
        self.time_steps = time_steps;
        self
    }

    /// Replaces the PSOR settings.
    pub fn with_fd(mut self, fd: FdConfig) -> Self {
        self.fd = fd;
        self
    }

    /// Validates grid dimensions and PSOR settings.
    pub fn validate(&self) -> Result<(), FdError> {
        if self.space_steps < 2 || self.time_steps == 0 {
            return Err(FdError::InvalidGrid {
                space_steps: self.space_steps,
                time_steps: self.time_steps,
            });
        }
        self.fd.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_batch_resolution() {
        let config = EepConfig::default();
        assert_eq!((config.space_steps, config.time_steps), (100, 100));
        assert_eq!(config.fd.tolerance, 1e-3);
        assert_eq!(config.fd.omega, 1.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(EepConfig::default().with_grid(0, 10).validate().is_err());
        assert!(EepConfig::default().with_grid(10, 0).validate().is_err());
        assert!(EepConfig::default()
            .with_fd(FdConfig::default().with_max_sweeps(0))
            .validate()
            .is_err());
    }
}
