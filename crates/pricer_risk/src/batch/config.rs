//! Batch configuration.

use pricer_models::ImpliedVolConfig;
use pricer_pricing::EepConfig;

use crate::parallel::ParallelConfig;

/// Spot fed to the implied-vol inversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpotBasis {
    /// `S − PV_div`, consistent with the grid prices.
    #[default]
    Adjusted,
    /// Observed spot.
    Raw,
}

/// Settings of one [`BatchPricer`](super::BatchPricer).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::EepConfig;
/// use pricer_risk::batch::{BatchConfig, SpotBasis};
/// use pricer_risk::parallel::ParallelConfig;
///
/// let config = BatchConfig::default()
///     .with_eep(EepConfig::default().with_grid(60, 60))
///     .with_parallel(ParallelConfig::default().with_num_threads(4))
///     .with_spot_basis(SpotBasis::Raw);
/// assert_eq!(config.eep.space_steps, 60);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BatchConfig {
    /// Newton settings for implied vols.
    pub implied_vol: ImpliedVolConfig,
    /// Grid and PSOR settings for the EEP.
    pub eep: EepConfig,
    /// Worker pool.
    pub parallel: ParallelConfig,
    /// Spot used when inverting implied vols.
    pub spot_basis: SpotBasis,
}

impl BatchConfig {
    /// Replaces the implied-vol settings.
    pub fn with_implied_vol(mut self, implied_vol: ImpliedVolConfig) -> Self {
        self.implied_vol = implied_vol;
        self
    }

    /// Replaces the EEP settings.
    pub fn with_eep(mut self, eep: EepConfig) -> Self {
        self.eep = eep;
        self
    }

    /// Replaces the worker pool settings.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the implied-vol spot basis.
    pub fn with_spot_basis(mut self, spot_basis: SpotBasis) -> Self {
        self.spot_basis = spot_basis;
        self
    }
}
