//! Early-exercise premium from a pair of American finite-difference prices.
//!
//! With `S_adj = S − PV_div`, both American legs are priced on `S_adj` over
//! `[0, max(2·S_adj, 2·K)]`. The combined premium is the part of
//! `AC − AP` not explained by European put-call parity:
//!
//! ```text
//! EEP = max((AC − AP) − (S_adj − K·e^{−rT}), 0)
//! ```
//!
//! Per-side premia compare each American leg with its Black-Scholes
//! European counterpart at the same volatility.

use pricer_core::types::OptionSide;
use pricer_models::analytical::BlackScholes;

use super::config::EepConfig;
use crate::fd::{AmericanFdSolver, AmericanOption, FdError, GridSpec};

/// Inputs of one EEP estimate. Any `None` makes the estimate missing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EepInputs {
    /// Observed spot.
    pub spot: Option<f64>,
    /// Strike.
    pub strike: Option<f64>,
    /// Time to expiry in years.
    pub expiry: Option<f64>,
    /// Risk-free rate.
    pub rate: Option<f64>,
    /// Volatility, normally the mean of call and put implied vols.
    pub volatility: Option<f64>,
    /// PV of dividends paid before expiry.
    pub pv_dividends: Option<f64>,
}

impl EepInputs {
    /// Mean of two implied vols; missing if either is.
    pub fn average_vol(call: Option<f64>, put: Option<f64>) -> Option<f64> {
        Some((call? + put?) / 2.0)
    }
}

/// American and European legs behind one EEP estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EepBreakdown {
    /// `S − PV_div`.
    pub adjusted_spot: f64,
    /// Upper grid boundary.
    pub s_max: f64,
    /// American call (AC).
    pub american_call: f64,
    /// American put (AP).
    pub american_put: f64,
    /// European call on the adjusted spot (EC).
    pub european_call: Option<f64>,
    /// European put on the adjusted spot (EP).
    pub european_put: Option<f64>,
    /// Combined premium, never negative.
    pub eep: f64,
    /// `max(AC − EC, 0)`.
    pub eep_call: Option<f64>,
    /// `max(AP − EP, 0)`.
    pub eep_put: Option<f64>,
}

/// Estimates early-exercise premia.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::eep::{EarlyExercisePremiumEngine, EepInputs};
///
/// let engine = EarlyExercisePremiumEngine::with_defaults();
/// let inputs = EepInputs {
///     spot: Some(100.0),
///     strike: Some(100.0),
///     expiry: Some(0.5),
///     rate: Some(0.05),
///     volatility: Some(0.25),
///     pv_dividends: Some(0.0),
/// };
/// let breakdown = engine.estimate(&inputs).unwrap();
/// assert!(breakdown.eep >= 0.0);
///
/// // Dividends larger than the spot leave nothing to price.
/// let inputs = EepInputs { pv_dividends: Some(150.0), ..inputs };
/// assert!(engine.estimate(&inputs).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct EarlyExercisePremiumEngine {
    config: EepConfig,
    solver: AmericanFdSolver,
}

impl Default for EarlyExercisePremiumEngine {
    fn default() -> Self {
        let config = EepConfig::default();
        Self {
            solver: AmericanFdSolver::from_validated(config.fd),
            config,
        }
    }
}

impl EarlyExercisePremiumEngine {
    /// Creates an engine.
    ///
    /// # Errors
    ///
    /// Returns `FdError` if the grid or PSOR settings are invalid.
    pub fn new(config: EepConfig) -> Result<Self, FdError> {
        config.validate()?;
        Ok(Self {
            solver: AmericanFdSolver::new(config.fd)?,
            config,
        })
    }

    /// Engine on a 100 x 100 grid with PSOR tolerance 1e-3.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Engine configuration.
    pub fn config(&self) -> &EepConfig {
        &self.config
    }

    /// Combined premium only.
    pub fn premium(&self, inputs: &EepInputs) -> Option<f64> {
        self.estimate(inputs).map(|b| b.eep)
    }

    /// Full breakdown, or `None` when an input is missing, the adjusted spot
    /// is not positive, or a grid price is not finite.
    pub fn estimate(&self, inputs: &EepInputs) -> Option<EepBreakdown> {
        let spot = inputs.spot?;
        let strike = inputs.strike?;
        let expiry = inputs.expiry?;
        let rate = inputs.rate?;
        let volatility = inputs.volatility?;
        let pv_dividends = inputs.pv_dividends?;

        let adjusted_spot = spot - pv_dividends;
        if adjusted_spot.is_nan() || adjusted_spot <= 0.0 {
            return None;
        }
        let s_max = (2.0 * adjusted_spot).max(2.0 * strike);
        let spec = GridSpec::new(s_max, self.config.space_steps, self.config.time_steps);

        let call = AmericanOption::new(
            adjusted_spot,
            strike,
            expiry,
            rate,
            volatility,
            OptionSide::Call,
        );
        let american_call = self.solver.price(&call, spec).ok()?;
        let american_put = self
            .solver
            .price(&call.with_side(OptionSide::Put), spec)
            .ok()?;
        if !(american_call.is_finite() && american_put.is_finite()) {
            return None;
        }

        let forward_parity = adjusted_spot - strike * (-rate * expiry).exp();
        let eep = ((american_call - american_put) - forward_parity).max(0.0);
        if !eep.is_finite() {
            return None;
        }

        let european = BlackScholes::floored(adjusted_spot, rate, volatility);
        let european_call = european.price_call(strike, expiry);
        let european_put = european.price_put(strike, expiry);

        Some(EepBreakdown {
            adjusted_spot,
            s_max,
            american_call,
            american_put,
            european_call,
            european_put,
            eep,
            eep_call: european_call.map(|ec| (american_call - ec).max(0.0)),
            eep_put: european_put.map(|ep| (american_put - ep).max(0.0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn inputs(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64, pv: f64) -> EepInputs {
        EepInputs {
            spot: Some(spot),
            strike: Some(strike),
            expiry: Some(expiry),
            rate: Some(rate),
            volatility: Some(vol),
            pv_dividends: Some(pv),
        }
    }

    #[test]
    fn test_new_validates() {
        assert!(EarlyExercisePremiumEngine::new(EepConfig::default().with_grid(1, 1)).is_err());
        let engine = EarlyExercisePremiumEngine::new(EepConfig::default().with_grid(40, 30)).unwrap();
        assert_eq!(engine.config().space_steps, 40);
    }

    #[test]
    fn test_default_solver_uses_eep_tolerance() {
        let engine = EarlyExercisePremiumEngine::default();
        assert_eq!(*engine.solver.config(), EepConfig::default().fd);
        assert_eq!(engine.solver.config().tolerance, 1e-3);
        assert_ne!(*engine.solver.config(), *AmericanFdSolver::default().config());
    }

    #[test]
    fn test_missing_inputs() {
        let engine = EarlyExercisePremiumEngine::with_defaults();
        let full = inputs(100.0, 100.0, 1.0, 0.05, 0.2, 0.0);
        assert!(engine.estimate(&full).is_some());

        let cases = [
            EepInputs { spot: None, ..full },
            EepInputs { strike: None, ..full },
            EepInputs { expiry: None, ..full },
            EepInputs { rate: None, ..full },
            EepInputs { volatility: None, ..full },
            EepInputs { pv_dividends: None, ..full },
        ];
        for case in cases {
            assert!(engine.estimate(&case).is_none());
        }
    }

    #[test]
    fn test_non_positive_adjusted_spot() {
        let engine = EarlyExercisePremiumEngine::with_defaults();
        assert!(engine.premium(&inputs(10.0, 100.0, 1.0, 0.05, 0.2, 10.0)).is_none());
        assert!(engine.premium(&inputs(10.0, 100.0, 1.0, 0.05, 0.2, 12.0)).is_none());
        assert!(engine.premium(&inputs(f64::NAN, 100.0, 1.0, 0.05, 0.2, 0.0)).is_none());
    }

    #[test]
    fn test_grid_uses_adjusted_spot() {
        let engine = EarlyExercisePremiumEngine::with_defaults();
        let b = engine.estimate(&inputs(110.0, 80.0, 0.5, 0.03, 0.3, 5.0)).unwrap();
        assert_relative_eq!(b.adjusted_spot, 105.0);
        assert_relative_eq!(b.s_max, 210.0);

        let b = engine.estimate(&inputs(50.0, 80.0, 0.5, 0.03, 0.3, 0.0)).unwrap();
        assert_relative_eq!(b.s_max, 160.0);
    }

    #[test]
    fn test_put_premium_with_positive_rate() {
        let engine = EarlyExercisePremiumEngine::new(
            EepConfig::default().with_fd(crate::fd::FdConfig::default().with_tolerance(1e-6)),
        )
        .unwrap();
        let b = engine.estimate(&inputs(100.0, 100.0, 1.0, 0.05, 0.2, 0.0)).unwrap();
        // American put ~6.09 vs European 5.57; the call carries no premium.
        let eep_put = b.eep_put.unwrap();
        assert!(eep_put > 0.3 && eep_put < 0.7, "eep_put = {}", eep_put);
        assert!(b.eep_call.unwrap() < 0.1);
        assert!(b.eep >= 0.0);
    }

    #[test]
    fn test_average_vol() {
        assert_relative_eq!(EepInputs::average_vol(Some(0.2), Some(0.4)).unwrap(), 0.3, epsilon = 1e-15);
        assert_eq!(EepInputs::average_vol(None, Some(0.4)), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_eep_non_negative(
            spot in 20.0_f64..200.0,
            strike in 20.0_f64..200.0,
            expiry in 0.02_f64..2.0,
            rate in -0.01_f64..0.1,
            vol in 0.05_f64..1.0,
            pv in 0.0_f64..5.0,
        ) {
            let engine = EarlyExercisePremiumEngine::new(EepConfig::default().with_grid(30, 30)).unwrap();
            if let Some(b) = engine.estimate(&inputs(spot, strike, expiry, rate, vol, pv)) {
                prop_assert!(b.eep >= 0.0);
                prop_assert!(b.eep_call.map_or(true, |v| v >= 0.0));
                prop_assert!(b.eep_put.map_or(true, |v| v >= 0.0));
            }
        }
    }
}
