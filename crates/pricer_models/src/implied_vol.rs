//! Implied volatility by bounded Newton-Raphson on the Black-Scholes kernel.
//!
//! The iteration starts from a low volatility guess, clamps every iterate to
//! `[min_vol, max_vol]`, and stops early when vega becomes negligible. It
//! never fails: non-convergence returns the last iterate. Only undefined
//! inputs (non-positive spot, strike, expiry or price) produce `None`.
//!
//! # Example
//!
//! ```
//! use pricer_core::types::OptionSide;
//! use pricer_models::analytical::BlackScholes;
//! use pricer_models::implied_vol::ImpliedVolSolver;
//!
//! let price = BlackScholes::floored(100.0, 0.0, 0.3).price(100.0, 0.5, OptionSide::Put).unwrap();
//! let solver = ImpliedVolSolver::with_defaults();
//! let iv = solver.solve(100.0, 100.0, 0.0, 0.5, price, OptionSide::Put).unwrap();
//! assert!((iv - 0.3).abs() < 1e-6);
//! ```

use pricer_core::math::solvers::{
    NewtonBounds, NewtonExit, NewtonOutcome, NewtonRaphsonSolver, SolverConfig,
};
use pricer_core::types::{OptionSide, PricingError};

use crate::analytical::BlackScholes;

/// Controls for [`ImpliedVolSolver`].
///
/// Defaults: start 0.01, bounds `[1e-4, 5.0]`, step tolerance 1e-6,
/// 100 iterations, vega floor 1e-10 (price units per unit volatility).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpliedVolConfig {
    /// Starting volatility.
    pub initial_vol: f64,
    /// Lower clamp.
    pub min_vol: f64,
    /// Upper clamp.
    pub max_vol: f64,
    /// Step tolerance between successive iterates.
    pub tolerance: f64,
    /// Iteration cap.
    pub max_iterations: usize,
    /// Iteration stops once raw vega falls below this.
    pub min_vega: f64,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            initial_vol: 0.01,
            min_vol: 1e-4,
            max_vol: 5.0,
            tolerance: 1e-6,
            max_iterations: 100,
            min_vega: 1e-10,
        }
    }
}

impl ImpliedVolConfig {
    /// Sets the starting volatility.
    pub fn with_initial_vol(mut self, initial_vol: f64) -> Self {
        self.initial_vol = initial_vol;
        self
    }

    /// Sets the clamp range.
    pub fn with_bounds(mut self, min_vol: f64, max_vol: f64) -> Self {
        self.min_vol = min_vol;
        self.max_vol = max_vol;
        self
    }

    /// Sets the step tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that bounds are ordered and positive and the controls are usable.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.min_vol > 0.0 && self.max_vol > self.min_vol) {
            return Err(PricingError::Configuration(format!(
                "implied vol bounds must satisfy 0 < min < max, got [{}, {}]",
                self.min_vol, self.max_vol
            )));
        }
        if !(self.tolerance > 0.0) || self.max_iterations == 0 {
            return Err(PricingError::Configuration(
                "implied vol tolerance must be positive and max_iterations > 0".to_string(),
            ));
        }
        if self.initial_vol.is_nan() || self.initial_vol <= 0.0 {
            return Err(PricingError::Configuration(format!(
                "implied vol initial guess must be positive, got {}",
                self.initial_vol
            )));
        }
        Ok(())
    }
}

/// Inverts Black-Scholes prices for volatility.
#[derive(Debug, Clone)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
    newton: NewtonRaphsonSolver<f64>,
}

impl ImpliedVolSolver {
    /// Creates a solver with the given controls.
    pub fn new(config: ImpliedVolConfig) -> Self {
        let newton = NewtonRaphsonSolver::new(
            SolverConfig::implied_vol()
                .with_tolerance(config.tolerance)
                .with_max_iterations(config.max_iterations),
        );
        Self { config, newton }
    }

    /// Creates a solver with [`ImpliedVolConfig::default`].
    pub fn with_defaults() -> Self {
        Self::new(ImpliedVolConfig::default())
    }

    /// Returns the solver controls.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Implied volatility in `[min_vol, max_vol]`, or `None` for undefined inputs.
    pub fn solve(
        &self,
        spot: f64,
        strike: f64,
        rate: f64,
        expiry: f64,
        market_price: f64,
        side: OptionSide,
    ) -> Option<f64> {
        self.solve_detailed(spot, strike, rate, expiry, market_price, side)
            .map(|outcome| outcome.x)
    }

    /// Like [`solve`](Self::solve) but reports iterations and the stop reason.
    pub fn solve_detailed(
        &self,
        spot: f64,
        strike: f64,
        rate: f64,
        expiry: f64,
        market_price: f64,
        side: OptionSide,
    ) -> Option<NewtonOutcome<f64>> {
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !(positive(spot) && positive(strike) && positive(expiry) && positive(market_price)) {
            return None;
        }
        if !rate.is_finite() {
            return None;
        }

        let residual_and_vega = |sigma: f64| {
            let bs = BlackScholes::floored(spot, rate, sigma);
            match (bs.price(strike, expiry, side), bs.vega_raw(strike, expiry)) {
                (Some(price), Some(vega)) => (price - market_price, vega),
                _ => (f64::NAN, f64::NAN),
            }
        };
        let bounds = NewtonBounds::new(self.config.min_vol, self.config.max_vol, self.config.min_vega);
        let outcome = self
            .newton
            .iterate_bounded(residual_and_vega, self.config.initial_vol, bounds);

        match outcome.exit {
            NewtonExit::NonFinite => None,
            _ => Some(outcome),
        }
    }
}

impl Default for ImpliedVolSolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}
