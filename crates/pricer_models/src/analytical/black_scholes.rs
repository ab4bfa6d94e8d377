//! Black-Scholes pricing kernel for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Input floor
//!
//! Spot, strike, expiry and volatility are floored at [`INPUT_FLOOR`] before
//! use; the rate is taken as given. Any non-finite result is reported as
//! `None`, so callers never see ±∞ or NaN.

use num_traits::Float;
use pricer_core::types::OptionSide;

use super::distributions::{norm_cdf, norm_pdf};

/// Floor applied to spot, strike, expiry and volatility.
pub const INPUT_FLOOR: f64 = 1e-10;

/// Vega is quoted per volatility point.
const VOL_POINT: f64 = 100.0;

#[inline]
fn floored<T: Float>(x: T) -> T {
    let eps = T::from(INPUT_FLOOR).unwrap();
    // NaN compares false and is left for the finiteness check.
    if x < eps {
        eps
    } else {
        x
    }
}

#[inline]
fn finite<T: Float>(x: T) -> Option<T> {
    if x.is_finite() {
        Some(x)
    } else {
        None
    }
}

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::floored(100.0_f64, 0.05, 0.2);
/// let call = bs.price(100.0, 1.0, OptionSide::Call).unwrap();
/// let put = bs.price(100.0, 1.0, OptionSide::Put).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a model with spot and volatility floored at [`INPUT_FLOOR`].
    ///
    /// Never fails; non-finite inputs surface as `None` from the pricing
    /// methods.
    pub fn floored(spot: T, rate: T, volatility: T) -> Self {
        Self {
            spot: floored(spot),
            rate,
            volatility: floored(volatility),
        }
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T), `None` if not finite.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> Option<T> {
        let strike = floored(strike);
        let expiry = floored(expiry);
        let half = T::from(0.5).unwrap();

        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;
        finite((log_moneyness + drift) / (self.volatility * expiry.sqrt()))
    }

    /// d₂ = d₁ - σ√T, `None` if not finite.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> Option<T> {
        let d1 = self.d1(strike, expiry)?;
        finite(d1 - self.volatility * floored(expiry).sqrt())
    }

    /// European price for the given side.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionSide;
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::floored(100.0_f64, 0.05, 0.2);
    /// let call = bs.price(100.0, 1.0, OptionSide::Call).unwrap();
    /// assert!((call - 10.4506).abs() < 1e-3);
    ///
    /// let nan_spot = BlackScholes::floored(f64::NAN, 0.05, 0.2);
    /// assert!(nan_spot.price(100.0, 1.0, OptionSide::Call).is_none());
    /// ```
    pub fn price(&self, strike: T, expiry: T, side: OptionSide) -> Option<T> {
        let d1 = self.d1(strike, expiry)?;
        let d2 = self.d2(strike, expiry)?;
        let discounted_strike = floored(strike) * (-self.rate * floored(expiry)).exp();

        let value = match side {
            OptionSide::Call => self.spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            OptionSide::Put => discounted_strike * norm_cdf(-d2) - self.spot * norm_cdf(-d1),
        };
        finite(value)
    }

    /// European call price.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> Option<T> {
        self.price(strike, expiry, OptionSide::Call)
    }

    /// European put price.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> Option<T> {
        self.price(strike, expiry, OptionSide::Put)
    }

    /// ∂price/∂σ in price units per unit of volatility (S·√T·φ(d₁)).
    #[inline]
    pub fn vega_raw(&self, strike: T, expiry: T) -> Option<T> {
        let d1 = self.d1(strike, expiry)?;
        finite(self.spot * floored(expiry).sqrt() * norm_pdf(d1))
    }

    /// Vega per volatility point: [`vega_raw`](Self::vega_raw) / 100.
    ///
    /// Identical for calls and puts.
    #[inline]
    pub fn vega(&self, strike: T, expiry: T) -> Option<T> {
        self.vega_raw(strike, expiry)
            .map(|v| v / T::from(VOL_POINT).unwrap())
    }
}
