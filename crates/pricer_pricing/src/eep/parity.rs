//! Put-call parity residual and its early-exercise adjustment.
//!
//! For a dividend-paying underlying, European parity reads
//! `C − P = S − K·e^{−rT} − PV_div`. The observed left side is `y`, the
//! model right side is `x`. `x_adjusted` folds the early-exercise premium
//! back into `x`; `x_adjusted_sides` uses the per-side premia over the
//! European prices instead.

use super::engine::EepBreakdown;

/// Parity sides for one row. Each field is missing if any input is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParityResidual {
    /// `call_price − put_price`.
    pub y: Option<f64>,
    /// `S − K·e^{−rT} − PV_div`.
    pub x: Option<f64>,
    /// `x + eep`.
    pub x_adjusted: Option<f64>,
    /// `x + eep_call − eep_put`.
    pub x_adjusted_sides: Option<f64>,
}

/// Market side of a parity check.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParityInputs {
    /// Spot.
    pub spot: Option<f64>,
    /// Strike.
    pub strike: Option<f64>,
    /// Time to expiry in years.
    pub expiry: Option<f64>,
    /// Risk-free rate.
    pub rate: Option<f64>,
    /// PV of dividends before expiry.
    pub pv_dividends: Option<f64>,
    /// Observed call premium.
    pub call_price: Option<f64>,
    /// Observed put premium.
    pub put_price: Option<f64>,
}

impl ParityResidual {
    /// Evaluates both parity sides and folds in the early-exercise premia.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::eep::{ParityInputs, ParityResidual};
    ///
    /// let inputs = ParityInputs {
    ///     spot: Some(100.0),
    ///     strike: Some(100.0),
    ///     expiry: Some(1.0),
    ///     rate: Some(0.0),
    ///     pv_dividends: Some(2.0),
    ///     call_price: Some(7.0),
    ///     put_price: Some(8.5),
    /// };
    /// let residual = ParityResidual::compute(&inputs, None);
    /// assert_eq!(residual.y, Some(-1.5));
    /// assert_eq!(residual.x, Some(-2.0));
    /// assert_eq!(residual.x_adjusted, None);
    /// assert_eq!(residual.x_adjusted_sides, None);
    /// ```
    pub fn compute(inputs: &ParityInputs, breakdown: Option<&EepBreakdown>) -> Self {
        let y = finite(inputs.call_price.zip(inputs.put_price).map(|(c, p)| c - p));
        let x = finite(parity_x(inputs));
        let x_adjusted = finite(x.zip(breakdown).map(|(x, b)| x + b.eep));
        let x_adjusted_sides = finite(x.zip(breakdown).and_then(|(x, b)| {
            let net = b.eep_call? - b.eep_put?;
            Some(x + net)
        }));
        Self {
            y,
            x,
            x_adjusted,
            x_adjusted_sides,
        }
    }
}

fn parity_x(inputs: &ParityInputs) -> Option<f64> {
    let discounted_strike = inputs.strike? * (-inputs.rate? * inputs.expiry?).exp();
    Some(inputs.spot? - discounted_strike - inputs.pv_dividends?)
}

#[inline]
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
