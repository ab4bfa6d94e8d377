//! Option side (call / put) and payoff helpers.

use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// Side of a vanilla option contract.
///
/// # Examples
///
/// ```
/// use pricer_core::types::OptionSide;
///
/// assert_eq!(OptionSide::Call.intrinsic(110.0, 100.0), 10.0);
/// assert_eq!(OptionSide::Put.intrinsic(110.0, 100.0), 0.0);
/// assert_eq!("put".parse::<OptionSide>().unwrap(), OptionSide::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionSide {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionSide {
    /// Returns true for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionSide::Call)
    }

    /// Signed exercise value `S - K` (call) or `K - S` (put), not floored.
    #[inline]
    pub fn exercise_value(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionSide::Call => spot - strike,
            OptionSide::Put => strike - spot,
        }
    }

    /// Intrinsic value `max(exercise_value, 0)`.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        self.exercise_value(spot, strike).max(0.0)
    }

    /// Lower-case name used in logs and file columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSide::Call => "call",
            OptionSide::Put => "put",
        }
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionSide {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionSide::Call),
            "put" | "p" => Ok(OptionSide::Put),
            other => Err(PricingError::InvalidInput(format!(
                "Unknown option side: {}. Supported: call, put",
                other
            ))),
        }
    }
}
