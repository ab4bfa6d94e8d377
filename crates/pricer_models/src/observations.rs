//! Observation rows, their identity, and per-row pricing results.
//!
//! Every numeric input or output is `Option<f64>`: `None` marks a missing
//! value and flows through the pipeline without aborting it.

use std::fmt;

use pricer_core::types::Date;

/// Identity of an observation row: `(date, underlying, country)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowKey {
    /// Pricing date.
    pub date: Date,
    /// Underlying identifier.
    pub underlying: String,
    /// Country name as supplied.
    pub country: String,
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.date, self.underlying, self.country)
    }
}

/// One option pair (call and put on the same strike and expiry) observed on
/// one date.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::observations::MarketObservation;
///
/// let obs = MarketObservation::new(Date::from_ymd(2024, 3, 1).unwrap(), "EQNR", "NORWAY")
///     .with_spot(300.0)
///     .with_strike(280.0)
///     .with_maturity(0.25)
///     .with_prices(25.0, 4.0);
/// assert_eq!(obs.call_moneyness(), Some(300.0 / 280.0));
/// assert_eq!(obs.dividend, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketObservation {
    /// Pricing date.
    pub date: Date,
    /// Underlying identifier.
    pub underlying: String,
    /// Country name (resolved against the rate tables by the batch).
    pub country: String,
    /// Underlying spot price.
    pub spot: Option<f64>,
    /// Strike.
    pub strike: Option<f64>,
    /// Time to expiry in years.
    pub maturity: Option<f64>,
    /// Risk-free rate for the option's maturity (decimal).
    pub rate: Option<f64>,
    /// Call premium.
    pub call_price: Option<f64>,
    /// Put premium.
    pub put_price: Option<f64>,
    /// Call traded volume.
    pub call_volume: Option<f64>,
    /// Put traded volume.
    pub put_volume: Option<f64>,
    /// Underlying traded volume.
    pub underlying_volume: Option<f64>,
    /// Cash dividend paid on this date (zero on non-dividend days).
    pub dividend: f64,
}

impl MarketObservation {
    /// Creates a row with every numeric field missing and no dividend.
    pub fn new(date: Date, underlying: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            date,
            underlying: underlying.into(),
            country: country.into(),
            spot: None,
            strike: None,
            maturity: None,
            rate: None,
            call_price: None,
            put_price: None,
            call_volume: None,
            put_volume: None,
            underlying_volume: None,
            dividend: 0.0,
        }
    }

    /// Sets the spot.
    pub fn with_spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike.
    pub fn with_strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the maturity in years.
    pub fn with_maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the row rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets call and put premia.
    pub fn with_prices(mut self, call: f64, put: f64) -> Self {
        self.call_price = Some(call);
        self.put_price = Some(put);
        self
    }

    /// Sets the dividend paid on this date.
    pub fn with_dividend(mut self, dividend: f64) -> Self {
        self.dividend = dividend;
        self
    }

    /// Row identity.
    pub fn key(&self) -> RowKey {
        RowKey {
            date: self.date,
            underlying: self.underlying.clone(),
            country: self.country.clone(),
        }
    }

    /// `S / K`.
    pub fn call_moneyness(&self) -> Option<f64> {
        ratio(self.spot?, self.strike?)
    }

    /// `K / S`.
    pub fn put_moneyness(&self) -> Option<f64> {
        ratio(self.strike?, self.spot?)
    }
}

#[inline]
fn ratio(num: f64, den: f64) -> Option<f64> {
    let r = num / den;
    r.is_finite().then_some(r)
}

/// Outputs for one observation row.
///
/// Invariant: every premium (`eep`, `eep_call`, `eep_put`) is `>= 0` when
/// present.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Rate used for the row (supplied or resolved from the rate history).
    pub risk_free_rate: Option<f64>,
    /// Present value of dividends paid before expiry.
    pub pv_dividends: Option<f64>,
    /// Implied volatility from the call premium.
    pub implied_vol_call: Option<f64>,
    /// Implied volatility from the put premium.
    pub implied_vol_put: Option<f64>,
    /// American call price on the dividend-adjusted spot.
    pub american_call_price: Option<f64>,
    /// American put price on the dividend-adjusted spot.
    pub american_put_price: Option<f64>,
    /// Early-exercise premium netted against parity.
    pub eep: Option<f64>,
    /// Call premium over the European price.
    pub eep_call: Option<f64>,
    /// Put premium over the European price.
    pub eep_put: Option<f64>,
    /// `call_price - put_price`.
    pub parity_y: Option<f64>,
    /// `S - K·e^{-rT} - PV_div`.
    pub parity_x: Option<f64>,
    /// `parity_x + eep`.
    pub parity_x_adjusted: Option<f64>,
    /// `parity_x + eep_call - eep_put`.
    pub parity_x_adjusted_sides: Option<f64>,
    /// `S / K`.
    pub call_moneyness: Option<f64>,
    /// `K / S`.
    pub put_moneyness: Option<f64>,
}

impl PricingResult {
    /// Output column names, in the order of [`values`](Self::values).
    pub const COLUMNS: [&'static str; 15] = [
        "risk_free_rate",
        "pv_dividends",
        "implied_vol_call",
        "implied_vol_put",
        "american_call_price",
        "american_put_price",
        "eep",
        "eep_call",
        "eep_put",
        "parity_y",
        "parity_x",
        "parity_x_adjusted",
        "parity_x_adjusted_sides",
        "call_moneyness",
        "put_moneyness",
    ];

    /// Output values aligned with [`COLUMNS`](Self::COLUMNS).
    pub fn values(&self) -> [Option<f64>; 15] {
        [
            self.risk_free_rate,
            self.pv_dividends,
            self.implied_vol_call,
            self.implied_vol_put,
            self.american_call_price,
            self.american_put_price,
            self.eep,
            self.eep_call,
            self.eep_put,
            self.parity_y,
            self.parity_x,
            self.parity_x_adjusted,
            self.parity_x_adjusted_sides,
            self.call_moneyness,
            self.put_moneyness,
        ]
    }
}
