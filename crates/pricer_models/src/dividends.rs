//! Discrete cash dividends and their present value before expiry.
//!
//! [`DividendSchedule`] is a read-only view of the nonzero dividend entries
//! of one underlying's observation series. [`DividendPvEngine`] discounts
//! every dividend paid strictly after a pricing date and strictly before
//! expiry, using the rate snapshot in force on the pricing date.
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{Country, RateCurveHistory, RateSnapshot};
//! use pricer_core::types::Date;
//! use pricer_models::dividends::{DividendEvent, DividendPvEngine, DividendSchedule};
//!
//! let pricing = Date::from_ymd(2024, 1, 1).unwrap();
//! let mut snapshot = RateSnapshot::new(pricing);
//! for series in Country::Norway.series() {
//!     snapshot.insert(*series, 0.05);
//! }
//! let history = RateCurveHistory::from_snapshots([snapshot]).unwrap();
//! let schedule = DividendSchedule::new([DividendEvent::new(pricing.add_days(100), 10.0)]);
//!
//! let engine = DividendPvEngine::new(Country::Norway);
//! let pv = engine.present_value(pricing, 200.0 / 365.0, &schedule, &history).unwrap();
//! assert!((pv - 10.0 * (-0.05_f64 * 100.0 / 365.0).exp()).abs() < 1e-12);
//! ```

use pricer_core::market_data::{Country, RateCurveHistory, RiskFreeRateInterpolator};
use pricer_core::types::{Date, DAYS_PER_YEAR};

use crate::observations::MarketObservation;

/// A cash dividend paid on a date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DividendEvent {
    /// Payment date.
    pub date: Date,
    /// Cash amount.
    pub amount: f64,
}

impl DividendEvent {
    /// Creates an event.
    pub fn new(date: Date, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Date-ordered dividend events of one underlying.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DividendSchedule {
    events: Vec<DividendEvent>,
}

impl DividendSchedule {
    /// Builds a schedule, dropping zero and non-finite amounts.
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = DividendEvent>,
    {
        let mut events: Vec<DividendEvent> = events
            .into_iter()
            .filter(|e| e.amount.is_finite() && e.amount != 0.0)
            .collect();
        events.sort_by_key(|e| e.date);
        Self { events }
    }

    /// Collects the dividend entries of an observation series.
    pub fn from_observations<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a MarketObservation>,
    {
        Self::new(rows.into_iter().map(|r| DividendEvent::new(r.date, r.dividend)))
    }

    /// Events in date order.
    pub fn events(&self) -> &[DividendEvent] {
        &self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no dividend is scheduled.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Present value of dividends paid before expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividendPvEngine {
    interpolator: RiskFreeRateInterpolator,
}

impl DividendPvEngine {
    /// Creates an engine discounting on `country`'s rate table.
    pub fn new(country: Country) -> Self {
        Self {
            interpolator: RiskFreeRateInterpolator::new(country),
        }
    }

    /// PV at `pricing_date` of every event with
    /// `pricing_date < date` and `days < maturity · 365`.
    ///
    /// Each dividend is discounted at `exp(-r · days / 365)` with `r`
    /// interpolated at `days` on the snapshot in force on `pricing_date`.
    /// A dividend whose rate cannot be resolved contributes zero. Returns
    /// `None` only when `maturity_years` is not finite.
    pub fn present_value(
        &self,
        pricing_date: Date,
        maturity_years: f64,
        schedule: &DividendSchedule,
        history: &RateCurveHistory,
    ) -> Option<f64> {
        if !maturity_years.is_finite() {
            return None;
        }
        let horizon_days = maturity_years * DAYS_PER_YEAR;
        let snapshot = history.as_of(pricing_date);

        let pv = schedule
            .events()
            .iter()
            .filter(|e| e.date > pricing_date)
            .filter_map(|e| {
                let days = (e.date - pricing_date) as f64;
                if days >= horizon_days {
                    return None;
                }
                let rate = self.interpolator.interpolate(snapshot?, days)?;
                Some(e.amount * (-rate * days / DAYS_PER_YEAR).exp())
            })
            .sum();
        Some(pv)
    }

    /// PV for every row of one underlying's series, in row order.
    ///
    /// Rows with a missing maturity get `None`.
    pub fn present_values(
        &self,
        rows: &[MarketObservation],
        schedule: &DividendSchedule,
        history: &RateCurveHistory,
    ) -> Vec<Option<f64>> {
        rows.iter()
            .map(|row| {
                row.maturity
                    .and_then(|t| self.present_value(row.date, t, schedule, history))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::RateSnapshot;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn flat_history(date: Date, country: Country, rate: f64) -> RateCurveHistory {
        let mut snap = RateSnapshot::new(date);
        for series in country.series() {
            snap.insert(*series, rate);
        }
        RateCurveHistory::from_snapshots([snap]).unwrap()
    }

    // ========================================
    // DividendSchedule
    // ========================================

    #[test]
    fn test_schedule_filters_and_sorts() {
        let schedule = DividendSchedule::new([
            DividendEvent::new(d(2024, 6, 1), 2.0),
            DividendEvent::new(d(2024, 2, 1), 0.0),
            DividendEvent::new(d(2024, 3, 1), 1.5),
            DividendEvent::new(d(2024, 4, 1), f64::NAN),
        ]);
        let dates: Vec<Date> = schedule.events().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![d(2024, 3, 1), d(2024, 6, 1)]);
    }

    #[test]
    fn test_schedule_from_observations() {
        let rows = vec![
            MarketObservation::new(d(2024, 1, 2), "X", "SWEDEN"),
            MarketObservation::new(d(2024, 1, 3), "X", "SWEDEN").with_dividend(3.0),
        ];
        let schedule = DividendSchedule::from_observations(&rows);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.events()[0].amount, 3.0);
    }

    // ========================================
    // Present value
    // ========================================

    #[test]
    fn test_single_dividend_flat_rate() {
        let pricing = d(2024, 1, 1);
        let history = flat_history(pricing, Country::Sweden, 0.05);
        let schedule = DividendSchedule::new([DividendEvent::new(pricing.add_days(100), 10.0)]);
        let engine = DividendPvEngine::new(Country::Sweden);
        let pv = engine
            .present_value(pricing, 200.0 / 365.0, &schedule, &history)
            .unwrap();
        assert_relative_eq!(pv, 10.0 * (-0.05_f64 * 100.0 / 365.0).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_dividend_on_pricing_date_excluded() {
        let pricing = d(2024, 1, 1);
        let history = flat_history(pricing, Country::Norway, 0.05);
        let schedule = DividendSchedule::new([DividendEvent::new(pricing, 10.0)]);
        let engine = DividendPvEngine::new(Country::Norway);
        assert_eq!(engine.present_value(pricing, 1.0, &schedule, &history), Some(0.0));
    }

    #[test]
    fn test_dividend_at_or_after_expiry_excluded() {
        let pricing = d(2024, 1, 1);
        let history = flat_history(pricing, Country::Norway, 0.05);
        let schedule = DividendSchedule::new([DividendEvent::new(pricing.add_days(100), 10.0)]);
        let engine = DividendPvEngine::new(Country::Norway);
        // Expiry exactly at day 100: strict inequality excludes it.
        assert_eq!(
            engine.present_value(pricing, 100.0 / 365.0, &schedule, &history),
            Some(0.0)
        );
        assert!(engine.present_value(pricing, 101.0 / 365.0, &schedule, &history).unwrap() > 0.0);
    }

    #[test]
    fn test_no_snapshot_skips_dividend() {
        let history = flat_history(d(2024, 6, 1), Country::Denmark, 0.03);
        let schedule = DividendSchedule::new([DividendEvent::new(d(2024, 3, 1), 5.0)]);
        let engine = DividendPvEngine::new(Country::Denmark);
        assert_eq!(engine.present_value(d(2024, 1, 1), 1.0, &schedule, &history), Some(0.0));
    }

    #[test]
    fn test_unresolvable_rate_skips_dividend() {
        // Snapshot holds Norwegian series only; Danish lookups are undefined.
        let pricing = d(2024, 1, 1);
        let history = flat_history(pricing, Country::Norway, 0.03);
        let schedule = DividendSchedule::new([DividendEvent::new(pricing.add_days(10), 5.0)]);
        let engine = DividendPvEngine::new(Country::Denmark);
        assert_eq!(engine.present_value(pricing, 1.0, &schedule, &history), Some(0.0));
    }

    #[test]
    fn test_uses_as_of_snapshot() {
        let early = RateSnapshot::new(d(2024, 1, 1)).with_rate("NOKONZ=R", 0.0);
        let late = RateSnapshot::new(d(2024, 2, 1)).with_rate("NOKONZ=R", 0.10);
        let history = RateCurveHistory::from_snapshots([early, late]).unwrap();
        let schedule = DividendSchedule::new([DividendEvent::new(d(2024, 3, 1), 1.0)]);
        let engine = DividendPvEngine::new(Country::Norway);

        // Priced in January: zero rate, no discount.
        let pv_jan = engine.present_value(d(2024, 1, 15), 1.0, &schedule, &history).unwrap();
        assert_relative_eq!(pv_jan, 1.0, epsilon = 1e-14);
        // Priced in February: 10% applies.
        let pv_feb = engine.present_value(d(2024, 2, 15), 1.0, &schedule, &history).unwrap();
        assert_relative_eq!(pv_feb, (-0.10_f64 * 15.0 / 365.0).exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_present_values_over_series() {
        let start = d(2024, 1, 1);
        let history = flat_history(start, Country::Sweden, 0.0);
        let rows = vec![
            MarketObservation::new(start, "X", "SWEDEN").with_maturity(1.0),
            MarketObservation::new(start.add_days(10), "X", "SWEDEN").with_dividend(2.0),
            MarketObservation::new(start.add_days(20), "X", "SWEDEN").with_maturity(1.0),
        ];
        let schedule = DividendSchedule::from_observations(&rows);
        let engine = DividendPvEngine::new(Country::Sweden);
        let pvs = engine.present_values(&rows, &schedule, &history);
        assert_eq!(pvs, vec![Some(2.0), None, Some(0.0)]);
    }

    #[test]
    fn test_non_finite_maturity_is_none() {
        let engine = DividendPvEngine::new(Country::Sweden);
        let pv = engine.present_value(
            d(2024, 1, 1),
            f64::NAN,
            &DividendSchedule::default(),
            &RateCurveHistory::new(),
        );
        assert!(pv.is_none());
    }
}
