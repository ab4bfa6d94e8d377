//! Risk-free rate snapshots, their as-of history, and bucket interpolation.
//!
//! A [`RateSnapshot`] holds one date's quotes keyed by series name. The
//! [`RateCurveHistory`] is an append-only, date-ordered log of snapshots
//! looked up by as-of date. [`RiskFreeRateInterpolator`] maps a target
//! maturity in days onto a country's bucket table.
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{Country, RateCurveHistory, RateSnapshot, RiskFreeRateInterpolator};
//! use pricer_core::types::Date;
//!
//! let snapshot = RateSnapshot::new(Date::from_ymd(2024, 1, 2).unwrap())
//!     .with_rate("NOKONZ=R", 0.045)
//!     .with_rate("OINOK1MD=", 0.047);
//!
//! let mut history = RateCurveHistory::new();
//! history.push(snapshot).unwrap();
//!
//! let interp = RiskFreeRateInterpolator::new(Country::Norway);
//! let asof = history.as_of(Date::from_ymd(2024, 1, 5).unwrap()).unwrap();
//! let r = interp.interpolate(asof, 30.0).unwrap();
//! assert!((r - 0.047).abs() < 1e-12);
//! ```

use std::collections::BTreeMap;

use super::country::{Country, MATURITY_BUCKET_DAYS};
use super::error::MarketDataError;
use crate::math::interpolation::lerp;
use crate::types::Date;

/// One date's rate quotes, keyed by series name, stored as decimals.
///
/// A series that is absent is a missing quote. Non-finite values are
/// never stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateSnapshot {
    date: Date,
    rates: BTreeMap<String, f64>,
}

impl RateSnapshot {
    /// Creates an empty snapshot for `date`.
    pub fn new(date: Date) -> Self {
        Self {
            date,
            rates: BTreeMap::new(),
        }
    }

    /// Builder-style insert; see [`insert`](Self::insert).
    pub fn with_rate(mut self, series: impl Into<String>, rate: f64) -> Self {
        self.insert(series, rate);
        self
    }

    /// Records a quote. Non-finite values are treated as missing and dropped.
    pub fn insert(&mut self, series: impl Into<String>, rate: f64) {
        if rate.is_finite() {
            self.rates.insert(series.into(), rate);
        }
    }

    /// Snapshot date.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Quote for a series, `None` if missing.
    pub fn get(&self, series: &str) -> Option<f64> {
        self.rates.get(series).copied()
    }

    /// Number of populated series.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when no series is populated.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Append-only, date-ordered log of [`RateSnapshot`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateCurveHistory {
    snapshots: BTreeMap<Date, RateSnapshot>,
}

impl RateCurveHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from snapshots in any order.
    ///
    /// # Errors
    ///
    /// Returns [`MarketDataError::NonChronologicalSnapshot`] if two snapshots
    /// share a date.
    pub fn from_snapshots<I>(snapshots: I) -> Result<Self, MarketDataError>
    where
        I: IntoIterator<Item = RateSnapshot>,
    {
        let mut sorted: Vec<RateSnapshot> = snapshots.into_iter().collect();
        sorted.sort_by_key(|s| s.date());
        let mut history = Self::new();
        for snapshot in sorted {
            history.push(snapshot)?;
        }
        Ok(history)
    }

    /// Appends a snapshot strictly after the latest one.
    ///
    /// # Errors
    ///
    /// Returns [`MarketDataError::NonChronologicalSnapshot`] if the snapshot
    /// date is not after the latest date already held.
    pub fn push(&mut self, snapshot: RateSnapshot) -> Result<(), MarketDataError> {
        if let Some(latest) = self.latest_date() {
            if snapshot.date() <= latest {
                return Err(MarketDataError::NonChronologicalSnapshot {
                    latest,
                    got: snapshot.date(),
                });
            }
        }
        self.snapshots.insert(snapshot.date(), snapshot);
        Ok(())
    }

    /// Latest snapshot dated at or before `date`.
    pub fn as_of(&self, date: Date) -> Option<&RateSnapshot> {
        self.snapshots.range(..=date).next_back().map(|(_, s)| s)
    }

    /// Date of the most recent snapshot.
    pub fn latest_date(&self) -> Option<Date> {
        self.snapshots.keys().next_back().copied()
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True when the history holds no snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots in date order.
    pub fn iter(&self) -> impl Iterator<Item = &RateSnapshot> {
        self.snapshots.values()
    }
}

/// Piecewise-linear term structure over a country's nine maturity buckets.
///
/// - [`bucket_rate`](Self::bucket_rate) reads one bucket, filling a gap with
///   the nearest populated larger bucket, else the nearest smaller one.
/// - [`interpolate`](Self::interpolate) clamps outside `[1, 455]` days to
///   the boundary bucket and interpolates linearly between the populated
///   buckets that bracket the target inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskFreeRateInterpolator {
    country: Country,
}

impl RiskFreeRateInterpolator {
    /// Creates an interpolator over `country`'s bucket table.
    pub fn new(country: Country) -> Self {
        Self { country }
    }

    /// Country whose table is used.
    pub fn country(&self) -> Country {
        self.country
    }

    #[inline]
    fn raw(&self, snapshot: &RateSnapshot, index: usize) -> Option<f64> {
        snapshot.get(self.country.series()[index])
    }

    /// Gap-filled rate for the bucket at `index` into [`MATURITY_BUCKET_DAYS`].
    ///
    /// Returns `None` for an out-of-range index or an empty table.
    pub fn bucket_rate(&self, snapshot: &RateSnapshot, index: usize) -> Option<f64> {
        if index >= MATURITY_BUCKET_DAYS.len() {
            return None;
        }
        self.raw(snapshot, index)
            .or_else(|| (index + 1..MATURITY_BUCKET_DAYS.len()).find_map(|j| self.raw(snapshot, j)))
            .or_else(|| (0..index).rev().find_map(|j| self.raw(snapshot, j)))
    }

    /// Gap-filled rate for the bucket of exactly `days`, `None` if `days`
    /// is not a bucket.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::market_data::{Country, RateSnapshot, RiskFreeRateInterpolator};
    /// use pricer_core::types::Date;
    ///
    /// let snap = RateSnapshot::new(Date::from_ymd(2024, 1, 2).unwrap())
    ///     .with_rate("NOKONZ=R", 0.01)
    ///     .with_rate("OINOK1MD=", 0.02);
    /// let interp = RiskFreeRateInterpolator::new(Country::Norway);
    ///
    /// // 7-day bucket is missing: the search walks forward to 30 days.
    /// assert_eq!(interp.rate_for_bucket_days(&snap, 7), Some(0.02));
    /// ```
    pub fn rate_for_bucket_days(&self, snapshot: &RateSnapshot, days: u32) -> Option<f64> {
        MATURITY_BUCKET_DAYS
            .iter()
            .position(|&d| d == days)
            .and_then(|i| self.bucket_rate(snapshot, i))
    }

    /// Rate at `t_days` calendar days.
    ///
    /// Returns `None` when the snapshot holds no series of this country's
    /// table or when `t_days` is not finite.
    pub fn interpolate(&self, snapshot: &RateSnapshot, t_days: f64) -> Option<f64> {
        if !t_days.is_finite() {
            return None;
        }
        let last = MATURITY_BUCKET_DAYS.len() - 1;
        if t_days <= f64::from(MATURITY_BUCKET_DAYS[0]) {
            return self.bucket_rate(snapshot, 0);
        }
        if t_days >= f64::from(MATURITY_BUCKET_DAYS[last]) {
            return self.bucket_rate(snapshot, last);
        }
        // A bucket hit reads the gap-filled bucket, not its neighbours.
        if let Some(i) = MATURITY_BUCKET_DAYS.iter().position(|&d| f64::from(d) == t_days) {
            return self.bucket_rate(snapshot, i);
        }

        let populated = |i: &usize| self.raw(snapshot, *i).map(|r| (f64::from(MATURITY_BUCKET_DAYS[*i]), r));
        let lower = (0..=last)
            .rev()
            .filter(|&i| f64::from(MATURITY_BUCKET_DAYS[i]) <= t_days)
            .find_map(|i| populated(&i));
        let upper = (0..=last)
            .filter(|&i| f64::from(MATURITY_BUCKET_DAYS[i]) >= t_days)
            .find_map(|i| populated(&i));

        match (lower, upper) {
            (Some((m_lo, r_lo)), Some((m_hi, r_hi))) => Some(lerp(m_lo, r_lo, m_hi, r_hi, t_days)),
            (Some((_, r)), None) | (None, Some((_, r))) => Some(r),
            (None, None) => None,
        }
    }

    /// Interpolated rate from the snapshot in force on `date`.
    pub fn rate_as_of(&self, history: &RateCurveHistory, date: Date, t_days: f64) -> Option<f64> {
        history.as_of(date).and_then(|s| self.interpolate(s, t_days))
    }
}
