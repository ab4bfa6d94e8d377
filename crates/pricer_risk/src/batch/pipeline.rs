//! Batch pricing of observation rows.
//!
//! Stages:
//! 1. resolve every row's country and check row identities are unique;
//! 2. group rows into `(underlying, country)` series and discount each
//!    series' dividends;
//! 3. take the row rate, or interpolate it from the as-of rate snapshot at
//!    the option's maturity;
//! 4. invert call and put implied vols, estimate the EEP on their mean and
//!    fold it into the parity residual, one task per row on the pool.
//!
//! Results come back in input order and are indexed by [`RowKey`].

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use pricer_core::market_data::{Country, RateCurveHistory, RiskFreeRateInterpolator};
use pricer_core::types::{OptionSide, DAYS_PER_YEAR};
use pricer_models::{
    DividendPvEngine, DividendSchedule, ImpliedVolSolver, MarketObservation, PricingResult, RowKey,
};
use pricer_pricing::eep::{
    EarlyExercisePremiumEngine, EepInputs, ParityInputs, ParityResidual,
};
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, warn};

use super::config::{BatchConfig, SpotBasis};
use super::error::BatchError;
use super::report::BatchReport;
use crate::parallel::map_in_batches;

/// Priced rows of one batch.
#[derive(Clone, Debug)]
pub struct BatchOutput {
    results: Vec<PricingResult>,
    index: HashMap<RowKey, usize>,
    report: BatchReport,
}

impl BatchOutput {
    /// Results aligned with the input rows.
    pub fn results(&self) -> &[PricingResult] {
        &self.results
    }

    /// Result of the row with identity `key`.
    pub fn get(&self, key: &RowKey) -> Option<&PricingResult> {
        self.index.get(key).map(|&i| &self.results[i])
    }

    /// Position of `key` in the input.
    pub fn position(&self, key: &RowKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Run summary.
    pub fn report(&self) -> &BatchReport {
        &self.report
    }

    /// Number of priced rows.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Consumes the output, returning results in input order and the report.
    pub fn into_parts(self) -> (Vec<PricingResult>, BatchReport) {
        (self.results, self.report)
    }
}

/// Per-row market inputs after the series stage.
#[derive(Clone, Copy, Debug)]
struct RowMarket {
    rate: Option<f64>,
    pv_dividends: Option<f64>,
}

/// Prices observation rows on a dedicated worker pool.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::{Country, RateCurveHistory, RateSnapshot};
/// use pricer_core::types::Date;
/// use pricer_models::MarketObservation;
/// use pricer_pricing::EepConfig;
/// use pricer_risk::batch::{BatchConfig, BatchPricer};
///
/// let date = Date::from_ymd(2024, 3, 1).unwrap();
/// let mut snapshot = RateSnapshot::new(date);
/// for series in Country::Sweden.series() {
///     snapshot.insert(*series, 0.03);
/// }
/// let history = RateCurveHistory::from_snapshots([snapshot]).unwrap();
///
/// let rows = vec![MarketObservation::new(date, "VOLV-B", "SWEDEN")
///     .with_spot(250.0)
///     .with_strike(250.0)
///     .with_maturity(0.5)
///     .with_prices(18.0, 14.5)];
///
/// let pricer = BatchPricer::new(BatchConfig::default().with_eep(EepConfig::default().with_grid(50, 50))).unwrap();
/// let output = pricer.price(&rows, &history).unwrap();
/// let result = output.get(&rows[0].key()).unwrap();
/// assert_eq!(result.risk_free_rate, Some(0.03));
/// assert!(result.eep.unwrap() >= 0.0);
/// ```
pub struct BatchPricer {
    config: BatchConfig,
    implied_vol: ImpliedVolSolver,
    eep: EarlyExercisePremiumEngine,
    pool: ThreadPool,
}

impl BatchPricer {
    /// Validates the configuration and starts the worker pool.
    ///
    /// # Errors
    ///
    /// - `BatchError::ImpliedVol` / `BatchError::Engine` for invalid settings
    /// - `BatchError::ThreadPool` if the pool cannot be built
    pub fn new(config: BatchConfig) -> Result<Self, BatchError> {
        config.implied_vol.validate()?;
        let eep = EarlyExercisePremiumEngine::new(config.eep)?;
        let pool = config.parallel.build_pool()?;
        Ok(Self {
            implied_vol: ImpliedVolSolver::new(config.implied_vol),
            eep,
            pool,
            config,
        })
    }

    /// Batch configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Worker threads in the pool.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Prices every row.
    ///
    /// # Errors
    ///
    /// - `BatchError::UnknownCountry` if a row's country has no rate table
    /// - `BatchError::DuplicateRow` if two rows share a [`RowKey`]
    pub fn price(
        &self,
        rows: &[MarketObservation],
        history: &RateCurveHistory,
    ) -> Result<BatchOutput, BatchError> {
        let started = Instant::now();
        let (countries, index) = validate_rows(rows)?;
        let series = group_series(rows, &countries);
        info!(
            rows = rows.len(),
            series = series.len(),
            workers = self.workers(),
            snapshots = history.len(),
            "starting EEP batch"
        );

        let market = self.pool.install(|| resolve_market(rows, &series, history));
        let unresolved = market.iter().filter(|m| m.rate.is_none()).count();
        if unresolved > 0 {
            warn!(rows = unresolved, "rows without a resolvable risk-free rate");
        }

        let positions: Vec<usize> = (0..rows.len()).collect();
        let price_one = |&i: &usize| (i, self.price_row(&rows[i], market[i]));
        let priced = if self.config.parallel.should_parallelize(rows.len()) {
            self.pool.install(|| {
                map_in_batches(&positions, self.config.parallel.batch_size, price_one)
            })
        } else {
            positions.iter().map(price_one).collect()
        };

        let mut results = vec![PricingResult::default(); rows.len()];
        for (i, result) in priced {
            results[i] = result;
        }

        let report = BatchReport::from_results(&results, series.len(), self.workers(), started.elapsed());
        info!(
            rows = report.rows,
            missing_eep = report.missing_in("eep").unwrap_or(0),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "EEP batch finished"
        );

        Ok(BatchOutput {
            results,
            index,
            report,
        })
    }

    /// All outputs of one row given its resolved rate and dividend PV.
    fn price_row(&self, row: &MarketObservation, market: RowMarket) -> PricingResult {
        let RowMarket { rate, pv_dividends } = market;

        let iv_spot = match self.config.spot_basis {
            SpotBasis::Adjusted => row.spot.zip(pv_dividends).map(|(s, pv)| s - pv),
            SpotBasis::Raw => row.spot,
        };
        let invert = |price: Option<f64>, side: OptionSide| {
            self.implied_vol
                .solve(iv_spot?, row.strike?, rate?, row.maturity?, price?, side)
        };
        let implied_vol_call = invert(row.call_price, OptionSide::Call);
        let implied_vol_put = invert(row.put_price, OptionSide::Put);

        let breakdown = self.eep.estimate(&EepInputs {
            spot: row.spot,
            strike: row.strike,
            expiry: row.maturity,
            rate,
            volatility: EepInputs::average_vol(implied_vol_call, implied_vol_put),
            pv_dividends,
        });

        let parity = ParityResidual::compute(
            &ParityInputs {
                spot: row.spot,
                strike: row.strike,
                expiry: row.maturity,
                rate,
                pv_dividends,
                call_price: row.call_price,
                put_price: row.put_price,
            },
            breakdown.as_ref(),
        );

        PricingResult {
            risk_free_rate: rate,
            pv_dividends,
            implied_vol_call,
            implied_vol_put,
            american_call_price: breakdown.map(|b| b.american_call),
            american_put_price: breakdown.map(|b| b.american_put),
            eep: breakdown.map(|b| b.eep),
            eep_call: breakdown.and_then(|b| b.eep_call),
            eep_put: breakdown.and_then(|b| b.eep_put),
            parity_y: parity.y,
            parity_x: parity.x,
            parity_x_adjusted: parity.x_adjusted,
            parity_x_adjusted_sides: parity.x_adjusted_sides,
            call_moneyness: row.call_moneyness(),
            put_moneyness: row.put_moneyness(),
        }
    }
}

/// Resolves countries and builds the identity index.
fn validate_rows(
    rows: &[MarketObservation],
) -> Result<(Vec<Country>, HashMap<RowKey, usize>), BatchError> {
    let mut countries = Vec::with_capacity(rows.len());
    let mut index = HashMap::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let country = row
            .country
            .parse::<Country>()
            .map_err(|source| BatchError::UnknownCountry {
                row: row.key(),
                source,
            })?;
        countries.push(country);

        let key = row.key();
        if index.contains_key(&key) {
            return Err(BatchError::DuplicateRow(key));
        }
        index.insert(key, i);
    }

    Ok((countries, index))
}

/// Row positions of each `(underlying, country)` series.
fn group_series(
    rows: &[MarketObservation],
    countries: &[Country],
) -> BTreeMap<(String, Country), Vec<usize>> {
    let mut series: BTreeMap<(String, Country), Vec<usize>> = BTreeMap::new();
    for (i, (row, country)) in rows.iter().zip(countries).enumerate() {
        series
            .entry((row.underlying.clone(), *country))
            .or_default()
            .push(i);
    }
    series
}

/// Dividend PV and rate of every row, one series per task.
fn resolve_market(
    rows: &[MarketObservation],
    series: &BTreeMap<(String, Country), Vec<usize>>,
    history: &RateCurveHistory,
) -> Vec<RowMarket> {
    let per_series: Vec<Vec<(usize, RowMarket)>> = series
        .par_iter()
        .map(|((underlying, country), positions)| {
            let schedule = DividendSchedule::from_observations(positions.iter().map(|&i| &rows[i]));
            let dividends = DividendPvEngine::new(*country);
            let rates = RiskFreeRateInterpolator::new(*country);
            debug!(
                underlying = underlying.as_str(),
                country = %country,
                rows = positions.len(),
                dividends = schedule.len(),
                "pricing series"
            );

            positions
                .iter()
                .map(|&i| {
                    let row = &rows[i];
                    let maturity = row.maturity.filter(|t| t.is_finite());
                    let pv_dividends = maturity
                        .and_then(|t| dividends.present_value(row.date, t, &schedule, history));
                    let rate = row.rate.filter(|r| r.is_finite()).or_else(|| {
                        maturity.and_then(|t| rates.rate_as_of(history, row.date, t * DAYS_PER_YEAR))
                    });
                    (i, RowMarket { rate, pv_dividends })
                })
                .collect()
        })
        .collect();

    let mut market = vec![
        RowMarket {
            rate: None,
            pv_dividends: None,
        };
        rows.len()
    ];
    for (i, resolved) in per_series.into_iter().flatten() {
        market[i] = resolved;
    }
    market
}
