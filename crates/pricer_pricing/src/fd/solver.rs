//! Crank-Nicolson stepping with projected SOR for American exercise.
//!
//! The Black-Scholes PDE is discretised on a uniform spot mesh with node
//! index `i` (so `S_i = i·Δs`). For each interior node the Crank-Nicolson
//! weights are
//!
//! ```text
//! α_i = ¼Δt(σ²i² − r·i)
//! β_i = −½Δt(σ²i² + r)
//! γ_i = ¼Δt(σ²i² + r·i)
//! ```
//!
//! and the implicit half `−α_i V[i−1] + (1 − β_i) V[i] − γ_i V[i+1] = d_i`
//! is solved by over-relaxed Gauss-Seidel in ascending node order, each
//! update projected onto the exercise value.

use pricer_core::types::OptionSide;

use super::config::FdConfig;
use super::error::FdError;
use super::grid::PricingGrid;

/// Contract and market inputs of one finite-difference price.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmericanOption {
    /// Spot at which today's value is read off the grid.
    pub spot: f64,
    /// Strike.
    pub strike: f64,
    /// Time to expiry in years.
    pub expiry: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Volatility.
    pub volatility: f64,
    /// Call or put.
    pub side: OptionSide,
}

impl AmericanOption {
    /// Creates an option description.
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
        side: OptionSide,
    ) -> Self {
        Self {
            spot,
            strike,
            expiry,
            rate,
            volatility,
            side,
        }
    }

    /// Same contract on the other side.
    pub fn with_side(mut self, side: OptionSide) -> Self {
        self.side = side;
        self
    }

    fn validate(&self) -> Result<(), FdError> {
        let inputs = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("expiry", self.expiry),
            ("rate", self.rate),
            ("volatility", self.volatility),
        ];
        for (name, value) in inputs {
            if !value.is_finite() {
                return Err(FdError::NonFiniteInput { name, value });
            }
        }
        Ok(())
    }

    /// Fixed values at `S = 0` and `S = S_max`.
    fn boundaries(&self, s_max: f64) -> (f64, f64) {
        match self.side {
            OptionSide::Put => (self.strike, 0.0),
            OptionSide::Call => (0.0, s_max - self.strike),
        }
    }
}

/// Mesh extent and resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    /// Upper spot boundary.
    pub s_max: f64,
    /// Spot steps `M`.
    pub space_steps: usize,
    /// Time steps `N`.
    pub time_steps: usize,
}

impl GridSpec {
    /// Creates a grid specification.
    pub fn new(s_max: f64, space_steps: usize, time_steps: usize) -> Self {
        Self {
            s_max,
            space_steps,
            time_steps,
        }
    }
}

/// PSOR effort over one backward induction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Sweeps summed over all time steps.
    pub total_sweeps: usize,
    /// Time steps that hit the sweep cap before meeting the tolerance.
    pub unconverged_steps: usize,
}

/// Price plus solver effort.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FdSolution {
    /// Today's value at the contract spot, floored at intrinsic.
    pub price: f64,
    /// PSOR effort.
    pub stats: SweepStats,
}

/// American option pricer on a Crank-Nicolson / PSOR grid.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionSide;
/// use pricer_pricing::fd::{AmericanFdSolver, AmericanOption, GridSpec};
///
/// let solver = AmericanFdSolver::with_defaults();
/// let put = AmericanOption::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionSide::Put);
/// let price = solver.price(&put, GridSpec::new(200.0, 100, 100)).unwrap();
/// assert!(price > 5.0 && price < 7.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AmericanFdSolver {
    config: FdConfig,
}

impl AmericanFdSolver {
    /// Creates a solver.
    ///
    /// # Errors
    ///
    /// Returns `FdError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: FdConfig) -> Result<Self, FdError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Wraps a configuration the caller has already validated.
    pub(crate) fn from_validated(config: FdConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "unvalidated FdConfig: {:?}", config);
        Self { config }
    }

    /// Solver with ω = 1.2, tolerance 1e-2 and 10 000 sweeps per step.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Solver configuration.
    #[inline]
    pub fn config(&self) -> &FdConfig {
        &self.config
    }

    /// Today's American value at `option.spot`.
    ///
    /// # Errors
    ///
    /// Returns `FdError` for a degenerate grid or non-finite inputs.
    pub fn price(&self, option: &AmericanOption, spec: GridSpec) -> Result<f64, FdError> {
        self.solve(option, spec).map(|solution| solution.price)
    }

    /// Like [`price`](Self::price) but also reports the PSOR effort.
    pub fn solve(&self, option: &AmericanOption, spec: GridSpec) -> Result<FdSolution, FdError> {
        option.validate()?;
        let mut grid = PricingGrid::new(spec.s_max, spec.space_steps, spec.time_steps)?;
        let stats = self.roll_back(option, &mut grid);

        let floor = option.side.intrinsic(option.spot, option.strike);
        let price = grid.value_at(option.spot).max(floor);
        Ok(FdSolution { price, stats })
    }

    /// Fills `grid` from expiry back to today.
    ///
    /// Level `N` receives the payoff and both boundary columns; each earlier
    /// level starts from the level after it and is then relaxed until the
    /// largest node change is below the tolerance or the sweep cap is used.
    pub fn roll_back(&self, option: &AmericanOption, grid: &mut PricingGrid) -> SweepStats {
        let m = grid.space_steps();
        let n = grid.time_steps();
        let dt = option.expiry / n as f64;
        let (lower, upper) = option.boundaries(grid.s_max());

        let exercise: Vec<f64> = grid
            .spots()
            .iter()
            .map(|&s| option.side.exercise_value(s, option.strike))
            .collect();

        let terminal = grid.level_mut(n);
        for (v, e) in terminal.iter_mut().zip(&exercise) {
            *v = e.max(0.0);
        }
        terminal[0] = lower;
        terminal[m] = upper;

        let coefficients = Coefficients::new(m, dt, option.rate, option.volatility);
        let omega = self.config.omega;
        let mut rhs = vec![0.0; m + 1];
        let mut stats = SweepStats::default();

        for j in (0..n).rev() {
            let (current, later) = grid.step_pair(j);
            current.copy_from_slice(later);

            for i in 1..m {
                rhs[i] = coefficients.alpha[i] * later[i - 1]
                    + (1.0 + coefficients.beta[i]) * later[i]
                    + coefficients.gamma[i] * later[i + 1];
            }

            let mut change = f64::INFINITY;
            let mut sweeps = 0;
            while change > self.config.tolerance && sweeps < self.config.max_sweeps {
                change = 0.0;
                for i in 1..m {
                    let old = current[i];
                    let gauss_seidel = (rhs[i]
                        + coefficients.alpha[i] * current[i - 1]
                        + coefficients.gamma[i] * current[i + 1])
                        / coefficients.diagonal[i];
                    let relaxed = (1.0 - omega) * old + omega * gauss_seidel;
                    let projected = relaxed.max(exercise[i]);
                    change = change.max((projected - old).abs());
                    current[i] = projected;
                }
                sweeps += 1;
            }

            stats.total_sweeps += sweeps;
            if change > self.config.tolerance {
                stats.unconverged_steps += 1;
            }
        }

        stats
    }
}

/// Per-node Crank-Nicolson weights.
struct Coefficients {
    alpha: Vec<f64>,
    beta: Vec<f64>,
    gamma: Vec<f64>,
    /// `1 − β_i`
    diagonal: Vec<f64>,
}

impl Coefficients {
    fn new(m: usize, dt: f64, rate: f64, volatility: f64) -> Self {
        let var = volatility * volatility;
        let mut alpha = vec![0.0; m + 1];
        let mut beta = vec![0.0; m + 1];
        let mut gamma = vec![0.0; m + 1];
        let mut diagonal = vec![1.0; m + 1];

        for i in 1..m {
            let fi = i as f64;
            let diffusion = var * fi * fi;
            alpha[i] = 0.25 * dt * (diffusion - rate * fi);
            beta[i] = -0.5 * dt * (diffusion + rate);
            gamma[i] = 0.25 * dt * (diffusion + rate * fi);
            diagonal[i] = 1.0 - beta[i];
        }

        Self {
            alpha,
            beta,
            gamma,
            diagonal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::BlackScholes;
    use proptest::prelude::*;

    fn tight() -> AmericanFdSolver {
        AmericanFdSolver::new(FdConfig::default().with_tolerance(1e-6)).unwrap()
    }

    fn european(option: &AmericanOption) -> f64 {
        BlackScholes::floored(option.spot, option.rate, option.volatility)
            .price(option.strike, option.expiry, option.side)
            .unwrap()
    }

    // ========================================
    // Setup validation
    // ========================================

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(AmericanFdSolver::new(FdConfig::default().with_omega(2.5)).is_err());
    }

    #[test]
    fn test_degenerate_grid_is_error() {
        let solver = AmericanFdSolver::with_defaults();
        let put = AmericanOption::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionSide::Put);
        assert!(matches!(
            solver.price(&put, GridSpec::new(200.0, 1, 100)),
            Err(FdError::InvalidGrid { .. })
        ));
        assert!(matches!(
            solver.price(&put, GridSpec::new(-1.0, 100, 100)),
            Err(FdError::InvalidSpotMax { .. })
        ));
    }

    #[test]
    fn test_non_finite_input_is_error() {
        let solver = AmericanFdSolver::with_defaults();
        let put = AmericanOption::new(100.0, 100.0, 1.0, f64::NAN, 0.2, OptionSide::Put);
        assert!(matches!(
            solver.price(&put, GridSpec::new(200.0, 50, 50)),
            Err(FdError::NonFiniteInput { name: "rate", .. })
        ));
    }

    // ========================================
    // Grid contents
    // ========================================

    #[test]
    fn test_terminal_row_and_boundaries() {
        let solver = AmericanFdSolver::with_defaults();
        let call = AmericanOption::new(100.0, 100.0, 0.5, 0.03, 0.25, OptionSide::Call);
        let mut grid = PricingGrid::new(200.0, 4, 3).unwrap();
        solver.roll_back(&call, &mut grid);

        assert_eq!(grid.level(3), &[0.0, 0.0, 0.0, 50.0, 100.0]);
        for j in 0..=3 {
            assert_eq!(grid.level(j)[0], 0.0);
            assert_eq!(grid.level(j)[4], 100.0);
        }
    }

    #[test]
    fn test_every_level_dominates_exercise_value() {
        let solver = tight();
        let put = AmericanOption::new(100.0, 100.0, 1.0, 0.08, 0.3, OptionSide::Put);
        let mut grid = PricingGrid::new(200.0, 80, 60).unwrap();
        solver.roll_back(&put, &mut grid);

        for j in 0..=60 {
            for (v, s) in grid.level(j).iter().zip(grid.spots()) {
                assert!(*v >= 100.0 - s - 1e-12);
            }
        }
    }

    #[test]
    fn test_deep_itm_put_is_exercised() {
        let solver = tight();
        let put = AmericanOption::new(40.0, 100.0, 1.0, 0.1, 0.2, OptionSide::Put);
        let price = solver.price(&put, GridSpec::new(200.0, 100, 100)).unwrap();
        assert_relative_eq!(price, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_expiry_is_intrinsic() {
        let solver = AmericanFdSolver::with_defaults();
        let call = AmericanOption::new(120.0, 100.0, 0.0, 0.05, 0.2, OptionSide::Call);
        let price = solver.price(&call, GridSpec::new(240.0, 60, 10)).unwrap();
        assert_relative_eq!(price, 20.0, epsilon = 1e-12);
    }

    // ========================================
    // Accuracy
    // ========================================

    #[test]
    fn test_atm_zero_rate_matches_black_scholes() {
        let solver = tight();
        for side in [OptionSide::Call, OptionSide::Put] {
            let option = AmericanOption::new(100.0, 100.0, 1.0, 0.0, 0.2, side);
            let price = solver.price(&option, GridSpec::new(200.0, 100, 100)).unwrap();
            let bs = european(&option);
            assert_relative_eq!(price, bs, max_relative = 0.01);
        }
    }

    #[test]
    fn test_american_put_above_european() {
        let solver = tight();
        let put = AmericanOption::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionSide::Put);
        let american = solver.price(&put, GridSpec::new(200.0, 100, 100)).unwrap();
        let european = european(&put);
        // Reference American value is about 6.09 vs 5.57 European.
        assert!(american > european + 0.3, "{} vs {}", american, european);
        assert!(american < 6.3);
    }

    #[test]
    fn test_stats_report_effort() {
        let solver = AmericanFdSolver::new(FdConfig::default().with_max_sweeps(1)).unwrap();
        let put = AmericanOption::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionSide::Put);
        let solution = solver.solve(&put, GridSpec::new(200.0, 50, 20)).unwrap();
        assert_eq!(solution.stats.total_sweeps, 20);
        assert!(solution.price > 0.0);

        let solution = tight().solve(&put, GridSpec::new(200.0, 50, 20)).unwrap();
        assert!(solution.stats.total_sweeps >= 20);
        assert_eq!(solution.stats.unconverged_steps, 0);
    }

    proptest! {
        #[test]
        fn prop_price_at_least_intrinsic(
            spot in 50.0_f64..150.0,
            strike in 60.0_f64..140.0,
            rate in 0.0_f64..0.1,
            vol in 0.05_f64..0.8,
            is_call in any::<bool>(),
        ) {
            let side = if is_call { OptionSide::Call } else { OptionSide::Put };
            let option = AmericanOption::new(spot, strike, 0.5, rate, vol, side);
            let s_max = (2.0 * spot).max(2.0 * strike);
            let price = AmericanFdSolver::with_defaults()
                .price(&option, GridSpec::new(s_max, 40, 40))
                .unwrap();
            prop_assert!(price >= side.intrinsic(spot, strike));
            prop_assert!(price.is_finite());
        }
    }
}
