//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use num_traits::Float;

/// Box constraint and flat-derivative floor for [`NewtonRaphsonSolver::iterate_bounded`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonBounds<T: Float> {
    /// Lower clamp applied after every update.
    pub lower: T,
    /// Upper clamp applied after every update.
    pub upper: T,
    /// Iteration stops when `f'(x)` falls below this value.
    pub min_derivative: T,
}

impl<T: Float> NewtonBounds<T> {
    /// Creates bounds `[lower, upper]` with the given derivative floor.
    pub fn new(lower: T, upper: T, min_derivative: T) -> Self {
        Self {
            lower,
            upper,
            min_derivative,
        }
    }

    #[inline]
    fn clamp(&self, x: T) -> T {
        x.max(self.lower).min(self.upper)
    }
}

/// Why a bounded Newton iteration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewtonExit {
    /// Successive iterates moved less than the step tolerance.
    StepTolerance,
    /// Derivative fell below the floor; the current iterate is returned.
    FlatDerivative,
    /// Iteration cap reached; the last iterate is returned.
    MaxIterations,
    /// Function or derivative was not finite at the current iterate.
    NonFinite,
}

/// Best-effort result of [`NewtonRaphsonSolver::iterate_bounded`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonOutcome<T: Float> {
    /// Final iterate.
    pub x: T,
    /// Number of updates applied.
    pub iterations: usize,
    /// Stop reason.
    pub exit: NewtonExit,
}

impl<T: Float> NewtonOutcome<T> {
    /// True when the step tolerance was met.
    pub fn converged(&self) -> bool {
        self.exit == NewtonExit::StepTolerance
    }
}

/// Newton-Raphson root finder.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)` for fast
/// quadratic convergence on smooth functions.
///
/// [`iterate_bounded`](Self::iterate_bounded) clamps every iterate to a box
/// and reports the last iterate together with the stop reason instead of
/// failing.
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Clamped Newton iteration that always returns an iterate.
    ///
    /// `f_and_df` evaluates the residual and its derivative together. Each
    /// step:
    ///
    /// 1. stops with [`NewtonExit::FlatDerivative`] if `f'(x) < min_derivative`
    /// 2. updates `x ← clamp(x − f(x)/f'(x), lower, upper)`
    /// 3. stops with [`NewtonExit::StepTolerance`] once `|x − x_prev| < tolerance`
    ///
    /// `x_prev` starts at zero, so the first update is never accepted as
    /// converged unless it lands within `tolerance` of zero.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonBounds, NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 100));
    /// let bounds = NewtonBounds::new(0.0, 10.0, 1e-12);
    ///
    /// let outcome = solver.iterate_bounded(|x: f64| (x * x - 2.0, 2.0 * x), 1.0, bounds);
    /// assert!(outcome.converged());
    /// assert!((outcome.x - std::f64::consts::SQRT_2).abs() < 1e-10);
    /// ```
    pub fn iterate_bounded<F>(&self, mut f_and_df: F, x0: T, bounds: NewtonBounds<T>) -> NewtonOutcome<T>
    where
        F: FnMut(T) -> (T, T),
    {
        let mut x = x0;
        let mut previous = T::zero();

        for iteration in 0..self.config.max_iterations {
            let (f_val, df_val) = f_and_df(x);

            if !f_val.is_finite() || !df_val.is_finite() {
                return NewtonOutcome {
                    x,
                    iterations: iteration,
                    exit: NewtonExit::NonFinite,
                };
            }

            if df_val < bounds.min_derivative {
                return NewtonOutcome {
                    x,
                    iterations: iteration,
                    exit: NewtonExit::FlatDerivative,
                };
            }

            x = bounds.clamp(x - f_val / df_val);

            if (x - previous).abs() < self.config.tolerance {
                return NewtonOutcome {
                    x,
                    iterations: iteration + 1,
                    exit: NewtonExit::StepTolerance,
                };
            }
            previous = x;
        }

        NewtonOutcome {
            x,
            iterations: self.config.max_iterations,
            exit: NewtonExit::MaxIterations,
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
