//! Solver configuration types.

use num_traits::Float;

/// Iteration controls for [`NewtonRaphsonSolver`](super::NewtonRaphsonSolver).
///
/// `tolerance` bounds the step between successive iterates of
/// [`iterate_bounded`](super::NewtonRaphsonSolver::iterate_bounded).
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
///
/// let iv = SolverConfig::<f64>::implied_vol();
/// assert_eq!(iv.max_iterations, 100);
/// assert_eq!(iv.tolerance, 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance.
    pub tolerance: T,

    /// Maximum number of iterations.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Step tolerance 1e-6 and 100 iterations, the controls used when
    /// inverting option prices for volatility.
    pub fn implied_vol() -> Self {
        Self {
            tolerance: T::from(1e-6).unwrap(),
            max_iterations: 100,
        }
    }

    /// Returns a copy with a different tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns a copy with a different iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}
