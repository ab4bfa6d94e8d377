//! Root-finding solvers.
//!
//! [`NewtonRaphsonSolver`] offers a clamped, best-effort `iterate_bounded`
//! used for volatility inversion.
//!
//! ## Configuration
//!
//! [`SolverConfig`] carries:
//! - `tolerance`: bound on the step between successive iterates
//! - `max_iterations`: iteration cap
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::{NewtonBounds, NewtonExit, NewtonRaphsonSolver, SolverConfig};
//!
//! let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-10, 50));
//! // Root at 3 lies outside [0, 1]; the iterate settles on the upper bound.
//! let outcome = solver.iterate_bounded(|x: f64| (x - 3.0, 1.0), 0.5, NewtonBounds::new(0.0, 1.0, 1e-12));
//! assert_eq!(outcome.x, 1.0);
//! assert_eq!(outcome.exit, NewtonExit::StepTolerance);
//! ```

mod config;
mod newton_raphson;

pub use config::SolverConfig;
pub use newton_raphson::{NewtonBounds, NewtonExit, NewtonOutcome, NewtonRaphsonSolver};
