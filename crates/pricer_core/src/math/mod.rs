//! Numerical building blocks.
//!
//! - [`solvers`]: Newton-Raphson root finding with strict and bounded modes
//! - [`interpolation`]: piecewise-linear interpolation between two nodes

pub mod interpolation;
pub mod solvers;
