//! Piecewise-linear interpolation helpers.
//!
//! Shared by the rate-bucket interpolator and the finite-difference price
//! extraction.

use num_traits::Float;

/// Linear interpolation between `(x0, y0)` and `(x1, y1)` evaluated at `x`.
///
/// Returns `y0` when the two nodes coincide.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolation::lerp;
///
/// assert_eq!(lerp(0.0, 1.0, 2.0, 3.0, 1.0), 2.0);
/// assert_eq!(lerp(1.0, 5.0, 1.0, 7.0, 1.0), 5.0);
/// ```
#[inline]
pub fn lerp<T: Float>(x0: T, y0: T, x1: T, y1: T, x: T) -> T {
    let span = x1 - x0;
    if span == T::zero() {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / span
}
