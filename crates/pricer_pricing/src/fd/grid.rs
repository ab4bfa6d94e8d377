//! Spot-by-time value grid for one finite-difference pricing call.

use pricer_core::math::interpolation::lerp;

use super::error::FdError;

/// `(N+1) x (M+1)` option values on a uniform spot mesh over `[0, S_max]`.
///
/// Row `j` holds the values at time level `j·Δt`; row `N` is expiry and row
/// `0` is today. Storage is a single row-major buffer.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::fd::PricingGrid;
///
/// let grid = PricingGrid::new(200.0, 4, 2).unwrap();
/// assert_eq!(grid.spots(), &[0.0, 50.0, 100.0, 150.0, 200.0]);
/// assert_eq!(grid.time_steps(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct PricingGrid {
    spots: Vec<f64>,
    values: Vec<f64>,
    space_steps: usize,
    time_steps: usize,
    ds: f64,
}

impl PricingGrid {
    /// Allocates a zeroed grid with `space_steps` spot steps and
    /// `time_steps` time steps.
    ///
    /// # Errors
    ///
    /// - `FdError::InvalidGrid` if `space_steps < 2` or `time_steps == 0`
    /// - `FdError::InvalidSpotMax` if `s_max` is not finite and positive
    pub fn new(s_max: f64, space_steps: usize, time_steps: usize) -> Result<Self, FdError> {
        if space_steps < 2 || time_steps == 0 {
            return Err(FdError::InvalidGrid {
                space_steps,
                time_steps,
            });
        }
        if !(s_max.is_finite() && s_max > 0.0) {
            return Err(FdError::InvalidSpotMax { s_max });
        }

        let ds = s_max / space_steps as f64;
        let spots = (0..=space_steps).map(|i| i as f64 * ds).collect();
        Ok(Self {
            spots,
            values: vec![0.0; (time_steps + 1) * (space_steps + 1)],
            space_steps,
            time_steps,
            ds,
        })
    }

    /// Spot nodes `0, Δs, ..., S_max`.
    #[inline]
    pub fn spots(&self) -> &[f64] {
        &self.spots
    }

    /// Spot step `Δs`.
    #[inline]
    pub fn spot_step(&self) -> f64 {
        self.ds
    }

    /// Number of spot steps `M`.
    #[inline]
    pub fn space_steps(&self) -> usize {
        self.space_steps
    }

    /// Number of time steps `N`.
    #[inline]
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Upper spot boundary.
    #[inline]
    pub fn s_max(&self) -> f64 {
        self.spots[self.space_steps]
    }

    #[inline]
    fn width(&self) -> usize {
        self.space_steps + 1
    }

    /// Values at time level `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j > N`.
    #[inline]
    pub fn level(&self, j: usize) -> &[f64] {
        let w = self.width();
        &self.values[j * w..(j + 1) * w]
    }

    /// Mutable values at time level `j`.
    #[inline]
    pub fn level_mut(&mut self, j: usize) -> &mut [f64] {
        let w = self.width();
        &mut self.values[j * w..(j + 1) * w]
    }

    /// Level `j` (mutable) together with the later level `j + 1`.
    #[inline]
    pub(crate) fn step_pair(&mut self, j: usize) -> (&mut [f64], &[f64]) {
        let w = self.width();
        let (current, later) = self.values[j * w..(j + 2) * w].split_at_mut(w);
        (current, later)
    }

    /// Linear interpolation of today's row at `spot`.
    ///
    /// The segment index is `floor(spot / Δs)` clamped to `M - 1`, so spots
    /// beyond `S_max` extrapolate from the last segment.
    pub fn value_at(&self, spot: f64) -> f64 {
        let idx = ((spot / self.ds).floor() as usize).min(self.space_steps - 1);
        let today = self.level(0);
        lerp(
            self.spots[idx],
            today[idx],
            self.spots[idx + 1],
            today[idx + 1],
            spot,
        )
    }
}
