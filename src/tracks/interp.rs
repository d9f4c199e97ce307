//! Per-track resampling onto the target age axis.
//!
//! Each quantity is interpolated piecewise-linearly in log-age. Target ages
//! outside a track's observed range resolve to not-available; endpoint values
//! are never clamped outward.

use crate::domain::{EvolutionaryTrack, Quantity, ResampledTrack, check_strictly_increasing};
use crate::error::GridError;
use crate::math::linear_interp;

/// Piecewise-linear `log(t) -> value` interpolant for one track and quantity.
#[derive(Debug, Clone)]
pub struct TrackInterpolant {
    mass: f64,
    knots: Vec<(f64, f64)>,
}

impl TrackInterpolant {
    pub fn new(track: &EvolutionaryTrack, quantity: Quantity) -> Result<Self, GridError> {
        // Grouping already guarantees this; a failure here is an internal bug.
        check_strictly_increasing(track.mass(), track.samples())?;
        let knots = track
            .samples()
            .iter()
            .map(|s| (s.log_age, quantity.of(s)))
            .collect();
        Ok(Self {
            mass: track.mass(),
            knots,
        })
    }

    /// Value at `log_age`, or `None` outside the observed age range.
    pub fn eval(&self, log_age: f64) -> Option<f64> {
        let (first, last) = (self.knots.first()?, self.knots.last()?);
        if !(log_age >= first.0 && log_age <= last.0) {
            return None;
        }
        // Index of the first knot strictly above `log_age`.
        let hi = self.knots.partition_point(|k| k.0 <= log_age);
        if hi == 0 {
            return None;
        }
        if hi == self.knots.len() {
            // Exactly on the last knot.
            return Some(last.1);
        }
        Some(linear_interp(self.knots[hi - 1], self.knots[hi], log_age))
    }

    pub fn resample(&self, log_ages: &[f64]) -> ResampledTrack {
        ResampledTrack::from_options(self.mass, log_ages.iter().map(|x| self.eval(*x)))
    }
}

/// Resample one quantity of `track` at every point of `log_ages`.
pub fn resample_track(
    track: &EvolutionaryTrack,
    quantity: Quantity,
    log_ages: &[f64],
) -> Result<ResampledTrack, GridError> {
    let interp = TrackInterpolant::new(track, quantity)?;
    let resampled = interp.resample(log_ages);
    tracing::debug!(
        mass = track.mass(),
        quantity = quantity.label(),
        available = resampled.available(),
        "resampled track"
    );
    Ok(resampled)
}
