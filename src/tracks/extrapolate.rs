//! Synthetic boundary tracks by linear extrapolation in mass.
//!
//! For each age index, with the two anchor masses `m1 < m2` and their values
//! `v1`, `v2`, the boundary value at `m0` is
//!
//! ```text
//! v0 = v2 + (v2 - v1) / (m2 - m1) * (m0 - m2)
//! ```
//!
//! A missing anchor value makes the boundary value missing too.

use crate::domain::ResampledTrack;
use crate::error::GridError;
use crate::grid::target::TargetGrid;

/// Extrapolate a track at `target_mass` from two resampled anchor tracks.
///
/// The anchors may be given in either order.
pub fn extrapolate_track(target_mass: f64, a: &ResampledTrack, b: &ResampledTrack) -> ResampledTrack {
    let (lo, hi) = if a.mass <= b.mass { (a, b) } else { (b, a) };
    let (m1, m2) = (lo.mass, hi.mass);

    // NaN (not-available) in either anchor propagates through the arithmetic.
    let slope = (&hi.values - &lo.values) / (m2 - m1);
    let values = &hi.values + slope * (target_mass - m2);

    ResampledTrack {
        mass: target_mass,
        values,
    }
}

/// Low and high synthetic boundary tracks for one quantity.
#[derive(Debug, Clone)]
pub struct BoundaryTracks {
    pub low: ResampledTrack,
    pub high: ResampledTrack,
}

/// Build both boundary tracks from the real tracks (ascending mass order).
///
/// The low boundary uses the two lowest real masses, the high boundary the two
/// highest.
pub fn extrapolate_boundaries(target: &TargetGrid, real: &[ResampledTrack]) -> Result<BoundaryTracks, GridError> {
    let n = real.len();
    if n < 2 || n != target.real_masses().len() {
        return Err(GridError::ShapeMismatch {
            expected: target.shape(),
            found: (n + 2, real.first().map_or(0, ResampledTrack::len)),
        });
    }

    let low = extrapolate_track(target.low_boundary(), &real[0], &real[1]);
    let high = extrapolate_track(target.high_boundary(), &real[n - 2], &real[n - 1]);

    Ok(BoundaryTracks { low, high })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn high_boundary_scenario() {
        let v1 = ResampledTrack::from_options(1.00, [Some(-2.0)]);
        let v2 = ResampledTrack::from_options(1.10, [Some(-1.8)]);
        let out = extrapolate_track(1.11, &v1, &v2);
        assert_eq!(out.mass, 1.11);
        assert_relative_eq!(out.get(0).unwrap(), -1.78, epsilon = 1e-12);
    }

    #[test]
    fn low_boundary_extends_below() {
        let v1 = ResampledTrack::from_options(0.77, [Some(-3.0)]);
        let v2 = ResampledTrack::from_options(0.87, [Some(-2.0)]);
        let out = extrapolate_track(0.76, &v2, &v1);
        assert_relative_eq!(out.get(0).unwrap(), -3.1, epsilon = 1e-12);
    }

    #[test]
    fn missing_anchor_gives_missing_boundary() {
        let v1 = ResampledTrack::from_options(1.00, [None, Some(-2.0), Some(-2.0)]);
        let v2 = ResampledTrack::from_options(1.10, [Some(-1.8), None, Some(-1.8)]);
        let out = extrapolate_track(1.11, &v1, &v2);
        assert_eq!(out.get(0), None);
        assert_eq!(out.get(1), None);
        assert!(out.get(2).is_some());
    }

    #[test]
    fn anchors_are_reproduced() {
        let v1 = ResampledTrack::from_options(0.54, [Some(-1.234), Some(4.1)]);
        let v2 = ResampledTrack::from_options(0.61, [Some(-1.5), Some(4.0)]);
        let at_m2 = extrapolate_track(0.61, &v1, &v2);
        let at_m1 = extrapolate_track(0.54, &v1, &v2);
        for i in 0..2 {
            assert_eq!(at_m2.get(i), v2.get(i));
            assert_relative_eq!(at_m1.get(i).unwrap(), v1.get(i).unwrap(), epsilon = 1e-12);
        }
    }

    #[test]
    fn boundaries_use_nearest_real_masses() {
        let target = TargetGrid::for_mass_count(3).unwrap();
        let real = vec![
            ResampledTrack::from_options(0.87, [Some(-3.0)]),
            ResampledTrack::from_options(1.00, [Some(-2.0)]),
            ResampledTrack::from_options(1.10, [Some(-1.8)]),
        ];
        let b = extrapolate_boundaries(&target, &real).unwrap();
        assert_eq!(b.low.mass, 0.86);
        assert_eq!(b.high.mass, 1.11);
        let expected_low = -2.0 + (-2.0 - -3.0) / (1.00 - 0.87) * (0.86 - 1.00);
        assert_relative_eq!(b.low.get(0).unwrap(), expected_low, epsilon = 1e-12);
        assert_relative_eq!(b.high.get(0).unwrap(), -1.78, epsilon = 1e-12);
    }

    #[test]
    fn wrong_real_count_is_rejected() {
        let target = TargetGrid::for_mass_count(4).unwrap();
        let real = vec![
            ResampledTrack::from_options(1.00, [Some(-2.0)]),
            ResampledTrack::from_options(1.10, [Some(-1.8)]),
        ];
        assert!(extrapolate_boundaries(&target, &real).is_err());
    }
}
