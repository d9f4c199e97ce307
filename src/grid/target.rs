//! Target grid definition.
//!
//! Every written grid shares one fixed age axis, and every grid with the same
//! number of real masses shares one fixed mass axis. The real-mass count alone
//! identifies which published sub-catalog a grid belongs to:
//!
//! | real masses | axis (synthetic boundaries in brackets)              |
//! |-------------|------------------------------------------------------|
//! | 7           | [0.53] 0.54 0.61 0.68 0.77 0.87 1.00 1.10 [1.11]     |
//! | 4           | [0.76] 0.77 0.87 1.00 1.10 [1.11]                    |
//! | 3           | [0.86] 0.87 1.00 1.10 [1.11]                         |
//! | 2           | [0.99] 1.00 1.10 [1.11]                              |

use crate::error::GridError;
use crate::math::lin_space;

/// Number of target ages per track.
pub const AGE_AXIS_LEN: usize = 500;
/// log10(age / yr) of the first target age.
pub const LOG_AGE_MIN: f64 = 6.1;
/// log10(age / yr) of the last target age.
pub const LOG_AGE_MAX: f64 = 9.8;

/// Observed masses must equal the published values to this tolerance.
const MASS_MATCH_TOL: f64 = 1e-6;

const AXIS_7: [f64; 9] = [0.53, 0.54, 0.61, 0.68, 0.77, 0.87, 1.00, 1.10, 1.11];
const AXIS_4: [f64; 6] = [0.76, 0.77, 0.87, 1.00, 1.10, 1.11];
const AXIS_3: [f64; 5] = [0.86, 0.87, 1.00, 1.10, 1.11];
const AXIS_2: [f64; 4] = [0.99, 1.00, 1.10, 1.11];

/// Real-mass counts with a published axis.
pub const RECOGNIZED_MASS_COUNTS: [usize; 4] = [2, 3, 4, 7];

/// Regular (mass, age) axes for one grid run.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetGrid {
    mass_axis: Vec<f64>,
    log_age_axis: Vec<f64>,
}

impl TargetGrid {
    /// Select the target axes for a grid with `real_mass_count` distinct masses.
    pub fn for_mass_count(real_mass_count: usize) -> Result<Self, GridError> {
        let masses: &[f64] = match real_mass_count {
            7 => &AXIS_7,
            4 => &AXIS_4,
            3 => &AXIS_3,
            2 => &AXIS_2,
            count => return Err(GridError::UnsupportedMassCount { count }),
        };

        Ok(Self {
            mass_axis: masses.to_vec(),
            log_age_axis: lin_space(LOG_AGE_MIN, LOG_AGE_MAX, AGE_AXIS_LEN),
        })
    }

    /// All masses in output row order, boundaries included.
    pub fn mass_axis(&self) -> &[f64] {
        &self.mass_axis
    }

    /// Masses that correspond to observed tracks.
    pub fn real_masses(&self) -> &[f64] {
        &self.mass_axis[1..self.mass_axis.len() - 1]
    }

    pub fn low_boundary(&self) -> f64 {
        self.mass_axis[0]
    }

    pub fn high_boundary(&self) -> f64 {
        self.mass_axis[self.mass_axis.len() - 1]
    }

    /// Target ages as log10(age / yr), ascending.
    pub fn log_age_axis(&self) -> &[f64] {
        &self.log_age_axis
    }

    /// Target ages in years.
    pub fn ages_yr(&self) -> Vec<f64> {
        self.log_age_axis.iter().map(|x| 10f64.powf(*x)).collect()
    }

    /// Target ages in Gyr.
    pub fn ages_gyr(&self) -> Vec<f64> {
        self.ages_yr().into_iter().map(|a| a / 1e9).collect()
    }

    /// `(rows, columns)` of every grid written against these axes.
    pub fn shape(&self) -> (usize, usize) {
        (self.mass_axis.len(), self.log_age_axis.len())
    }

    /// Confirm the observed real masses are the published ones for this axis.
    pub fn check_real_masses(&self, observed: &[f64]) -> Result<(), GridError> {
        let expected = self.real_masses();
        let matches = expected.len() == observed.len()
            && expected
                .iter()
                .zip(observed)
                .all(|(e, o)| (e - o).abs() <= MASS_MATCH_TOL);
        if matches {
            Ok(())
        } else {
            Err(GridError::MassAxisMismatch {
                expected: expected.to_vec(),
                found: observed.to_vec(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_recognized_count_has_two_extra_rows() {
        for count in RECOGNIZED_MASS_COUNTS {
            let grid = TargetGrid::for_mass_count(count).unwrap();
            assert_eq!(grid.shape(), (count + 2, AGE_AXIS_LEN));
            assert_eq!(grid.real_masses().len(), count);
            assert!(grid.low_boundary() < grid.real_masses()[0]);
            assert!(grid.high_boundary() > grid.real_masses()[count - 1]);
            assert!(grid.mass_axis().windows(2).all(|w| w[1] > w[0]));
        }
    }

    #[test]
    fn unrecognized_count_is_fatal() {
        for count in [0, 1, 5, 6, 8] {
            let err = TargetGrid::for_mass_count(count).unwrap_err();
            assert!(matches!(err, GridError::UnsupportedMassCount { count: c } if c == count));
        }
    }

    #[test]
    fn age_axis_is_shared_and_log_spaced() {
        let a = TargetGrid::for_mass_count(7).unwrap();
        let b = TargetGrid::for_mass_count(2).unwrap();
        assert_eq!(a.log_age_axis(), b.log_age_axis());

        let ages = a.ages_yr();
        assert!((ages[0] / 10f64.powf(6.1) - 1.0).abs() < 1e-12);
        assert!((ages[AGE_AXIS_LEN - 1] / 10f64.powf(9.8) - 1.0).abs() < 1e-12);
        // Constant ratio between neighbours.
        let r0 = ages[1] / ages[0];
        let r1 = ages[300] / ages[299];
        assert!((r0 - r1).abs() < 1e-9);
    }

    // The high boundary is always extrapolated from 1.00 and 1.10, so the
    // generic "two highest real masses" rule coincides with the fixed pair.
    #[test]
    fn two_highest_real_masses_are_always_one_and_one_point_one() {
        for count in RECOGNIZED_MASS_COUNTS {
            let grid = TargetGrid::for_mass_count(count).unwrap();
            let real = grid.real_masses();
            assert_eq!(&real[real.len() - 2..], &[1.00, 1.10]);
            assert_eq!(grid.high_boundary(), 1.11);
        }
    }

    #[test]
    fn real_mass_check() {
        let grid = TargetGrid::for_mass_count(4).unwrap();
        assert!(grid.check_real_masses(&[0.77, 0.87, 1.0, 1.1]).is_ok());
        let err = grid.check_real_masses(&[0.77, 0.88, 1.0, 1.1]).unwrap_err();
        assert!(matches!(err, GridError::MassAxisMismatch { .. }));
    }
}
