//! The regular mass × age matrix for one physical quantity.
//!
//! Rows follow the target mass axis (low boundary, real masses ascending,
//! high boundary); columns follow the target age axis. Not-available cells
//! are NaN internally and `None` through the accessors.

use nalgebra::DMatrix;

use crate::domain::{Quantity, ResampledTrack};
use crate::error::GridError;
use crate::grid::target::TargetGrid;

#[derive(Debug, Clone, PartialEq)]
pub struct QuantityGrid {
    pub quantity: Quantity,
    masses: Vec<f64>,
    values: DMatrix<f64>,
}

impl QuantityGrid {
    /// Stack boundary and real tracks into a grid, enforcing the target shape.
    pub fn assemble(
        quantity: Quantity,
        target: &TargetGrid,
        low: &ResampledTrack,
        real: &[ResampledTrack],
        high: &ResampledTrack,
    ) -> Result<Self, GridError> {
        let (n_rows, n_cols) = target.shape();

        let rows: Vec<&ResampledTrack> = std::iter::once(low)
            .chain(real.iter())
            .chain(std::iter::once(high))
            .collect();

        let found_cols = rows.iter().map(|t| t.len()).find(|&len| len != n_cols).unwrap_or(n_cols);
        if rows.len() != n_rows || found_cols != n_cols {
            return Err(GridError::ShapeMismatch {
                expected: (n_rows, n_cols),
                found: (rows.len(), found_cols),
            });
        }

        let values = DMatrix::from_fn(n_rows, n_cols, |r, c| rows[r].values[c]);
        let masses = rows.iter().map(|t| t.mass).collect();

        Ok(Self {
            quantity,
            masses,
            values,
        })
    }

    /// Rebuild a grid from row-major optional values (e.g. a JSON export).
    pub fn from_rows(quantity: Quantity, masses: Vec<f64>, rows: &[Vec<Option<f64>>]) -> Result<Self, GridError> {
        let n_rows = masses.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.len() != n_rows || rows.iter().any(|r| r.len() != n_cols) {
            let found_cols = rows.iter().map(Vec::len).find(|&len| len != n_cols).unwrap_or(n_cols);
            return Err(GridError::ShapeMismatch {
                expected: (n_rows, n_cols),
                found: (rows.len(), found_cols),
            });
        }

        let values = DMatrix::from_fn(n_rows, n_cols, |r, c| rows[r][c].unwrap_or(f64::NAN));
        Ok(Self {
            quantity,
            masses,
            values,
        })
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied().filter(|v| !v.is_nan())
    }

    /// One mass row, age ascending.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values
            .row(row)
            .iter()
            .map(|v| if v.is_nan() { None } else { Some(*v) })
            .collect::<Vec<_>>()
            .into_iter()
    }

    pub fn to_rows(&self) -> Vec<Vec<Option<f64>>> {
        (0..self.values.nrows()).map(|r| self.row(r).collect()).collect()
    }
}
