//! Read/write grid JSON files.
//!
//! Grid JSON is the "portable" representation of a built grid:
//! - the descriptor it was built for
//! - both target axes
//! - one row-per-mass matrix per quantity, `null` for not-available
//!
//! `wdgrid render` turns it back into literal arrays.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{GridDescriptor, Quantity};
use crate::error::{AppError, GridError};
use crate::grid::{QuantityGrid, TargetGrid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridFile {
    pub tool: String,
    pub descriptor: GridDescriptor,
    pub mass_axis: Vec<f64>,
    pub age_axis_gyr: Vec<f64>,
    pub log_age_axis: Vec<f64>,
    pub log_luminosity: Vec<Vec<Option<f64>>>,
    pub log_teff: Vec<Vec<Option<f64>>>,
}

impl GridFile {
    pub fn new(
        descriptor: GridDescriptor,
        target: &TargetGrid,
        luminosity: &QuantityGrid,
        temperature: &QuantityGrid,
    ) -> Self {
        Self {
            tool: "wdgrid".to_string(),
            descriptor,
            mass_axis: target.mass_axis().to_vec(),
            age_axis_gyr: target.ages_gyr(),
            log_age_axis: target.log_age_axis().to_vec(),
            log_luminosity: luminosity.to_rows(),
            log_teff: temperature.to_rows(),
        }
    }

    /// Rebuild the matrix for one quantity.
    pub fn grid(&self, quantity: Quantity) -> Result<QuantityGrid, GridError> {
        let rows = match quantity {
            Quantity::Luminosity => &self.log_luminosity,
            Quantity::Temperature => &self.log_teff,
        };
        QuantityGrid::from_rows(quantity, self.mass_axis.clone(), rows)
    }
}

/// Write a grid JSON file.
pub fn write_grid_json(path: &Path, grid: &GridFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create grid JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, grid).map_err(|e| AppError::new(2, format!("Failed to write grid JSON: {e}")))?;

    Ok(())
}

/// Read a grid JSON file.
pub fn read_grid_json(path: &Path) -> Result<GridFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open grid JSON '{}': {e}", path.display())))?;
    let grid: GridFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid grid JSON: {e}")))?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Atmosphere, OpacityModel};

    #[test]
    fn missing_cells_serialize_as_null() {
        let target = TargetGrid::for_mass_count(2).unwrap();
        let lum = QuantityGrid::from_rows(Quantity::Luminosity, vec![1.0], &[vec![Some(-1.5), None]]).unwrap();
        let teff = QuantityGrid::from_rows(Quantity::Temperature, vec![1.0], &[vec![None, Some(4.2)]]).unwrap();
        let descriptor = GridDescriptor {
            opacity_model: OpacityModel::Blouin20,
            atmosphere: Atmosphere::Hydrogen,
            metallicity: 0.01,
        };
        let file = GridFile::new(descriptor, &target, &lum, &teff);

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["log_luminosity"][0][1], serde_json::Value::Null);
        assert_eq!(json["descriptor"]["atmosphere"], "H");
        assert_eq!(json["descriptor"]["opacity_model"], "blouin20");

        let back: GridFile = serde_json::from_value(json).unwrap();
        assert_eq!(back.log_teff, vec![vec![None, Some(4.2)]]);
    }
}
