//! Shared "grid pipeline" logic used by the single-grid and batch commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load tables -> group tracks -> target axes -> resample -> extrapolate -> assemble
//!
//! Every value created here is scoped to one grid run. Nothing is shared
//! between runs, so independent grids can be built concurrently.

use std::path::{Path, PathBuf};

use crate::domain::{GridDescriptor, Quantity, ResampledTrack};
use crate::error::{BuildError, GridError};
use crate::grid::{QuantityGrid, TargetGrid};
use crate::io::export::GridFile;
use crate::io::literal::render_literal;
use crate::io::tables::{LoadedGrid, load_grid};
use crate::tracks::{GroupedTracks, extrapolate_boundaries, group_tracks, resample_track};

/// Observed extent of one real track, for reporting.
#[derive(Debug, Clone)]
pub struct TrackCoverage {
    pub mass: f64,
    pub samples: usize,
    pub log_age_min: f64,
    pub log_age_max: f64,
    /// Target ages with an available value.
    pub available: usize,
}

/// Ingest bookkeeping for one grid run.
#[derive(Debug, Clone)]
pub struct GridStats {
    pub files: Vec<PathBuf>,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub coverage: Vec<TrackCoverage>,
}

/// All computed outputs of a single grid run.
#[derive(Debug, Clone)]
pub struct GridOutput {
    pub descriptor: GridDescriptor,
    pub target: TargetGrid,
    pub luminosity: QuantityGrid,
    pub temperature: QuantityGrid,
    pub stats: GridStats,
}

/// Both literal arrays of one grid, rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGrid {
    pub luminosity: String,
    pub temperature: String,
}

impl GridOutput {
    pub fn grid(&self, quantity: Quantity) -> &QuantityGrid {
        match quantity {
            Quantity::Luminosity => &self.luminosity,
            Quantity::Temperature => &self.temperature,
        }
    }

    /// Render both quantities; nothing is returned unless both succeed.
    pub fn render(&self) -> Result<RenderedGrid, BuildError> {
        let tag = |source: GridError| BuildError::new(self.descriptor, source);
        Ok(RenderedGrid {
            luminosity: render_literal(&self.luminosity, &self.target).map_err(tag)?,
            temperature: render_literal(&self.temperature, &self.target).map_err(tag)?,
        })
    }

    pub fn to_file(&self) -> GridFile {
        GridFile::new(self.descriptor, &self.target, &self.luminosity, &self.temperature)
    }
}

/// Execute the full pipeline for one grid directory.
pub fn build_grid(dir: &Path, descriptor: GridDescriptor) -> Result<GridOutput, BuildError> {
    tracing::info!(dir = %dir.display(), grid = %descriptor, "building grid");
    let loaded = load_grid(dir, descriptor).map_err(|e| BuildError::new(descriptor, e))?;
    build_from_loaded(loaded)
}

/// Execute the pipeline on rows that were already loaded.
pub fn build_from_loaded(loaded: LoadedGrid) -> Result<GridOutput, BuildError> {
    let descriptor = loaded.descriptor;
    build_inner(loaded).map_err(|e| {
        if let Some(mass) = e.mass() {
            tracing::debug!(grid = %descriptor, mass, "grid failed on track");
        }
        BuildError::new(descriptor, e)
    })
}

fn build_inner(loaded: LoadedGrid) -> Result<GridOutput, GridError> {
    // 1) Group rows into per-mass tracks.
    let grouped = group_tracks(&loaded.rows)?;

    // 2) Select the target axes from the real-mass count.
    let target = TargetGrid::for_mass_count(grouped.len())?;
    target.check_real_masses(&grouped.masses())?;

    // 3) Resample + extrapolate each quantity independently.
    let luminosity = build_quantity(Quantity::Luminosity, &grouped, &target)?;
    let temperature = build_quantity(Quantity::Temperature, &grouped, &target)?;

    let coverage = coverage(&grouped, &luminosity);
    let stats = GridStats {
        files: loaded.files,
        rows_read: loaded.rows.len(),
        rows_dropped: grouped.dropped_rows,
        coverage,
    };

    tracing::info!(
        grid = %loaded.descriptor,
        masses = grouped.len(),
        rows = stats.rows_read,
        dropped = stats.rows_dropped,
        "grid built"
    );

    Ok(GridOutput {
        descriptor: loaded.descriptor,
        target,
        luminosity,
        temperature,
        stats,
    })
}

fn build_quantity(quantity: Quantity, grouped: &GroupedTracks, target: &TargetGrid) -> Result<QuantityGrid, GridError> {
    let real: Vec<ResampledTrack> = grouped
        .iter()
        .map(|track| resample_track(track, quantity, target.log_age_axis()))
        .collect::<Result<_, _>>()?;

    let boundaries = extrapolate_boundaries(target, &real)?;

    QuantityGrid::assemble(quantity, target, &boundaries.low, &real, &boundaries.high)
}

fn coverage(grouped: &GroupedTracks, luminosity: &QuantityGrid) -> Vec<TrackCoverage> {
    let (_, n_cols) = luminosity.shape();
    grouped
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let (log_age_min, log_age_max) = track.log_age_range();
            // Row 0 is the low boundary.
            let available = (0..n_cols).filter(|&c| luminosity.get(i + 1, c).is_some()).count();
            TrackCoverage {
                mass: track.mass(),
                samples: track.len(),
                log_age_min,
                log_age_max,
                available,
            }
        })
        .collect()
}
