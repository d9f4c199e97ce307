//! Shared domain types.
//!
//! These types flow through the whole pipeline:
//!
//! - descriptors identifying a grid (`GridDescriptor`)
//! - raw table rows (`RawSample`)
//! - per-mass evolutionary tracks before and after resampling
//!
//! Descriptors are serializable so they can be embedded in JSON exports.

use std::cmp::Ordering;
use std::path::PathBuf;

use clap::ValueEnum;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Electron-conduction opacity model used to compute a set of tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpacityModel {
    Blouin20,
    Cassisi07,
}

impl OpacityModel {
    pub fn name(self) -> &'static str {
        match self {
            OpacityModel::Blouin20 => "blouin20",
            OpacityModel::Cassisi07 => "cassisi07",
        }
    }
}

/// Envelope composition: hydrogen (DA) or helium (DB) atmospheres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Atmosphere {
    #[serde(rename = "H")]
    #[value(name = "H", alias = "h", alias = "da")]
    Hydrogen,
    #[serde(rename = "He")]
    #[value(name = "He", alias = "he", alias = "db")]
    Helium,
}

impl Atmosphere {
    pub fn symbol(self) -> &'static str {
        match self {
            Atmosphere::Hydrogen => "H",
            Atmosphere::Helium => "He",
        }
    }
}

/// Identifies one physically distinct family of cooling tracks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridDescriptor {
    pub opacity_model: OpacityModel,
    pub atmosphere: Atmosphere,
    pub metallicity: f64,
}

impl std::fmt::Display for GridDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Opacity model: {}; atmosphere: {}; Z = {}",
            self.opacity_model.name(),
            self.atmosphere.symbol(),
            self.metallicity
        )
    }
}

/// One parsed table row. Photometric columns are not retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub log_age: f64,
    pub mass: f64,
    pub log_teff: f64,
    pub log_luminosity: f64,
}

/// Exact-float mass key with a total order.
///
/// Masses come from a fixed published set, so rows of the same track carry
/// bit-identical values and no tolerance is applied.
#[derive(Debug, Clone, Copy)]
pub struct Mass(pub f64);

impl Mass {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Mass {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Mass {}

impl PartialOrd for Mass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Mass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Physical quantity resampled onto the target grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// `log(L/Lsun)`
    Luminosity,
    /// `log(Teff/K)`
    Temperature,
}

impl Quantity {
    pub const ALL: [Quantity; 2] = [Quantity::Luminosity, Quantity::Temperature];

    pub fn label(self) -> &'static str {
        match self {
            Quantity::Luminosity => "Luminosity",
            Quantity::Temperature => "Effective Temperature",
        }
    }

    /// Short tag used in output file names.
    pub fn file_tag(self) -> &'static str {
        match self {
            Quantity::Luminosity => "lum",
            Quantity::Temperature => "teff",
        }
    }

    pub fn of(self, sample: &TrackSample) -> f64 {
        match self {
            Quantity::Luminosity => sample.log_luminosity,
            Quantity::Temperature => sample.log_teff,
        }
    }
}

/// A single state on an evolutionary track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSample {
    pub log_age: f64,
    pub log_luminosity: f64,
    pub log_teff: f64,
}

/// Cooling sequence for one stellar mass, ordered by strictly increasing age.
#[derive(Debug, Clone)]
pub struct EvolutionaryTrack {
    mass: f64,
    samples: Vec<TrackSample>,
}

impl EvolutionaryTrack {
    /// Build a track from samples already sorted by age.
    ///
    /// Fails on an empty sample list or on any age that does not strictly
    /// exceed its predecessor (duplicates included).
    pub fn new(mass: f64, samples: Vec<TrackSample>) -> Result<Self, GridError> {
        if samples.is_empty() {
            return Err(GridError::EmptyTrack { mass });
        }
        check_strictly_increasing(mass, &samples)?;
        Ok(Self { mass, samples })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn samples(&self) -> &[TrackSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Observed `(min, max)` log-age.
    pub fn log_age_range(&self) -> (f64, f64) {
        let first = self.samples[0].log_age;
        let last = self.samples[self.samples.len() - 1].log_age;
        (first, last)
    }
}

pub(crate) fn check_strictly_increasing(mass: f64, samples: &[TrackSample]) -> Result<(), GridError> {
    for w in samples.windows(2) {
        if !(w[1].log_age > w[0].log_age) {
            return Err(GridError::NonMonotonicAge {
                mass,
                log_age: w[1].log_age,
            });
        }
    }
    Ok(())
}

/// One quantity of one mass, sampled on the target age axis.
///
/// Not-available entries are stored as NaN so vector arithmetic propagates
/// them; the public accessors expose them as `None`. Input values are always
/// finite, so NaN never denotes anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledTrack {
    pub mass: f64,
    pub(crate) values: DVector<f64>,
}

impl ResampledTrack {
    pub fn from_options(mass: f64, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        let values: Vec<f64> = values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        Self {
            mass,
            values: DVector::from_vec(values),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.values.get(idx).copied().filter(|v| !v.is_nan())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values.iter().map(|v| if v.is_nan() { None } else { Some(*v) })
    }

    /// Number of age samples that are not the not-available marker.
    pub fn available(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}

/// A run's configuration as understood by the pipeline and writers.
///
/// Derived from CLI flags (plus defaults).
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Write `<name>.lum.txt` / `<name>.teff.txt` here instead of stdout.
    pub out_dir: Option<PathBuf>,
    /// Optional JSON export of the full grid (single-grid runs only).
    pub export_json: Option<PathBuf>,
    /// Print the coverage summary for each grid.
    pub summary: bool,
}
