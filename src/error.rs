//! Error types.
//!
//! - `GridError`: everything that can go wrong while building one grid
//! - `BuildError`: a `GridError` tagged with the grid it came from
//! - `AppError`: what the binary reports (message + process exit code)

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::GridDescriptor;

/// Failure while loading, grouping, resampling, or writing a single grid.
#[derive(Debug, Error)]
pub enum GridError {
    /// Reading a table or directory, or writing an output file, failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed input table.
    #[error("schema error in '{}' line {line}: {message}", path.display())]
    Schema {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A mass group has no usable rows left after dropping zero/invalid ages.
    #[error("track for mass {mass} has no usable rows")]
    EmptyTrack { mass: f64 },

    /// Ages within a track are not strictly increasing.
    #[error("track for mass {mass} has non-increasing ages at log(t)={log_age}")]
    NonMonotonicAge { mass: f64, log_age: f64 },

    /// Real-mass count does not correspond to any published sub-catalog.
    #[error("unrecognized real-mass count {count} (expected one of 2, 3, 4, 7)")]
    UnsupportedMassCount { count: usize },

    /// Observed masses differ from the published axis chosen for their count.
    #[error("observed masses {found:?} do not match the published axis {expected:?}")]
    MassAxisMismatch { expected: Vec<f64>, found: Vec<f64> },

    #[error("unable to retrieve {field} from grid name \"{name}\"")]
    NameFormat { name: String, field: &'static str },

    /// Row/column contract violated between the resampled grid and its target axes.
    #[error("grid shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl GridError {
    /// Process exit code used when this error ends a single-grid run.
    pub fn exit_code(&self) -> u8 {
        match self {
            GridError::Io { .. }
            | GridError::Schema { .. }
            | GridError::NameFormat { .. }
            | GridError::UnsupportedMassCount { .. }
            | GridError::MassAxisMismatch { .. } => 2,
            GridError::EmptyTrack { .. } => 3,
            GridError::NonMonotonicAge { .. } | GridError::ShapeMismatch { .. } => 4,
        }
    }

    /// Offending mass, when the failure is tied to one track.
    pub fn mass(&self) -> Option<f64> {
        match self {
            GridError::EmptyTrack { mass } | GridError::NonMonotonicAge { mass, .. } => Some(*mass),
            _ => None,
        }
    }
}

/// A `GridError` attributed to the grid being built.
#[derive(Debug, Error)]
#[error("grid [{descriptor}]: {source}")]
pub struct BuildError {
    pub descriptor: GridDescriptor,
    #[source]
    pub source: GridError,
}

impl BuildError {
    pub fn new(descriptor: GridDescriptor, source: GridError) -> Self {
        Self { descriptor, source }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<GridError> for AppError {
    fn from(err: GridError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl From<BuildError> for AppError {
    fn from(err: BuildError) -> Self {
        AppError::new(err.source.exit_code(), err.to_string())
    }
}
