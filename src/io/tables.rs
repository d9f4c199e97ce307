//! Raw track-table ingest.
//!
//! This module turns one grid directory of whitespace-delimited tables into a
//! flat collection of `RawSample`s.
//!
//! - **Strict schema**: every data line has exactly the published column count
//! - **Deterministic**: files are read in file-name order
//! - **No grouping or filtering** here; that belongs to `tracks::group`

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{GridDescriptor, RawSample};
use crate::error::GridError;

/// Published column layout of the cooling-track tables.
pub const COLUMNS: [&str; 17] = [
    "log(t)",
    "Mwd",
    "log(Teff)",
    "log(L/Lo)",
    "F435W",
    "F475",
    "F502N",
    "F550M",
    "F555W",
    "F606W",
    "F625W",
    "F658N",
    "F660N",
    "F775W",
    "F814W",
    "F850LP",
    "F892N",
];

const COL_LOG_AGE: usize = 0;
const COL_MASS: usize = 1;
const COL_LOG_TEFF: usize = 2;
const COL_LOG_LUM: usize = 3;

/// Unordered rows of every table in one grid directory.
#[derive(Debug, Clone)]
pub struct LoadedGrid {
    pub descriptor: GridDescriptor,
    pub rows: Vec<RawSample>,
    /// Tables read, in read order.
    pub files: Vec<PathBuf>,
}

/// Read every non-hidden file in `dir` as a track table.
pub fn load_grid(dir: &Path, descriptor: GridDescriptor) -> Result<LoadedGrid, GridError> {
    let io_err = |source: std::io::Error| GridError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        entries.push(entry.path());
    }
    entries.sort();

    let mut rows = Vec::new();
    let mut files = Vec::new();

    for path in entries {
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_none_or(|n| n.starts_with('.'));
        if hidden {
            tracing::debug!(path = %path.display(), "skipping hidden entry");
            continue;
        }
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "skipping non-file entry in grid directory");
            continue;
        }

        let table = read_table(&path)?;
        tracing::debug!(path = %path.display(), rows = table.len(), "loaded table");
        rows.extend(table);
        files.push(path);
    }

    Ok(LoadedGrid {
        descriptor,
        rows,
        files,
    })
}

/// Read and parse a single table file.
pub fn read_table(path: &Path) -> Result<Vec<RawSample>, GridError> {
    let bytes = fs::read(path).map_err(|source| GridError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
        let line = bytes[..pos].iter().filter(|&&b| b == b'\n').count() + 1;
        return Err(GridError::Schema {
            path: path.to_path_buf(),
            line,
            message: "non-ASCII content".to_string(),
        });
    }
    // ASCII is valid UTF-8.
    let text = String::from_utf8_lossy(&bytes);

    parse_table(&text, path)
}

/// Parse table text. `path` is only used for error reporting.
pub fn parse_table(text: &str, path: &Path) -> Result<Vec<RawSample>, GridError> {
    let mut out = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw_line.split_once('#').map_or(raw_line, |(head, _)| head).trim();
        if content.is_empty() {
            continue;
        }

        let schema_err = |message: String| GridError::Schema {
            path: path.to_path_buf(),
            line,
            message,
        };

        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() != COLUMNS.len() {
            return Err(schema_err(format!(
                "expected {} columns, found {}",
                COLUMNS.len(),
                fields.len()
            )));
        }

        let parse = |col: usize| -> Result<f64, GridError> {
            fields[col]
                .parse::<f64>()
                .map_err(|_| schema_err(format!("column `{}` is not numeric: '{}'", COLUMNS[col], fields[col])))
        };

        let mass = parse(COL_MASS)?;
        if !(mass.is_finite() && mass > 0.0) {
            return Err(schema_err(format!("invalid mass '{}'", fields[COL_MASS])));
        }

        out.push(RawSample {
            log_age: parse(COL_LOG_AGE)?,
            mass,
            log_teff: parse(COL_LOG_TEFF)?,
            log_luminosity: parse(COL_LOG_LUM)?,
        });
    }

    Ok(out)
}
