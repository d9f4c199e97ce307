//! Brace-delimited literal arrays for the downstream fixed-size consumer.
//!
//! ```text
//! {v00, v01, ..., v0N,
//! v10, v11, ..., NAN,
//! ...
//! }
//! ```
//!
//! Every value (the last in a row included) is followed by `", "` and every
//! row by a newline. Values use six fractional digits; not-available cells
//! are rendered as [`NOT_AVAILABLE`]. Row identity is positional only.

use std::fmt::Write as _;
use std::fs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::GridError;
use crate::grid::regular::QuantityGrid;
use crate::grid::target::TargetGrid;

/// Marker for a cell outside a track's observed age range.
pub const NOT_AVAILABLE: &str = "NAN";

/// Render one grid as a literal array, checking it against the target shape.
pub fn render_literal(grid: &QuantityGrid, target: &TargetGrid) -> Result<String, GridError> {
    if grid.shape() != target.shape() {
        return Err(GridError::ShapeMismatch {
            expected: target.shape(),
            found: grid.shape(),
        });
    }
    Ok(render_rows(grid))
}

/// Render without a target check (e.g. for grids re-read from an export).
pub fn render_rows(grid: &QuantityGrid) -> String {
    let (rows, cols) = grid.shape();
    // "-12.345678, " is the typical cell width.
    let mut out = String::with_capacity(2 + rows * (cols * 12 + 1));

    out.push('{');
    for r in 0..rows {
        for cell in grid.row(r) {
            match cell {
                Some(v) => {
                    let _ = write!(out, "{v:.6}, ");
                }
                None => {
                    out.push_str(NOT_AVAILABLE);
                    out.push_str(", ");
                }
            }
        }
        out.push('\n');
    }
    out.push('}');

    out
}

/// Write an already rendered literal to `path`.
pub fn write_literal_file(path: &Path, literal: &str) -> Result<(), GridError> {
    fs::write(path, literal).map_err(|source| GridError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write several rendered literals so that either all of them land or none do.
///
/// Each literal goes to a `.tmp` sibling first; targets are replaced only once
/// every temporary is written. A failed rename removes the targets already
/// replaced in this call along with the remaining temporaries.
pub fn write_literal_set(files: &[(PathBuf, &str)]) -> Result<(), GridError> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());
    for (path, literal) in files {
        let tmp = tmp_sibling(path);
        if let Err(err) = write_literal_file(&tmp, literal) {
            let _ = fs::remove_file(&tmp);
            discard(staged.iter().map(|(t, _)| t.as_path()));
            return Err(err);
        }
        staged.push((tmp, path.as_path()));
    }

    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(tmp, path) {
            discard(staged[..i].iter().map(|(_, p)| *p));
            discard(staged[i..].iter().map(|(t, _)| t.as_path()));
            return Err(GridError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn discard<'a>(paths: impl Iterator<Item = &'a Path>) {
    for path in paths {
        if let Err(err) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), "failed to remove partial output: {err}");
        }
    }
}
