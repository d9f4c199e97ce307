//! `wd-grids` library crate.
//!
//! Regularizes white-dwarf cooling-track tables onto a rectilinear
//! (mass, age) grid with synthetic boundary masses.
//!
//! The binary (`wdgrid`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the pipeline can be driven per grid from other tools

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod grid;
pub mod io;
pub mod math;
pub mod report;
pub mod tracks;
