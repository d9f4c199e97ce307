//! Evolutionary-track processing.
//!
//! Responsibilities:
//!
//! - group raw rows into per-mass tracks (`group`)
//! - resample each track onto the target age axis (`interp`)
//! - extrapolate the synthetic boundary masses (`extrapolate`)

pub mod extrapolate;
pub mod group;
pub mod interp;

pub use extrapolate::*;
pub use group::*;
pub use interp::*;
