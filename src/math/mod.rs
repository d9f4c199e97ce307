//! Mathematical utilities: linear interpolation and evenly spaced axes.

pub mod linear;

pub use linear::*;
