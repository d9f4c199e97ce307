//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - grid identity (`GridDescriptor`, `OpacityModel`, `Atmosphere`)
//! - raw rows and per-mass tracks (`RawSample`, `EvolutionaryTrack`)
//! - resampled outputs (`ResampledTrack`) and run configuration (`BuildConfig`)

pub mod types;

pub use types::*;
