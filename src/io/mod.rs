//! Input/output helpers.
//!
//! - track-table ingest (`tables`)
//! - grid directory naming convention (`naming`)
//! - literal array output (`literal`)
//! - grid JSON read/write (`export`)

pub mod export;
pub mod literal;
pub mod naming;
pub mod tables;

pub use export::*;
pub use literal::*;
pub use naming::*;
pub use tables::*;
