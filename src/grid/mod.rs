//! Target axes and the regular grids built against them.

pub mod regular;
pub mod target;

pub use regular::*;
pub use target::*;
