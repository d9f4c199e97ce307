//! Reporting utilities: grid summaries, axis listings, and batch outcomes.
//!
//! We keep formatting code in one place so:
//! - the numerical code stays clean and testable
//! - output changes are localized

pub mod format;

pub use format::*;
