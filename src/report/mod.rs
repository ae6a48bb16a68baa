//! Reporting utilities: number formatting and plain-text summaries.

pub mod format;

pub use format::*;
