//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the normalized time-series record (`ChartPoint`)
//! - the labeled chart value (`NamedValue`)
//! - the active-tab selector (`ViewSelector`)

pub mod types;

pub use types::*;
