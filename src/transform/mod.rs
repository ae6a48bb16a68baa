//! Pure data transforms.
//!
//! Responsibilities:
//!
//! - normalize the historical payload into ordered chart points
//! - project the global snapshot into fixed-shape chart series

pub mod history;
pub mod snapshot;

pub use history::*;
pub use snapshot::*;
