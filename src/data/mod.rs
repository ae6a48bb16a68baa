//! Remote data access.
//!
//! This module owns the HTTP client and the typed wire payloads. Everything
//! past this boundary works with validated structs, never raw JSON.

pub mod disease_sh;

pub use disease_sh::*;
