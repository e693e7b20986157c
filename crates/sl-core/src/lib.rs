//! sl-core: stable foundation for stormlab.
//!
//! Contains:
//! - units (uom US-customary types + constructors)
//! - numeric (Real + tolerances + interpolation helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{SlError, SlResult};
pub use numeric::*;
pub use units::*;
