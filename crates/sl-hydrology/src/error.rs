//! Error types for the hydrology pipeline.

use thiserror::Error;

/// Errors raised by hydrologic computations. All checks fail fast at the
/// innermost function that can detect them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydrologyError {
    #[error("Curve number {cn} outside (0, 100]")]
    CurveNumberOutOfRange { cn: f64 },

    #[error("Cumulative rainfall must be non-negative, got {depth_in} in")]
    NegativeRainfall { depth_in: f64 },

    #[error("Timestep must be positive, got {dt_hr} hr")]
    NonPositiveTimestep { dt_hr: f64 },

    #[error("Sheet-flow length {length_ft} ft exceeds the 300 ft limit")]
    SheetFlowTooLong { length_ft: f64 },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("Subcatchment has no sub-areas")]
    NoSubAreas,

    #[error("Subcatchment needs flow segments or a Tc override")]
    NoTravelPath,
}

pub type HydrologyResult<T> = Result<T, HydrologyError>;

pub(crate) fn require_positive(value: f64, what: &'static str) -> HydrologyResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(HydrologyError::NonPositive { what, value })
    }
}
