//! Error types for the hydraulics layer.

use sl_hydrograph::HydrographError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydraulicsError {
    #[error("Stage-storage curve needs at least 2 points, got {count}")]
    CurveTooShort { count: usize },

    #[error("Stage-storage curve {axis} must be strictly increasing at row {index}")]
    NonMonotonicCurve { axis: &'static str, index: usize },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("Notch angle {angle_deg} deg outside (0, 180)")]
    NotchAngleOutOfRange { angle_deg: f64 },

    #[error("Routing inflow needs at least 2 samples, got {count}")]
    ShortInflow { count: usize },

    #[error(transparent)]
    Hydrograph(#[from] HydrographError),
}

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;

pub(crate) fn require_positive(value: f64, what: &'static str) -> HydraulicsResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(HydraulicsError::NonPositive { what, value })
    }
}
