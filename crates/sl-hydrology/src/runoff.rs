//! SCS curve-number runoff.

use crate::error::{HydrologyError, HydrologyResult};

/// Default initial-abstraction ratio (Ia = 0.2 S).
pub const DEFAULT_IA_RATIO: f64 = 0.2;

/// Potential maximum retention S in inches for a curve number.
pub fn retention_in(cn: f64) -> HydrologyResult<f64> {
    if !cn.is_finite() || cn <= 0.0 || cn > 100.0 {
        return Err(HydrologyError::CurveNumberOutOfRange { cn });
    }
    Ok(1000.0 / cn - 10.0)
}

/// Cumulative runoff depth Q in inches for cumulative rainfall `rainfall_in`.
///
/// Q = (P - Ia)^2 / (P - Ia + S) once rainfall exceeds the initial
/// abstraction, 0 before. Monotone non-decreasing in P and never exceeds P.
pub fn runoff_depth(rainfall_in: f64, cn: f64, ia_ratio: f64) -> HydrologyResult<f64> {
    let s = retention_in(cn)?;
    if !rainfall_in.is_finite() || rainfall_in < 0.0 {
        return Err(HydrologyError::NegativeRainfall {
            depth_in: rainfall_in,
        });
    }
    if !ia_ratio.is_finite() || ia_ratio < 0.0 {
        return Err(HydrologyError::NonPositive {
            what: "initial-abstraction ratio",
            value: ia_ratio,
        });
    }

    let ia = ia_ratio * s;
    if rainfall_in <= ia {
        return Ok(0.0);
    }
    let excess = rainfall_in - ia;
    Ok(excess * excess / (excess + s))
}
