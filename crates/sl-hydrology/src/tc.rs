//! Time of concentration from ordered flow segments.
//!
//! TR-55 splits the travel path into sheet flow, shallow concentrated flow
//! and channel flow; Tc is the sum of the per-segment travel times.

use crate::error::{require_positive, HydrologyError, HydrologyResult};
use serde::{Deserialize, Serialize};
use sl_core::constants::{MANNING_K, SECONDS_PER_HOUR};

/// Sheet-flow length limit in feet.
pub const MAX_SHEET_LENGTH_FT: f64 = 300.0;

/// Surface class for shallow concentrated flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShallowSurface {
    Paved,
    Unpaved,
}

impl ShallowSurface {
    /// Velocity coefficient k in V = k * sqrt(slope), ft/s.
    pub fn velocity_coefficient(self) -> f64 {
        match self {
            ShallowSurface::Paved => 20.3282,
            ShallowSurface::Unpaved => 16.1345,
        }
    }
}

/// One segment of the travel path, in downstream order.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowSegment {
    /// Sheet flow over a plane, at most 300 ft.
    Sheet {
        manning_n: f64,
        length_ft: f64,
        slope: f64,
        /// Two-year 24-hour rainfall depth in inches.
        two_year_rain_in: f64,
    },
    ShallowConcentrated {
        surface: ShallowSurface,
        length_ft: f64,
        slope: f64,
    },
    Channel {
        manning_n: f64,
        flow_area_sqft: f64,
        wetted_perimeter_ft: f64,
        slope: f64,
        length_ft: f64,
    },
}

/// Travel time of a single segment in hours.
pub fn travel_time_hr(segment: &FlowSegment) -> HydrologyResult<f64> {
    match *segment {
        FlowSegment::Sheet {
            manning_n,
            length_ft,
            slope,
            two_year_rain_in,
        } => {
            let n = require_positive(manning_n, "sheet Manning n")?;
            let length = require_positive(length_ft, "sheet length")?;
            if length > MAX_SHEET_LENGTH_FT {
                return Err(HydrologyError::SheetFlowTooLong { length_ft: length });
            }
            let s = require_positive(slope, "sheet slope")?;
            let p2 = require_positive(two_year_rain_in, "two-year rainfall")?;
            Ok(0.007 * (n * length).powf(0.8) / (p2.sqrt() * s.powf(0.4)))
        }
        FlowSegment::ShallowConcentrated {
            surface,
            length_ft,
            slope,
        } => {
            let length = require_positive(length_ft, "shallow-flow length")?;
            let s = require_positive(slope, "shallow-flow slope")?;
            let velocity = surface.velocity_coefficient() * s.sqrt();
            Ok(length / velocity / SECONDS_PER_HOUR)
        }
        FlowSegment::Channel {
            manning_n,
            flow_area_sqft,
            wetted_perimeter_ft,
            slope,
            length_ft,
        } => {
            let n = require_positive(manning_n, "channel Manning n")?;
            let area = require_positive(flow_area_sqft, "channel flow area")?;
            let perimeter = require_positive(wetted_perimeter_ft, "channel wetted perimeter")?;
            let s = require_positive(slope, "channel slope")?;
            let length = require_positive(length_ft, "channel length")?;
            let radius = area / perimeter;
            let velocity = (MANNING_K / n) * radius.powf(2.0 / 3.0) * s.sqrt();
            Ok(length / velocity / SECONDS_PER_HOUR)
        }
    }
}

/// Time of concentration: the sum of the segment travel times, hours.
pub fn time_of_concentration_hr(segments: &[FlowSegment]) -> HydrologyResult<f64> {
    if segments.is_empty() {
        return Err(HydrologyError::NoTravelPath);
    }
    segments.iter().map(travel_time_hr).sum()
}
