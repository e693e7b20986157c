//! Subcatchment: composes rainfall, CN runoff, Tc and the unit hydrograph
//! into a runoff hydrograph for one land parcel.

use crate::error::{HydrologyError, HydrologyResult};
use crate::rainfall::StormType;
use crate::tc::{time_of_concentration_hr, FlowSegment};
use crate::unit_hydrograph::{generate_hydrograph, RunoffHydrograph, UhRequest};
use crate::DEFAULT_IA_RATIO;
use serde::{Deserialize, Serialize};

/// NRCS hydrologic soil group (A drains freely, D sheds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilGroup {
    A,
    B,
    C,
    D,
}

/// One homogeneous piece of a subcatchment.
#[derive(Debug, Clone, PartialEq)]
pub struct SubArea {
    pub description: String,
    pub soil_group: SoilGroup,
    pub curve_number: f64,
    pub area_ac: f64,
}

/// A runoff-producing land parcel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subcatchment {
    pub sub_areas: Vec<SubArea>,
    pub flow_segments: Vec<FlowSegment>,
    /// Overrides the segment-derived time of concentration, hours.
    pub tc_override_hr: Option<f64>,
    /// Overrides the area-weighted composite curve number.
    pub cn_override: Option<f64>,
}

/// Area-weighted composite curve number, rounded to the nearest integer.
pub fn composite_curve_number(sub_areas: &[SubArea]) -> HydrologyResult<f64> {
    if sub_areas.is_empty() {
        return Err(HydrologyError::NoSubAreas);
    }
    let mut weighted = 0.0;
    let mut total_area = 0.0;
    for sub in sub_areas {
        if !sub.curve_number.is_finite() || sub.curve_number <= 0.0 || sub.curve_number > 100.0 {
            return Err(HydrologyError::CurveNumberOutOfRange {
                cn: sub.curve_number,
            });
        }
        if !sub.area_ac.is_finite() || sub.area_ac <= 0.0 {
            return Err(HydrologyError::NonPositive {
                what: "sub-area",
                value: sub.area_ac,
            });
        }
        weighted += sub.curve_number * sub.area_ac;
        total_area += sub.area_ac;
    }
    Ok((weighted / total_area).round())
}

/// Total drainage area in acres.
pub fn total_area_ac(sub_areas: &[SubArea]) -> f64 {
    sub_areas.iter().map(|s| s.area_ac).sum()
}

/// A subcatchment's resolved parameters and runoff hydrograph.
#[derive(Debug, Clone, PartialEq)]
pub struct SubcatchmentRunoff {
    pub curve_number: f64,
    pub area_ac: f64,
    pub tc_hr: f64,
    pub runoff: RunoffHydrograph,
}

/// Run the full hydrology pipeline for a subcatchment under one storm.
pub fn runoff_hydrograph(
    subcatchment: &Subcatchment,
    storm: StormType,
    total_depth_in: f64,
    dt_override_hr: Option<f64>,
) -> HydrologyResult<SubcatchmentRunoff> {
    if subcatchment.sub_areas.is_empty() {
        return Err(HydrologyError::NoSubAreas);
    }
    for sub in &subcatchment.sub_areas {
        if !sub.area_ac.is_finite() || sub.area_ac <= 0.0 {
            return Err(HydrologyError::NonPositive {
                what: "sub-area",
                value: sub.area_ac,
            });
        }
    }

    let curve_number = match subcatchment.cn_override {
        Some(cn) if cn.is_finite() && cn > 0.0 && cn <= 100.0 => cn,
        Some(cn) => return Err(HydrologyError::CurveNumberOutOfRange { cn }),
        None => composite_curve_number(&subcatchment.sub_areas)?,
    };

    let area_ac = total_area_ac(&subcatchment.sub_areas);

    let tc_hr = match subcatchment.tc_override_hr {
        Some(tc) if tc.is_finite() && tc > 0.0 => tc,
        Some(tc) => {
            return Err(HydrologyError::NonPositive {
                what: "Tc override",
                value: tc,
            })
        }
        None => {
            if subcatchment.flow_segments.is_empty() {
                return Err(HydrologyError::NoTravelPath);
            }
            time_of_concentration_hr(&subcatchment.flow_segments)?
        }
    };

    let runoff = generate_hydrograph(&UhRequest {
        area_ac,
        curve_number,
        tc_hr,
        storm,
        total_depth_in,
        dt_override_hr,
        ia_ratio: DEFAULT_IA_RATIO,
    })?;

    Ok(SubcatchmentRunoff {
        curve_number,
        area_ac,
        tc_hr,
        runoff,
    })
}
