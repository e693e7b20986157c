//! Compile schema definitions into executable runtime types.

use sl_core::units::ft;
use sl_hydraulics::{
    CrossSection, Orifice, OutletDevice, Pond, Reach, StagePoint, StageStorageCurve, VNotchWeir,
    Weir, WeirKind,
};
use sl_hydrology::{FlowSegment, SubArea, Subcatchment};
use sl_project::{
    FlowSegmentDef, OutletDef, PondDef, ReachDef, SectionDef, SubcatchmentDef, WeirKindDef,
};

use crate::error::{EngineError, EngineResult};

pub fn build_subcatchment(def: &SubcatchmentDef) -> Subcatchment {
    Subcatchment {
        sub_areas: def
            .sub_areas
            .iter()
            .map(|sub| SubArea {
                description: sub.description.clone(),
                soil_group: sub.soil_group,
                curve_number: sub.curve_number,
                area_ac: sub.area_ac,
            })
            .collect(),
        flow_segments: def.flow_segments.iter().map(build_segment).collect(),
        tc_override_hr: def.tc_override_hr,
        cn_override: def.cn_override,
    }
}

fn build_segment(def: &FlowSegmentDef) -> FlowSegment {
    match *def {
        FlowSegmentDef::Sheet {
            manning_n,
            length_ft,
            slope,
            two_year_rain_in,
        } => FlowSegment::Sheet {
            manning_n,
            length_ft,
            slope,
            two_year_rain_in,
        },
        FlowSegmentDef::ShallowConcentrated {
            surface,
            length_ft,
            slope,
        } => FlowSegment::ShallowConcentrated {
            surface,
            length_ft,
            slope,
        },
        FlowSegmentDef::Channel {
            manning_n,
            flow_area_sqft,
            wetted_perimeter_ft,
            slope,
            length_ft,
        } => FlowSegment::Channel {
            manning_n,
            flow_area_sqft,
            wetted_perimeter_ft,
            slope,
            length_ft,
        },
    }
}

pub fn build_pond(node_id: &str, def: &PondDef) -> EngineResult<Pond> {
    let curve = StageStorageCurve::new(
        def.stage_storage
            .iter()
            .map(|p| StagePoint {
                stage_ft: p.stage_ft,
                storage_cuft: p.storage_cuft,
            })
            .collect(),
    )
    .map_err(|e| EngineError::hydraulics(node_id, e))?;

    let outlets = def
        .outlets
        .iter()
        .map(|outlet| build_outlet(node_id, outlet))
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(Pond {
        curve,
        outlets,
        initial_wse_ft: def.initial_wse_ft,
    })
}

fn build_outlet(node_id: &str, def: &OutletDef) -> EngineResult<OutletDevice> {
    let device = match *def {
        OutletDef::Orifice {
            cd,
            diameter_ft,
            center_elev_ft,
        } => Orifice::new(cd, ft(diameter_ft), ft(center_elev_ft)).map(OutletDevice::Orifice),
        OutletDef::Weir {
            kind,
            coefficient,
            crest_length_ft,
            crest_elev_ft,
        } => Weir::new(
            match kind {
                WeirKindDef::BroadCrested => WeirKind::BroadCrested,
                WeirKindDef::SharpCrested => WeirKind::SharpCrested,
            },
            coefficient,
            ft(crest_length_ft),
            ft(crest_elev_ft),
        )
        .map(OutletDevice::Weir),
        OutletDef::VNotch {
            coefficient,
            notch_angle_deg,
            crest_elev_ft,
        } => VNotchWeir::new(coefficient, notch_angle_deg, ft(crest_elev_ft))
            .map(OutletDevice::VNotch),
    };
    device.map_err(|e| EngineError::hydraulics(node_id, e))
}

pub fn build_reach(def: &ReachDef) -> Reach {
    Reach {
        length: ft(def.length_ft),
        manning_n: def.manning_n,
        slope: def.slope,
        section: match def.section {
            SectionDef::Rectangular { width_ft } => CrossSection::Rectangular {
                width: ft(width_ft),
            },
            SectionDef::Trapezoidal {
                bottom_width_ft,
                side_slope,
            } => CrossSection::Trapezoidal {
                bottom_width: ft(bottom_width_ft),
                side_slope,
            },
            SectionDef::Circular { diameter_ft } => CrossSection::Circular {
                diameter: ft(diameter_ft),
            },
        },
    }
}
