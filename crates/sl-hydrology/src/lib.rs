//! sl-hydrology: the TR-55/SCS hydrology pipeline.
//!
//! Rainfall distribution -> curve-number runoff -> time of concentration ->
//! dimensionless unit hydrograph convolution, composed per subcatchment.

pub mod error;
pub mod rainfall;
pub mod runoff;
pub mod subcatchment;
pub mod tc;
pub mod unit_hydrograph;

pub use error::{HydrologyError, HydrologyResult};
pub use rainfall::StormType;
pub use runoff::{runoff_depth, DEFAULT_IA_RATIO};
pub use subcatchment::{
    composite_curve_number, runoff_hydrograph, SoilGroup, SubArea, Subcatchment,
    SubcatchmentRunoff,
};
pub use tc::{time_of_concentration_hr, travel_time_hr, FlowSegment, ShallowSurface};
pub use unit_hydrograph::{generate_hydrograph, unit_peak_cfs, RunoffHydrograph, UhRequest};
