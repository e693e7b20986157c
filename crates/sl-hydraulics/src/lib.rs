//! sl-hydraulics: the hydraulics layer.
//!
//! Stage-storage curves, polymorphic outlet devices, channel cross-sections,
//! Modified Puls (storage-indication) pond routing and kinematic reach
//! routing.

pub mod error;
pub mod outlet;
pub mod pond;
pub mod reach;
pub mod section;
pub mod stage_storage;

pub use error::{HydraulicsError, HydraulicsResult};
pub use outlet::{total_discharge_cfs, Orifice, OutletDevice, VNotchWeir, Weir, WeirKind};
pub use pond::{route_pond, Pond, PondRouting, PondStep};
pub use reach::{manning_flow_cfs, normal_depth_ft, route_reach, Reach, ReachRouting};
pub use section::CrossSection;
pub use stage_storage::{StagePoint, StageStorageCurve};
