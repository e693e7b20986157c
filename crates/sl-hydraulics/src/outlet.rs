//! Outlet devices: orifice, weirs and the composite discharge sum.
//!
//! Devices are a tagged sum type with a single `discharge_cfs` dispatch;
//! every discharge law returns 0 at non-positive head and is monotone
//! non-decreasing in water-surface elevation above it.

use crate::error::{require_positive, HydraulicsError, HydraulicsResult};
use sl_core::constants::G_FTPS2;
use sl_core::units::Length;
use std::f64::consts::PI;
use uom::si::length::foot;

/// Weir crest profile; affects only the supplied coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeirKind {
    BroadCrested,
    SharpCrested,
}

/// Circular orifice plate.
#[derive(Debug, Clone, PartialEq)]
pub struct Orifice {
    pub cd: f64,
    pub diameter: Length,
    pub center_elev: Length,
}

impl Orifice {
    pub fn new(cd: f64, diameter: Length, center_elev: Length) -> HydraulicsResult<Self> {
        require_positive(cd, "orifice discharge coefficient")?;
        require_positive(diameter.get::<foot>(), "orifice diameter")?;
        Ok(Self {
            cd,
            diameter,
            center_elev,
        })
    }

    fn discharge_cfs(&self, wse_ft: f64) -> f64 {
        let head = wse_ft - self.center_elev.get::<foot>();
        if head <= 0.0 {
            return 0.0;
        }
        let d = self.diameter.get::<foot>();
        let area = PI * d * d / 4.0;
        self.cd * area * (2.0 * G_FTPS2 * head).sqrt()
    }
}

/// Horizontal-crested weir (broad or sharp).
#[derive(Debug, Clone, PartialEq)]
pub struct Weir {
    pub kind: WeirKind,
    pub coefficient: f64,
    pub crest_length: Length,
    pub crest_elev: Length,
}

impl Weir {
    pub fn new(
        kind: WeirKind,
        coefficient: f64,
        crest_length: Length,
        crest_elev: Length,
    ) -> HydraulicsResult<Self> {
        require_positive(coefficient, "weir coefficient")?;
        require_positive(crest_length.get::<foot>(), "weir crest length")?;
        Ok(Self {
            kind,
            coefficient,
            crest_length,
            crest_elev,
        })
    }

    fn discharge_cfs(&self, wse_ft: f64) -> f64 {
        let head = wse_ft - self.crest_elev.get::<foot>();
        if head <= 0.0 {
            return 0.0;
        }
        self.coefficient * self.crest_length.get::<foot>() * head.powf(1.5)
    }
}

/// Triangular (V-notch) weir.
#[derive(Debug, Clone, PartialEq)]
pub struct VNotchWeir {
    pub coefficient: f64,
    pub notch_angle_deg: f64,
    pub crest_elev: Length,
}

impl VNotchWeir {
    pub fn new(
        coefficient: f64,
        notch_angle_deg: f64,
        crest_elev: Length,
    ) -> HydraulicsResult<Self> {
        require_positive(coefficient, "V-notch coefficient")?;
        if !notch_angle_deg.is_finite() || notch_angle_deg <= 0.0 || notch_angle_deg >= 180.0 {
            return Err(HydraulicsError::NotchAngleOutOfRange {
                angle_deg: notch_angle_deg,
            });
        }
        Ok(Self {
            coefficient,
            notch_angle_deg,
            crest_elev,
        })
    }

    fn discharge_cfs(&self, wse_ft: f64) -> f64 {
        let head = wse_ft - self.crest_elev.get::<foot>();
        if head <= 0.0 {
            return 0.0;
        }
        let half_angle = (self.notch_angle_deg / 2.0).to_radians();
        self.coefficient * half_angle.tan() * head.powf(2.5)
    }
}

/// A pond outlet device.
#[derive(Debug, Clone, PartialEq)]
pub enum OutletDevice {
    Orifice(Orifice),
    Weir(Weir),
    VNotch(VNotchWeir),
}

impl OutletDevice {
    /// Discharge in cfs at a water-surface elevation in feet.
    pub fn discharge_cfs(&self, wse_ft: f64) -> f64 {
        match self {
            OutletDevice::Orifice(orifice) => orifice.discharge_cfs(wse_ft),
            OutletDevice::Weir(weir) => weir.discharge_cfs(wse_ft),
            OutletDevice::VNotch(notch) => notch.discharge_cfs(wse_ft),
        }
    }
}

/// Composite discharge: the simple sum over all devices.
pub fn total_discharge_cfs(devices: &[OutletDevice], wse_ft: f64) -> f64 {
    devices.iter().map(|d| d.discharge_cfs(wse_ft)).sum()
}
