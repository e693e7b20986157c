// sl-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Length as UomLength, Time as UomTime, Velocity as UomVelocity,
    Volume as UomVolume, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (f64). The engine works in US customary units:
// lengths in feet, hydrology areas in acres, flows in cfs, storm depths in
// inches, hydrograph time in hours.
pub type Area = UomArea;
pub type Length = UomLength;
pub type Time = UomTime;
pub type Velocity = UomVelocity;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn inches(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn acres(v: f64) -> Area {
    use uom::si::area::acre;
    Area::new::<acre>(v)
}

#[inline]
pub fn sqft(v: f64) -> Area {
    use uom::si::area::square_foot;
    Area::new::<square_foot>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

#[inline]
pub fn cfs(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_foot_per_second;
    VolumeRate::new::<cubic_foot_per_second>(v)
}

#[inline]
pub fn cuft(v: f64) -> Volume {
    use uom::si::volume::cubic_foot;
    Volume::new::<cubic_foot>(v)
}

#[inline]
pub fn acre_ft(v: f64) -> Volume {
    use uom::si::volume::acre_foot;
    Volume::new::<acre_foot>(v)
}

#[inline]
pub fn fps(v: f64) -> Velocity {
    use uom::si::velocity::foot_per_second;
    Velocity::new::<foot_per_second>(v)
}

pub mod constants {
    /// Gravitational acceleration, ft/s².
    pub const G_FTPS2: f64 = 32.174;

    /// Square feet per acre (also cubic feet per acre-foot).
    pub const SQFT_PER_ACRE: f64 = 43_560.0;

    /// Cubic feet per acre-foot.
    pub const CUFT_PER_ACRE_FT: f64 = 43_560.0;

    /// Acres per square mile.
    pub const ACRES_PER_SQMI: f64 = 640.0;

    /// Manning's equation conversion factor for US customary units.
    pub const MANNING_K: f64 = 1.49;

    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
}
