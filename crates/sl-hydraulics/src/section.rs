//! Open-channel cross-section geometry.

use crate::error::{require_positive, HydraulicsResult};
use sl_core::units::Length;
use uom::si::length::foot;

/// Depth bracket for open (unroofed) sections; the normal-depth solver never
/// searches above this.
pub const OPEN_SECTION_MAX_DEPTH_FT: f64 = 100.0;

/// Reach cross-section shape.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossSection {
    Rectangular {
        width: Length,
    },
    /// Trapezoid with side slope z (horizontal per vertical).
    Trapezoidal {
        bottom_width: Length,
        side_slope: f64,
    },
    Circular {
        diameter: Length,
    },
}

impl CrossSection {
    /// Flow area in square feet at a depth in feet.
    pub fn flow_area_sqft(&self, depth_ft: f64) -> f64 {
        if depth_ft <= 0.0 {
            return 0.0;
        }
        match *self {
            CrossSection::Rectangular { width } => width.get::<foot>() * depth_ft,
            CrossSection::Trapezoidal {
                bottom_width,
                side_slope,
            } => {
                let b = bottom_width.get::<foot>();
                let top = b + 2.0 * side_slope * depth_ft;
                (b + top) / 2.0 * depth_ft
            }
            CrossSection::Circular { diameter } => {
                let d = diameter.get::<foot>();
                if depth_ft >= d {
                    return std::f64::consts::PI * d * d / 4.0;
                }
                let theta = Self::central_angle(depth_ft, d);
                d * d / 8.0 * (theta - theta.sin())
            }
        }
    }

    /// Wetted perimeter in feet at a depth in feet.
    pub fn wetted_perimeter_ft(&self, depth_ft: f64) -> f64 {
        if depth_ft <= 0.0 {
            return 0.0;
        }
        match *self {
            CrossSection::Rectangular { width } => width.get::<foot>() + 2.0 * depth_ft,
            CrossSection::Trapezoidal {
                bottom_width,
                side_slope,
            } => {
                bottom_width.get::<foot>()
                    + 2.0 * depth_ft * (1.0 + side_slope * side_slope).sqrt()
            }
            CrossSection::Circular { diameter } => {
                let d = diameter.get::<foot>();
                if depth_ft >= d {
                    return std::f64::consts::PI * d;
                }
                d * Self::central_angle(depth_ft, d) / 2.0
            }
        }
    }

    /// The solver's depth bracket: the pipe crown for circular sections,
    /// a fixed ceiling for open ones.
    pub fn max_depth_ft(&self) -> f64 {
        match *self {
            CrossSection::Circular { diameter } => diameter.get::<foot>(),
            _ => OPEN_SECTION_MAX_DEPTH_FT,
        }
    }

    pub fn validate(&self) -> HydraulicsResult<()> {
        match *self {
            CrossSection::Rectangular { width } => {
                require_positive(width.get::<foot>(), "channel width")?;
            }
            CrossSection::Trapezoidal {
                bottom_width,
                side_slope,
            } => {
                require_positive(bottom_width.get::<foot>(), "channel bottom width")?;
                require_positive(side_slope, "channel side slope")?;
            }
            CrossSection::Circular { diameter } => {
                require_positive(diameter.get::<foot>(), "pipe diameter")?;
            }
        }
        Ok(())
    }

    /// Central angle of the wetted segment of a partly full pipe.
    fn central_angle(depth_ft: f64, diameter_ft: f64) -> f64 {
        2.0 * (1.0 - 2.0 * depth_ft / diameter_ft).acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sl_core::units::ft;
    use std::f64::consts::PI;

    #[test]
    fn rectangular_geometry() {
        let section = CrossSection::Rectangular { width: ft(10.0) };
        assert_relative_eq!(section.flow_area_sqft(2.0), 20.0);
        assert_relative_eq!(section.wetted_perimeter_ft(2.0), 14.0);
        assert_eq!(section.flow_area_sqft(0.0), 0.0);
    }

    #[test]
    fn trapezoidal_geometry() {
        // b = 6, z = 2, d = 1.5: top = 12, A = (6+12)/2*1.5 = 13.5
        let section = CrossSection::Trapezoidal {
            bottom_width: ft(6.0),
            side_slope: 2.0,
        };
        assert_relative_eq!(section.flow_area_sqft(1.5), 13.5);
        assert_relative_eq!(
            section.wetted_perimeter_ft(1.5),
            6.0 + 3.0 * 5.0_f64.sqrt(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn circular_half_and_full() {
        let section = CrossSection::Circular { diameter: ft(4.0) };
        // half full: theta = pi, A = pi D^2 / 8, WP = pi D / 2
        assert_relative_eq!(section.flow_area_sqft(2.0), PI * 2.0, max_relative = 1e-12);
        assert_relative_eq!(
            section.wetted_perimeter_ft(2.0),
            2.0 * PI,
            max_relative = 1e-12
        );
        // at or above the crown: full pipe
        assert_relative_eq!(section.flow_area_sqft(4.0), PI * 4.0, max_relative = 1e-12);
        assert_relative_eq!(section.flow_area_sqft(9.0), PI * 4.0, max_relative = 1e-12);
        assert_relative_eq!(
            section.wetted_perimeter_ft(5.0),
            4.0 * PI,
            max_relative = 1e-12
        );
        assert_relative_eq!(section.max_depth_ft(), 4.0);
    }

    #[test]
    fn circular_area_grows_with_depth() {
        let section = CrossSection::Circular { diameter: ft(3.0) };
        let mut previous = 0.0;
        for step in 1..=30 {
            let d = step as f64 * 0.1;
            let a = section.flow_area_sqft(d);
            assert!(a > previous);
            previous = a;
        }
    }

    #[test]
    fn validation_rejects_flat_geometry() {
        assert!(CrossSection::Rectangular { width: ft(0.0) }.validate().is_err());
        assert!(CrossSection::Trapezoidal {
            bottom_width: ft(5.0),
            side_slope: 0.0
        }
        .validate()
        .is_err());
        assert!(CrossSection::Circular { diameter: ft(-1.0) }.validate().is_err());
        assert!(CrossSection::Rectangular { width: ft(8.0) }.validate().is_ok());
    }
}
