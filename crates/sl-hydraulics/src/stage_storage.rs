//! Monotone stage-storage curves and basin-shape generators.

use crate::error::{require_positive, HydraulicsError, HydraulicsResult};
use serde::{Deserialize, Serialize};
use sl_core::lerp;
use sl_core::units::Length;
use std::f64::consts::PI;
use uom::si::length::foot;

/// One row of a stage-storage curve: water-surface elevation in feet against
/// stored volume in cubic feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StagePoint {
    pub stage_ft: f64,
    pub storage_cuft: f64,
}

/// An elevation-volume relation, strictly increasing on both axes.
/// Lookups in either direction are piecewise linear and clamp at the ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StagePoint>", into = "Vec<StagePoint>")]
pub struct StageStorageCurve {
    points: Vec<StagePoint>,
}

impl TryFrom<Vec<StagePoint>> for StageStorageCurve {
    type Error = HydraulicsError;

    fn try_from(points: Vec<StagePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<StageStorageCurve> for Vec<StagePoint> {
    fn from(curve: StageStorageCurve) -> Self {
        curve.points
    }
}

impl StageStorageCurve {
    pub fn new(points: Vec<StagePoint>) -> HydraulicsResult<Self> {
        if points.len() < 2 {
            return Err(HydraulicsError::CurveTooShort {
                count: points.len(),
            });
        }
        for (index, pair) in points.windows(2).enumerate() {
            if !(pair[1].stage_ft > pair[0].stage_ft) {
                return Err(HydraulicsError::NonMonotonicCurve {
                    axis: "stage",
                    index: index + 1,
                });
            }
            if !(pair[1].storage_cuft > pair[0].storage_cuft) {
                return Err(HydraulicsError::NonMonotonicCurve {
                    axis: "storage",
                    index: index + 1,
                });
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[StagePoint] {
        &self.points
    }

    pub fn min_stage_ft(&self) -> f64 {
        self.points[0].stage_ft
    }

    pub fn max_stage_ft(&self) -> f64 {
        self.points[self.points.len() - 1].stage_ft
    }

    pub fn max_storage_cuft(&self) -> f64 {
        self.points[self.points.len() - 1].storage_cuft
    }

    /// Storage at a water-surface elevation, clamped to the curve ends.
    pub fn storage_at(&self, stage_ft: f64) -> f64 {
        self.lookup(stage_ft, |p| p.stage_ft, |p| p.storage_cuft)
    }

    /// Stage holding a given storage, clamped to the curve ends.
    pub fn stage_at(&self, storage_cuft: f64) -> f64 {
        self.lookup(storage_cuft, |p| p.storage_cuft, |p| p.stage_ft)
    }

    fn lookup(
        &self,
        x: f64,
        key: impl Fn(&StagePoint) -> f64,
        value: impl Fn(&StagePoint) -> f64,
    ) -> f64 {
        let first = &self.points[0];
        let last = &self.points[self.points.len() - 1];
        if x <= key(first) {
            return value(first);
        }
        if x >= key(last) {
            return value(last);
        }
        let hi = self.points.partition_point(|p| key(p) <= x);
        let p0 = &self.points[hi - 1];
        let p1 = &self.points[hi];
        lerp(key(p0), value(p0), key(p1), value(p1), x)
    }

    /// Prismatic basin with a rectangular base and uniform side slopes
    /// (z horizontal per vertical). Volume from the prismoidal closed form
    /// V(d) = L·W·d + (L+W)·z·d² + (4/3)·z²·d³.
    pub fn prismatic(
        base_elev_ft: f64,
        depth_ft: f64,
        base_length: Length,
        base_width: Length,
        side_slope: f64,
        points: usize,
    ) -> HydraulicsResult<Self> {
        let length = require_positive(base_length.get::<foot>(), "basin length")?;
        let width = require_positive(base_width.get::<foot>(), "basin width")?;
        if !side_slope.is_finite() || side_slope < 0.0 {
            return Err(HydraulicsError::NonPositive {
                what: "side slope",
                value: side_slope,
            });
        }
        Self::generate(base_elev_ft, depth_ft, points, |d| {
            length * width * d
                + (length + width) * side_slope * d * d
                + (4.0 / 3.0) * side_slope * side_slope * d * d * d
        })
    }

    /// Conical basin: a circular base that flares at the side slope.
    pub fn conical(
        base_elev_ft: f64,
        depth_ft: f64,
        base_radius: Length,
        side_slope: f64,
        points: usize,
    ) -> HydraulicsResult<Self> {
        let r0 = require_positive(base_radius.get::<foot>(), "base radius")?;
        if !side_slope.is_finite() || side_slope < 0.0 {
            return Err(HydraulicsError::NonPositive {
                what: "side slope",
                value: side_slope,
            });
        }
        Self::generate(base_elev_ft, depth_ft, points, |d| {
            let r = r0 + side_slope * d;
            PI * d / 3.0 * (r0 * r0 + r0 * r + r * r)
        })
    }

    /// Vertical-walled cylindrical basin.
    pub fn cylindrical(
        base_elev_ft: f64,
        depth_ft: f64,
        radius: Length,
        points: usize,
    ) -> HydraulicsResult<Self> {
        let r = require_positive(radius.get::<foot>(), "radius")?;
        Self::generate(base_elev_ft, depth_ft, points, |d| PI * r * r * d)
    }

    fn generate(
        base_elev_ft: f64,
        depth_ft: f64,
        points: usize,
        volume_at: impl Fn(f64) -> f64,
    ) -> HydraulicsResult<Self> {
        let depth = require_positive(depth_ft, "basin depth")?;
        if points < 2 {
            return Err(HydraulicsError::CurveTooShort { count: points });
        }
        let rows = (0..points)
            .map(|i| {
                let d = depth * i as f64 / (points - 1) as f64;
                StagePoint {
                    stage_ft: base_elev_ft + d,
                    storage_cuft: volume_at(d),
                }
            })
            .collect();
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sl_core::units::ft;

    fn curve() -> StageStorageCurve {
        StageStorageCurve::new(vec![
            StagePoint {
                stage_ft: 100.0,
                storage_cuft: 0.0,
            },
            StagePoint {
                stage_ft: 104.0,
                storage_cuft: 40_000.0,
            },
            StagePoint {
                stage_ft: 110.0,
                storage_cuft: 160_000.0,
            },
        ])
        .unwrap()
    }

    #[test]
    fn rejects_degenerate_curves() {
        assert_eq!(
            StageStorageCurve::new(vec![StagePoint {
                stage_ft: 100.0,
                storage_cuft: 0.0
            }])
            .unwrap_err(),
            HydraulicsError::CurveTooShort { count: 1 }
        );

        let err = StageStorageCurve::new(vec![
            StagePoint {
                stage_ft: 100.0,
                storage_cuft: 0.0,
            },
            StagePoint {
                stage_ft: 100.0,
                storage_cuft: 10.0,
            },
        ])
        .unwrap_err();
        assert_eq!(
            err,
            HydraulicsError::NonMonotonicCurve {
                axis: "stage",
                index: 1
            }
        );

        let err = StageStorageCurve::new(vec![
            StagePoint {
                stage_ft: 100.0,
                storage_cuft: 10.0,
            },
            StagePoint {
                stage_ft: 101.0,
                storage_cuft: 10.0,
            },
        ])
        .unwrap_err();
        assert_eq!(
            err,
            HydraulicsError::NonMonotonicCurve {
                axis: "storage",
                index: 1
            }
        );
    }

    #[test]
    fn lookups_interpolate_and_clamp() {
        let c = curve();
        assert_relative_eq!(c.storage_at(102.0), 20_000.0);
        assert_relative_eq!(c.stage_at(100_000.0), 107.0);
        // clamps
        assert_relative_eq!(c.storage_at(90.0), 0.0);
        assert_relative_eq!(c.storage_at(120.0), 160_000.0);
        assert_relative_eq!(c.stage_at(-5.0), 100.0);
        assert_relative_eq!(c.stage_at(1.0e9), 110.0);
    }

    #[test]
    fn stage_storage_round_trip_in_the_interior() {
        let c = curve();
        let tol = sl_core::Tolerances::default();
        for stage in [100.5, 101.9, 104.0, 106.3, 109.9] {
            assert!(
                sl_core::nearly_equal(c.stage_at(c.storage_at(stage)), stage, tol),
                "round trip drifted at {stage}"
            );
        }
    }

    #[test]
    fn cylindrical_volume_is_exact() {
        let c = StageStorageCurve::cylindrical(100.0, 10.0, ft(20.0), 11).unwrap();
        assert_eq!(c.points().len(), 11);
        assert_relative_eq!(c.min_stage_ft(), 100.0);
        assert_relative_eq!(c.max_stage_ft(), 110.0);
        assert_relative_eq!(
            c.max_storage_cuft(),
            PI * 400.0 * 10.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn prismatic_closed_form() {
        // 100 x 50 base, depth 10, 1:1 side slopes:
        // V(10) = 50_000 + 150*100 + (4/3)*1000 = 66_333.3
        let c = StageStorageCurve::prismatic(100.0, 10.0, ft(100.0), ft(50.0), 1.0, 21).unwrap();
        assert_relative_eq!(c.max_storage_cuft(), 66_333.333_333, max_relative = 1e-9);
        // vertical walls reduce to L*W*d
        let box_basin =
            StageStorageCurve::prismatic(0.0, 4.0, ft(100.0), ft(50.0), 0.0, 5).unwrap();
        assert_relative_eq!(box_basin.max_storage_cuft(), 20_000.0);
    }

    #[test]
    fn conical_frustum_volume() {
        // r0 = 10, z = 2, d = 5 -> r = 20; V = pi*5/3*(100 + 200 + 400)
        let c = StageStorageCurve::conical(0.0, 5.0, ft(10.0), 2.0, 6).unwrap();
        assert_relative_eq!(
            c.max_storage_cuft(),
            PI * 5.0 / 3.0 * 700.0,
            max_relative = 1e-12
        );
    }
}
