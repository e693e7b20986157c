//! The hydrograph series type.

use serde::{Deserialize, Serialize};
use sl_core::constants::{CUFT_PER_ACRE_FT, SECONDS_PER_HOUR};
use sl_core::lerp;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydrographError {
    #[error("Sample times must be strictly increasing (violated at index {index})")]
    NonMonotonicTime { index: usize },

    #[error("Non-finite {what} at index {index}")]
    NonFinite { what: &'static str, index: usize },

    #[error("Timestep must be positive, got {dt_hr} hr")]
    NonPositiveStep { dt_hr: f64 },
}

/// One hydrograph sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydroPoint {
    pub time_hr: f64,
    pub flow_cfs: f64,
}

/// A flow time series at a point: strictly increasing times in hours,
/// flows in cfs. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hydrograph {
    points: Vec<HydroPoint>,
}

impl Hydrograph {
    /// Build a hydrograph from samples, checking that times are finite and
    /// strictly increasing and flows are finite.
    pub fn new(points: Vec<HydroPoint>) -> Result<Self, HydrographError> {
        for (index, p) in points.iter().enumerate() {
            if !p.time_hr.is_finite() {
                return Err(HydrographError::NonFinite {
                    what: "time",
                    index,
                });
            }
            if !p.flow_cfs.is_finite() {
                return Err(HydrographError::NonFinite {
                    what: "flow",
                    index,
                });
            }
            if index > 0 && p.time_hr <= points[index - 1].time_hr {
                return Err(HydrographError::NonMonotonicTime { index });
            }
        }
        Ok(Self { points })
    }

    /// A hydrograph with no samples (the result of an upstream-less router
    /// node).
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Build an equal-spaced hydrograph starting at `start_hr` with spacing
    /// `dt_hr`.
    pub fn from_uniform(
        start_hr: f64,
        dt_hr: f64,
        flows_cfs: &[f64],
    ) -> Result<Self, HydrographError> {
        if !(dt_hr > 0.0) || !dt_hr.is_finite() {
            return Err(HydrographError::NonPositiveStep { dt_hr });
        }
        let points = flows_cfs
            .iter()
            .enumerate()
            .map(|(i, &q)| HydroPoint {
                time_hr: start_hr + i as f64 * dt_hr,
                flow_cfs: q,
            })
            .collect();
        Self::new(points)
    }

    /// Internal constructor for series already known to be strictly
    /// increasing (union grids, translated copies).
    pub(crate) fn from_sorted_unchecked(points: Vec<HydroPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].time_hr < w[1].time_hr));
        Self { points }
    }

    pub fn points(&self) -> &[HydroPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Spacing between the first two samples. `None` for series shorter
    /// than two samples.
    pub fn step_hr(&self) -> Option<f64> {
        match self.points.as_slice() {
            [a, b, ..] => Some(b.time_hr - a.time_hr),
            _ => None,
        }
    }

    /// The sample with the highest flow (first occurrence on ties).
    pub fn peak(&self) -> Option<HydroPoint> {
        self.points
            .iter()
            .copied()
            .reduce(|best, p| if p.flow_cfs > best.flow_cfs { p } else { best })
    }

    /// Peak flow in cfs; 0 for an empty series.
    pub fn peak_flow_cfs(&self) -> f64 {
        self.peak().map_or(0.0, |p| p.flow_cfs)
    }

    /// Time of the peak flow in hours; 0 for an empty series.
    pub fn time_of_peak_hr(&self) -> f64 {
        self.peak().map_or(0.0, |p| p.time_hr)
    }

    /// Flow at time `t_hr`: linear between bracketing samples, 0 before the
    /// first sample, last value held after the final sample.
    pub fn flow_at(&self, t_hr: f64) -> f64 {
        let Some(first) = self.points.first() else {
            return 0.0;
        };
        let last = self.points.last().expect("non-empty series has a last");

        if t_hr < first.time_hr {
            return 0.0;
        }
        if t_hr >= last.time_hr {
            return last.flow_cfs;
        }

        let hi = self.points.partition_point(|p| p.time_hr <= t_hr);
        let p0 = self.points[hi - 1];
        let p1 = self.points[hi];
        lerp(p0.time_hr, p0.flow_cfs, p1.time_hr, p1.flow_cfs, t_hr)
    }

    /// Trapezoidal-integrated volume in acre-feet.
    pub fn volume_acft(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| {
                let dt_s = (w[1].time_hr - w[0].time_hr) * SECONDS_PER_HOUR;
                0.5 * (w[0].flow_cfs + w[1].flow_cfs) * dt_s / CUFT_PER_ACRE_FT
            })
            .sum()
    }
}
