//! SCS synthetic 24-hour rainfall distributions.
//!
//! Each storm type is a fixed mass curve of (hour, cumulative fraction)
//! ordinates covering [0, 24], interpolated linearly in between.

use crate::error::{HydrologyError, HydrologyResult};
use serde::{Deserialize, Serialize};
use sl_core::interp_clamped;
use std::fmt;

/// SCS 24-hour design storm types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StormType {
    I,
    #[serde(rename = "IA")]
    Ia,
    II,
    III,
}

impl fmt::Display for StormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StormType::I => "I",
            StormType::Ia => "IA",
            StormType::II => "II",
            StormType::III => "III",
        };
        write!(f, "Type {label}")
    }
}

// Published SCS cumulative mass-curve ordinates. Every table starts at
// (0, 0), ends at (24, 1) and is monotone non-decreasing.
const TYPE_I: &[(f64, f64)] = &[
    (0.0, 0.000),
    (2.0, 0.035),
    (4.0, 0.076),
    (6.0, 0.125),
    (7.0, 0.156),
    (8.0, 0.194),
    (8.5, 0.219),
    (9.0, 0.254),
    (9.5, 0.303),
    (9.75, 0.362),
    (10.0, 0.515),
    (10.5, 0.583),
    (11.0, 0.624),
    (11.5, 0.654),
    (12.0, 0.682),
    (13.0, 0.727),
    (14.0, 0.767),
    (16.0, 0.830),
    (20.0, 0.926),
    (24.0, 1.000),
];

const TYPE_IA: &[(f64, f64)] = &[
    (0.0, 0.000),
    (2.0, 0.050),
    (4.0, 0.116),
    (6.0, 0.206),
    (7.0, 0.268),
    (7.5, 0.310),
    (8.0, 0.425),
    (8.5, 0.480),
    (9.0, 0.520),
    (9.5, 0.550),
    (10.0, 0.577),
    (10.5, 0.601),
    (11.0, 0.624),
    (11.5, 0.645),
    (12.0, 0.664),
    (13.0, 0.701),
    (14.0, 0.736),
    (16.0, 0.800),
    (20.0, 0.906),
    (24.0, 1.000),
];

const TYPE_II: &[(f64, f64)] = &[
    (0.0, 0.000),
    (2.0, 0.022),
    (4.0, 0.048),
    (6.0, 0.080),
    (7.0, 0.098),
    (8.0, 0.120),
    (8.5, 0.133),
    (9.0, 0.147),
    (9.5, 0.163),
    (9.75, 0.172),
    (10.0, 0.181),
    (10.5, 0.204),
    (11.0, 0.235),
    (11.5, 0.283),
    (11.75, 0.357),
    (12.0, 0.663),
    (12.5, 0.735),
    (13.0, 0.772),
    (13.5, 0.799),
    (14.0, 0.820),
    (16.0, 0.880),
    (20.0, 0.952),
    (24.0, 1.000),
];

const TYPE_III: &[(f64, f64)] = &[
    (0.0, 0.000),
    (2.0, 0.020),
    (4.0, 0.043),
    (6.0, 0.072),
    (7.0, 0.089),
    (8.0, 0.115),
    (8.5, 0.130),
    (9.0, 0.148),
    (9.5, 0.167),
    (9.75, 0.178),
    (10.0, 0.189),
    (10.5, 0.216),
    (11.0, 0.250),
    (11.5, 0.298),
    (11.75, 0.339),
    (12.0, 0.500),
    (12.5, 0.702),
    (13.0, 0.751),
    (13.5, 0.785),
    (14.0, 0.811),
    (16.0, 0.886),
    (20.0, 0.957),
    (24.0, 1.000),
];

impl StormType {
    /// The cumulative mass curve for this storm type.
    pub fn mass_curve(self) -> &'static [(f64, f64)] {
        match self {
            StormType::I => TYPE_I,
            StormType::Ia => TYPE_IA,
            StormType::II => TYPE_II,
            StormType::III => TYPE_III,
        }
    }

    pub const ALL: [StormType; 4] = [StormType::I, StormType::Ia, StormType::II, StormType::III];
}

/// Cumulative rainfall depth in inches at time `t_hr` for a storm of
/// `total_depth_in` total inches. Times outside [0, 24] clamp to the ends.
pub fn cumulative_depth(storm: StormType, total_depth_in: f64, t_hr: f64) -> f64 {
    total_depth_in * interp_clamped(storm.mass_curve(), t_hr)
}

/// Incremental rainfall depths on a uniform grid covering the 24-hour storm.
///
/// Returns (time, depth) pairs where the depth is the rainfall that fell in
/// the interval ending at that time. The final interval is truncated at the
/// 24-hour mass-curve end, so the increments sum to the total depth.
pub fn incremental_depths(
    storm: StormType,
    total_depth_in: f64,
    dt_hr: f64,
) -> HydrologyResult<Vec<(f64, f64)>> {
    if !dt_hr.is_finite() || dt_hr <= 0.0 {
        return Err(HydrologyError::NonPositiveTimestep { dt_hr });
    }

    let steps = (24.0 / dt_hr).ceil() as usize;
    let mut out = Vec::with_capacity(steps);
    let mut previous = 0.0;
    for k in 1..=steps {
        let t = k as f64 * dt_hr;
        let cumulative = cumulative_depth(storm, total_depth_in, t);
        out.push((t, (cumulative - previous).max(0.0)));
        previous = cumulative;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn mass_curves_are_well_formed() {
        for storm in StormType::ALL {
            let table = storm.mass_curve();
            let first = table.first().unwrap();
            let last = table.last().unwrap();
            assert_eq!(*first, (0.0, 0.0), "{storm}");
            assert_eq!(*last, (24.0, 1.0), "{storm}");
            sl_core::ensure_sorted_table(table, "storm mass curve")
                .unwrap_or_else(|e| panic!("{storm}: {e}"));
            for w in table.windows(2) {
                assert!(w[1].1 >= w[0].1, "{storm}: fractions must not decrease");
            }
        }
    }

    #[test]
    fn type_ii_midstorm_depth() {
        // 5.0 in Type II at hour 12: 5.0 * 0.663
        assert_abs_diff_eq!(
            cumulative_depth(StormType::II, 5.0, 12.0),
            3.315,
            epsilon = 0.01
        );
    }

    #[test]
    fn cumulative_clamps_outside_the_day() {
        assert_eq!(cumulative_depth(StormType::II, 2.0, -1.0), 0.0);
        assert_eq!(cumulative_depth(StormType::II, 2.0, 30.0), 2.0);
    }

    #[test]
    fn increments_sum_to_total() {
        for storm in StormType::ALL {
            for dt in [0.05, 0.1, 0.25, 0.7] {
                let incs = incremental_depths(storm, 3.2, dt).unwrap();
                let total: f64 = incs.iter().map(|(_, d)| d).sum();
                assert_relative_eq!(total, 3.2, max_relative = 1e-9);
                assert!(incs.iter().all(|(_, d)| *d >= 0.0));
                // the grid covers the whole storm
                assert!(incs.last().unwrap().0 >= 24.0);
            }
        }
    }

    #[test]
    fn increments_reject_bad_timestep() {
        assert_eq!(
            incremental_depths(StormType::I, 1.0, 0.0).unwrap_err(),
            HydrologyError::NonPositiveTimestep { dt_hr: 0.0 }
        );
        assert!(incremental_depths(StormType::I, 1.0, -0.5).is_err());
    }
}
