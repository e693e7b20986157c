//! Hydrograph summation on the union of sample grids.

use crate::series::{HydroPoint, Hydrograph};

/// Sum a list of hydrographs.
///
/// The output is sampled on the sorted, deduplicated union of all input
/// sample times; at each time the linearly interpolated value of every input
/// is added ([`Hydrograph::flow_at`] semantics). Empty inputs contribute
/// nothing; an empty list yields an empty hydrograph.
pub fn sum(inputs: &[&Hydrograph]) -> Hydrograph {
    let mut times: Vec<f64> = inputs
        .iter()
        .flat_map(|h| h.points().iter().map(|p| p.time_hr))
        .collect();
    if times.is_empty() {
        return Hydrograph::empty();
    }
    times.sort_by(|a, b| a.partial_cmp(b).expect("sample times are finite"));
    times.dedup();

    let points = times
        .into_iter()
        .map(|t| HydroPoint {
            time_hr: t,
            flow_cfs: inputs.iter().map(|h| h.flow_at(t)).sum(),
        })
        .collect();

    Hydrograph::from_sorted_unchecked(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sum_of_nothing_is_empty() {
        assert!(sum(&[]).is_empty());
        assert!(sum(&[&Hydrograph::empty(), &Hydrograph::empty()]).is_empty());
    }

    #[test]
    fn sum_single_is_identity() {
        let h = Hydrograph::from_uniform(0.0, 0.5, &[0.0, 4.0, 1.0]).unwrap();
        assert_eq!(sum(&[&h]), h);
    }

    #[test]
    fn sum_unions_mismatched_grids() {
        let a = Hydrograph::from_uniform(0.0, 1.0, &[0.0, 10.0, 0.0]).unwrap();
        let b = Hydrograph::from_uniform(0.5, 1.0, &[0.0, 6.0, 0.0]).unwrap();
        let s = sum(&[&a, &b]);

        // union grid: 0, 0.5, 1, 1.5, 2, 2.5
        let times: Vec<f64> = s.points().iter().map(|p| p.time_hr).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5]);

        // at t=1.0: a peaks at 10, b is halfway up its triangle (3)
        assert_relative_eq!(s.flow_at(1.0), 13.0);
        // at t=0.5: a halfway up (5), b starting (0)
        assert_relative_eq!(s.flow_at(0.5), 5.0);
    }

    #[test]
    fn sum_preserves_volume() {
        // Both inputs are piecewise linear, so resampling on the union grid
        // is exact and volume adds.
        let a = Hydrograph::from_uniform(0.0, 0.25, &[0.0, 2.0, 8.0, 3.0, 0.0]).unwrap();
        let b = Hydrograph::from_uniform(0.1, 0.3, &[0.0, 5.0, 1.0, 0.0]).unwrap();
        let s = sum(&[&a, &b]);
        assert_relative_eq!(
            s.volume_acft(),
            a.volume_acft() + b.volume_acft(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn sum_with_empty_input_is_identity() {
        let a = Hydrograph::from_uniform(0.0, 1.0, &[1.0, 2.0]).unwrap();
        let s = sum(&[&a, &Hydrograph::empty()]);
        assert_eq!(s, a);
    }
}
