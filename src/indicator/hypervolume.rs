//! Exact hypervolume by recursive slicing.
//!
//! The dominated region is cut into slabs along the last objective; each
//! slab's cross-section is the hypervolume of the points below it, projected
//! onto the remaining objectives.
//!
//! # Complexity
//!
//! O(n^(m-1) log n) for n points and m objectives. Fronts handled by the
//! credit definitions are small, so no WFG-style pruning is done.
//!
//! # References
//!
//! While, Hingston, Barone & Huband (2006), "A Faster Algorithm for
//! Calculating Hypervolume" (HSO)

use super::types::{Orientation, QualityIndicator};
use crate::error::{CreditError, Result};

/// Hypervolume dominated by a set, bounded by a reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypervolume {
    reference_point: Vec<f64>,
}

impl Hypervolume {
    /// Creates the indicator for a reference point (one coordinate per objective).
    pub fn new(reference_point: Vec<f64>) -> Result<Self> {
        if reference_point.is_empty() {
            return Err(CreditError::Configuration(
                "hypervolume reference point must not be empty".into(),
            ));
        }
        if reference_point.iter().any(|v| !v.is_finite()) {
            return Err(CreditError::Configuration(format!(
                "hypervolume reference point must be finite, got {reference_point:?}"
            )));
        }
        Ok(Self { reference_point })
    }

    pub fn reference_point(&self) -> &[f64] {
        &self.reference_point
    }
}

impl QualityIndicator for Hypervolume {
    fn name(&self) -> &str {
        "HV"
    }

    fn num_objectives(&self) -> usize {
        self.reference_point.len()
    }

    fn orientation(&self) -> Orientation {
        Orientation::Maximize
    }

    fn evaluate(&self, set: &[&[f64]]) -> f64 {
        let reference = &self.reference_point;
        let inside: Vec<&[f64]> = set
            .iter()
            .copied()
            .filter(|p| p.iter().zip(reference).all(|(&v, &r)| v < r))
            .collect();
        slice_volume(inside, reference)
    }
}

fn slice_volume(mut points: Vec<&[f64]>, reference: &[f64]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let m = reference.len();
    if m == 1 {
        let best = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
        return reference[0] - best;
    }

    let last = m - 1;
    points.sort_by(|a, b| a[last].total_cmp(&b[last]));

    let mut volume = 0.0;
    for i in 0..points.len() {
        let upper = points.get(i + 1).map_or(reference[last], |p| p[last]);
        let depth = upper - points[i][last];
        if depth <= 0.0 {
            continue;
        }
        let projected: Vec<&[f64]> = points[..=i].iter().map(|p| &p[..last]).collect();
        volume += depth * slice_volume(projected, &reference[..last]);
    }
    volume
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hv(reference: Vec<f64>, points: &[Vec<f64>]) -> f64 {
        let set: Vec<&[f64]> = points.iter().map(|p| p.as_slice()).collect();
        Hypervolume::new(reference).unwrap().evaluate(&set)
    }

    #[test]
    fn test_single_point_2d() {
        let v = hv(vec![2.0, 2.0], &[vec![1.0, 1.0]]);
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_staircase_2d() {
        // (0,1) and (1,0) with ref (2,2): 2*1 + 2*1 - 1*1 = 3
        let v = hv(vec![2.0, 2.0], &[vec![0.0, 1.0], vec![1.0, 0.0]]);
        assert!((v - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_dominated_point_adds_nothing() {
        let a = hv(vec![2.0, 2.0], &[vec![0.5, 0.5]]);
        let b = hv(vec![2.0, 2.0], &[vec![0.5, 0.5], vec![1.0, 1.0]]);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_three_objectives() {
        // Unit cube corner at origin with ref (1,1,1) plus a point that adds a slab.
        let v = hv(vec![1.0, 1.0, 1.0], &[vec![0.0, 0.0, 0.5]]);
        assert!((v - 0.5).abs() < 1e-12);

        let v = hv(
            vec![2.0, 2.0, 2.0],
            &[vec![1.0, 1.0, 1.0], vec![0.0, 1.5, 1.5]],
        );
        // box 1: 1*1*1 = 1; box 2: 2*0.5*0.5 = 0.5; overlap: 1*0.5*0.5 = 0.25
        assert!((v - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_points_outside_reference_ignored() {
        let v = hv(vec![2.0, 2.0], &[vec![3.0, 0.0], vec![2.0, 1.0]]);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_empty_set_is_zero() {
        assert_eq!(hv(vec![2.0, 2.0], &[]), 0.0);
    }

    #[test]
    fn test_rejects_bad_reference() {
        assert!(Hypervolume::new(Vec::new()).is_err());
        assert!(Hypervolume::new(vec![1.0, f64::NAN]).is_err());
    }
}
