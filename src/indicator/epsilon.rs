//! Additive epsilon indicator.
//!
//! The binary form `I(A, B) = max over b in B of min over a in A of
//! max_i (a_i - b_i)` is the smallest shift that lets `A` weakly dominate
//! every point of `B`. The gain from `before` to `after` is
//! `I(before, after)`: how far the old set trails the new one.
//!
//! # References
//!
//! Zitzler, Thiele, Laumanns, Fonseca & da Fonseca (2003), "Performance
//! Assessment of Multiobjective Optimizers: An Analysis and Review"

use super::types::{Orientation, QualityIndicator};
use crate::error::{CreditError, Result};

/// Binary additive epsilon of `a` relative to `b`.
///
/// Zero or less when `a` already weakly dominates every point of `b`.
///
/// ```
/// use u_hyperheur::indicator::additive_epsilon;
///
/// let parent: &[f64] = &[0.5, 0.9];
/// let child: &[f64] = &[0.1, 0.9];
/// assert!((additive_epsilon(&[parent], &[child]) - 0.4).abs() < 1e-12);
/// assert!(additive_epsilon(&[child], &[parent]) <= 0.0);
/// ```
pub fn additive_epsilon(a: &[&[f64]], b: &[&[f64]]) -> f64 {
    b.iter()
        .map(|target| {
            a.iter()
                .map(|source| {
                    source
                        .iter()
                        .zip(target.iter())
                        .map(|(&s, &t)| s - t)
                        .fold(f64::NEG_INFINITY, f64::max)
                })
                .fold(f64::INFINITY, f64::min)
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Additive epsilon indicator over sets of objective vectors.
///
/// The unary value of a set is its epsilon relative to the reference point;
/// credits use the binary comparison through [`QualityIndicator::gain`].
#[derive(Debug, Clone, PartialEq)]
pub struct AdditiveEpsilon {
    reference_point: Vec<f64>,
}

impl AdditiveEpsilon {
    /// Creates the indicator. An empty set is treated as `{reference_point}`.
    pub fn new(reference_point: Vec<f64>) -> Result<Self> {
        if reference_point.is_empty() {
            return Err(CreditError::Configuration(
                "additive epsilon needs at least one objective".into(),
            ));
        }
        if reference_point.iter().any(|v| !v.is_finite()) {
            return Err(CreditError::Configuration(
                "additive epsilon reference point must be finite".into(),
            ));
        }
        Ok(Self { reference_point })
    }

    pub fn reference_point(&self) -> &[f64] {
        &self.reference_point
    }

    fn or_reference<'s>(&'s self, set: &[&'s [f64]]) -> Vec<&'s [f64]> {
        if set.is_empty() {
            vec![self.reference_point.as_slice()]
        } else {
            set.to_vec()
        }
    }
}

impl QualityIndicator for AdditiveEpsilon {
    fn name(&self) -> &str {
        "AE"
    }

    fn num_objectives(&self) -> usize {
        self.reference_point.len()
    }

    fn orientation(&self) -> Orientation {
        Orientation::Minimize
    }

    fn evaluate(&self, set: &[&[f64]]) -> f64 {
        let set = self.or_reference(set);
        additive_epsilon(&set, &[self.reference_point.as_slice()])
    }

    fn gain(&self, before: &[&[f64]], after: &[&[f64]]) -> f64 {
        additive_epsilon(&self.or_reference(before), &self.or_reference(after))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator() -> AdditiveEpsilon {
        AdditiveEpsilon::new(vec![2.0, 2.0]).unwrap()
    }

    #[test]
    fn test_binary_epsilon() {
        // (0.1, 0.9) dominates (0.5, 0.9); the parent must shift by 0.4.
        let v = additive_epsilon(&[&[0.5, 0.9]], &[&[0.1, 0.9]]);
        assert!((v - 0.4).abs() < 1e-12);
        // Identical sets need no shift.
        assert_eq!(additive_epsilon(&[&[0.3, 0.7]], &[&[0.3, 0.7]]), 0.0);
    }

    #[test]
    fn test_gain_on_dominating_offspring() {
        let ind = indicator();
        let parent: &[f64] = &[0.5, 0.9];
        let child: &[f64] = &[0.1, 0.9];
        let gain = ind.gain(&[parent], &[parent, child]);
        assert!((gain - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_gain_zero_for_weakly_dominated_addition() {
        let ind = indicator();
        let member: &[f64] = &[0.2, 0.2];
        let worse: &[f64] = &[0.6, 0.3];
        assert_eq!(ind.gain(&[member], &[member, worse]), 0.0);
        assert_eq!(ind.gain(&[member], &[member, member]), 0.0);
    }

    #[test]
    fn test_gain_when_every_member_improves() {
        let ind = indicator();
        let before: Vec<&[f64]> = vec![&[0.5, 0.9], &[1.5, 0.95]];
        let after: Vec<&[f64]> = vec![&[0.1, 0.9], &[0.2, 0.95]];
        assert!((ind.gain(&before, &after) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_empty_set_uses_reference() {
        let ind = indicator();
        assert_eq!(ind.evaluate(&[]), 0.0);
        assert!((ind.gain(&[], &[&[1.0, 1.5]]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_reference() {
        assert!(AdditiveEpsilon::new(Vec::new()).is_err());
        assert!(AdditiveEpsilon::new(vec![1.0, f64::NAN]).is_err());
    }
}
