//! R2 indicator and Tchebycheff scalarization.
//!
//! R2(A; W, z*) = (1/|W|) * sum over w in W of min over a in A of
//! max_i w_i * |a_i - z*_i|
//!
//! Weight vectors form a Das-Dennis simplex lattice.
//!
//! # References
//!
//! - Hansen & Jaszkiewicz (1998), "Evaluating the quality of approximations
//!   to the non-dominated set"
//! - Das & Dennis (1998), "Normal-Boundary Intersection"

use super::types::{Orientation, QualityIndicator};
use crate::error::{CreditError, Result};

/// Weights of exactly zero are lifted to this value so every objective counts.
const MIN_WEIGHT: f64 = 1e-6;

/// Weighted Tchebycheff distance of `objectives` from `ideal_point`.
///
/// Lower is better. Used both by the R2 indicator and by the
/// decomposition-based credit definitions.
///
/// ```
/// use u_hyperheur::indicator::tchebycheff;
///
/// let g = tchebycheff(&[0.4, 0.2], &[0.5, 0.5], &[0.0, 0.0]);
/// assert!((g - 0.2).abs() < 1e-12);
/// ```
pub fn tchebycheff(objectives: &[f64], weights: &[f64], ideal_point: &[f64]) -> f64 {
    objectives
        .iter()
        .zip(weights)
        .zip(ideal_point)
        .map(|((&f, &w), &z)| w.max(MIN_WEIGHT) * (f - z).abs())
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Generates a uniform simplex lattice of weight vectors.
///
/// Picks the largest number of divisions `H` such that the lattice
/// (C(H + m - 1, m - 1) vectors) does not exceed `requested`. The defaults of
/// 50 vectors for two objectives and 91 for three are exact lattices.
pub fn simplex_lattice(num_objectives: usize, requested: usize) -> Result<Vec<Vec<f64>>> {
    if num_objectives == 0 {
        return Err(CreditError::Configuration(
            "weight vectors need at least one objective".into(),
        ));
    }
    if requested == 0 {
        return Err(CreditError::Configuration(
            "number of reference vectors must be positive".into(),
        ));
    }
    if num_objectives == 1 {
        return Ok(vec![vec![1.0]]);
    }

    let mut divisions = 1usize;
    while lattice_size(num_objectives, divisions + 1) <= requested {
        divisions += 1;
    }
    if lattice_size(num_objectives, divisions) > requested {
        return Err(CreditError::Configuration(format!(
            "{requested} reference vectors cannot cover {num_objectives} objectives; \
             need at least {num_objectives}"
        )));
    }

    let mut weights = Vec::with_capacity(lattice_size(num_objectives, divisions));
    let mut current = Vec::with_capacity(num_objectives);
    fill_lattice(num_objectives, divisions, divisions, &mut current, &mut weights);

    if weights.len() != requested {
        tracing::warn!(
            requested,
            generated = weights.len(),
            divisions,
            "reference vector count is not a simplex lattice size; using the nearest smaller lattice"
        );
    }
    Ok(weights)
}

fn lattice_size(num_objectives: usize, divisions: usize) -> usize {
    // C(divisions + m - 1, m - 1)
    let k = num_objectives - 1;
    let mut size = 1usize;
    for i in 1..=k {
        size = size.saturating_mul(divisions + i) / i;
    }
    size
}

fn fill_lattice(
    remaining_objectives: usize,
    remaining: usize,
    divisions: usize,
    current: &mut Vec<f64>,
    out: &mut Vec<Vec<f64>>,
) {
    if remaining_objectives == 1 {
        current.push(remaining as f64 / divisions as f64);
        out.push(current.clone());
        current.pop();
        return;
    }
    for take in 0..=remaining {
        current.push(take as f64 / divisions as f64);
        fill_lattice(remaining_objectives - 1, remaining - take, divisions, current, out);
        current.pop();
    }
}

/// R2 indicator with a fixed set of weight vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct R2Indicator {
    ideal_point: Vec<f64>,
    reference_point: Vec<f64>,
    weights: Vec<Vec<f64>>,
}

impl R2Indicator {
    /// Builds the indicator and its weight vectors.
    ///
    /// `reference_point` only bounds the value of the empty set.
    pub fn new(
        ideal_point: Vec<f64>,
        reference_point: Vec<f64>,
        num_vectors: usize,
    ) -> Result<Self> {
        if ideal_point.len() != reference_point.len() {
            return Err(CreditError::Configuration(format!(
                "ideal point has {} objectives but reference point has {}",
                ideal_point.len(),
                reference_point.len()
            )));
        }
        if ideal_point.iter().chain(&reference_point).any(|v| !v.is_finite()) {
            return Err(CreditError::Configuration(
                "R2 ideal and reference points must be finite".into(),
            ));
        }
        let weights = simplex_lattice(ideal_point.len(), num_vectors)?;
        Ok(Self {
            ideal_point,
            reference_point,
            weights,
        })
    }

    pub fn ideal_point(&self) -> &[f64] {
        &self.ideal_point
    }

    pub fn reference_point(&self) -> &[f64] {
        &self.reference_point
    }

    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }
}

impl QualityIndicator for R2Indicator {
    fn name(&self) -> &str {
        "R2"
    }

    fn num_objectives(&self) -> usize {
        self.ideal_point.len()
    }

    fn orientation(&self) -> Orientation {
        Orientation::Minimize
    }

    fn evaluate(&self, set: &[&[f64]]) -> f64 {
        let fallback = [self.reference_point.as_slice()];
        let set = if set.is_empty() { &fallback[..] } else { set };

        let total: f64 = self
            .weights
            .iter()
            .map(|w| {
                set.iter()
                    .map(|a| tchebycheff(a, w, &self.ideal_point))
                    .fold(f64::INFINITY, f64::min)
            })
            .sum();
        total / self.weights.len() as f64
    }
}
