//! Adaptive pursuit.

use super::types::{
    argmax, roulette_select, validate_heuristics, validate_min_probability, HeuristicSelector,
};
use crate::error::{CreditError, Result};
use crate::heuristic::HeuristicId;
use crate::repository::{CreditAggregation, CreditRepository};
use rand::Rng;

/// Winner-takes-most probability update.
///
/// On every update the heuristic with the best estimate moves toward
/// `p_max = 1 - (K - 1) * p_min` and every other one toward `p_min`:
///
/// ```text
/// p_best += beta * (p_max - p_best)
/// p_i    += beta * (p_min - p_i)
/// ```
///
/// Probabilities keep summing to one and never fall below `p_min`.
///
/// # References
///
/// Thierens (2005), "An Adaptive Pursuit Strategy for Allocating Operator
/// Probabilities", GECCO
#[derive(Debug, Clone)]
pub struct AdaptivePursuit {
    heuristics: Vec<HeuristicId>,
    probabilities: Vec<f64>,
    min_probability: f64,
    learning_rate: f64,
    iterations: usize,
}

impl AdaptivePursuit {
    /// # Errors
    ///
    /// [`CreditError::Configuration`] for an empty or repeated candidate set,
    /// `K * min_probability >= 1`, or `learning_rate` outside (0, 1].
    pub fn new(
        heuristics: impl IntoIterator<Item = HeuristicId>,
        min_probability: f64,
        learning_rate: f64,
    ) -> Result<Self> {
        let heuristics = validate_heuristics(heuristics)?;
        validate_min_probability(min_probability, heuristics.len())?;
        if !(learning_rate > 0.0 && learning_rate <= 1.0) {
            return Err(CreditError::Configuration(format!(
                "learning_rate must be in (0, 1], got {learning_rate}"
            )));
        }
        let k = heuristics.len();
        Ok(Self {
            heuristics,
            probabilities: vec![1.0 / k as f64; k],
            min_probability,
            learning_rate,
            iterations: 0,
        })
    }

    pub fn min_probability(&self) -> f64 {
        self.min_probability
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn max_probability(&self) -> f64 {
        1.0 - (self.heuristics.len() - 1) as f64 * self.min_probability
    }
}

impl HeuristicSelector for AdaptivePursuit {
    fn name(&self) -> &str {
        "AdaptivePursuit"
    }

    fn heuristics(&self) -> &[HeuristicId] {
        &self.heuristics
    }

    fn next_heuristic<R: Rng>(&mut self, rng: &mut R) -> HeuristicId {
        self.iterations += 1;
        self.heuristics[roulette_select(&self.probabilities, rng)]
    }

    fn update(&mut self, repository: &CreditRepository, aggregation: &dyn CreditAggregation) {
        let estimates: Vec<f64> = self
            .heuristics
            .iter()
            .map(|&h| aggregation.aggregate(repository, h))
            .collect();
        let best = argmax(&estimates);
        let (p_min, p_max, beta) = (
            self.min_probability,
            self.max_probability(),
            self.learning_rate,
        );
        for (i, p) in self.probabilities.iter_mut().enumerate() {
            let target = if i == best { p_max } else { p_min };
            *p += beta * (target - *p);
        }
        tracing::debug!(
            selector = self.name(),
            best = %self.heuristics[best],
            probabilities = ?self.probabilities,
            "pursued best heuristic"
        );
    }

    fn iterations(&self) -> usize {
        self.iterations
    }

    fn probabilities(&self) -> Vec<f64> {
        self.probabilities.clone()
    }
}
