//! Uniform random selection.

use super::types::{validate_heuristics, HeuristicSelector};
use crate::error::Result;
use crate::heuristic::HeuristicId;
use crate::repository::{CreditAggregation, CreditRepository};
use rand::Rng;

/// Picks every heuristic with equal probability and ignores credits.
///
/// The baseline every adaptive selector is compared against.
#[derive(Debug, Clone)]
pub struct RandomSelect {
    heuristics: Vec<HeuristicId>,
    iterations: usize,
}

impl RandomSelect {
    pub fn new(heuristics: impl IntoIterator<Item = HeuristicId>) -> Result<Self> {
        Ok(Self {
            heuristics: validate_heuristics(heuristics)?,
            iterations: 0,
        })
    }
}

impl HeuristicSelector for RandomSelect {
    fn name(&self) -> &str {
        "RandomSelect"
    }

    fn heuristics(&self) -> &[HeuristicId] {
        &self.heuristics
    }

    fn next_heuristic<R: Rng>(&mut self, rng: &mut R) -> HeuristicId {
        self.iterations += 1;
        self.heuristics[rng.random_range(0..self.heuristics.len())]
    }

    fn update(&mut self, _repository: &CreditRepository, _aggregation: &dyn CreditAggregation) {}

    fn iterations(&self) -> usize {
        self.iterations
    }

    fn probabilities(&self) -> Vec<f64> {
        vec![1.0 / self.heuristics.len() as f64; self.heuristics.len()]
    }
}
