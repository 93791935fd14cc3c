//! Core trait for heuristic selectors.

use crate::error::{CreditError, Result};
use crate::heuristic::HeuristicId;
use crate::repository::{CreditAggregation, CreditRepository};
use rand::Rng;
use std::collections::HashSet;

/// Chooses which heuristic to apply next.
///
/// `next_heuristic` and `update` are meant to alternate: pick, apply the
/// heuristic, record its credit, then refresh the selector from the
/// repository. [`Controller`](crate::controller::Controller) enforces this.
///
/// # References
///
/// Fialho (2010), "Adaptive Operator Selection for Optimization", Chapter 4
pub trait HeuristicSelector: Send {
    /// Returns a human-readable name for this selector.
    fn name(&self) -> &str;

    /// Candidate heuristics, in the order used by [`probabilities`](Self::probabilities).
    fn heuristics(&self) -> &[HeuristicId];

    /// Picks the next heuristic. Never reads the repository.
    fn next_heuristic<R: Rng>(&mut self, rng: &mut R) -> HeuristicId;

    /// Recomputes internal state from the current credit estimates.
    fn update(&mut self, repository: &CreditRepository, aggregation: &dyn CreditAggregation);

    /// Number of `next_heuristic` calls so far.
    fn iterations(&self) -> usize;

    /// Current selection distribution, aligned with [`heuristics`](Self::heuristics).
    fn probabilities(&self) -> Vec<f64>;
}

/// Checks a candidate set: non-empty and without repeated ids.
pub(crate) fn validate_heuristics(
    heuristics: impl IntoIterator<Item = HeuristicId>,
) -> Result<Vec<HeuristicId>> {
    let heuristics: Vec<HeuristicId> = heuristics.into_iter().collect();
    if heuristics.is_empty() {
        return Err(CreditError::Configuration(
            "selector needs at least one heuristic".into(),
        ));
    }
    let mut seen = HashSet::with_capacity(heuristics.len());
    if let Some(dup) = heuristics.iter().find(|h| !seen.insert(**h)) {
        return Err(CreditError::Configuration(format!(
            "heuristic {dup} listed more than once"
        )));
    }
    Ok(heuristics)
}

/// Checks `0 <= p_min` and `K * p_min < 1`.
pub(crate) fn validate_min_probability(min_probability: f64, count: usize) -> Result<()> {
    if !(min_probability >= 0.0 && min_probability * (count as f64) < 1.0) {
        return Err(CreditError::Configuration(format!(
            "min_probability {min_probability} is invalid for {count} heuristics \
             (need 0 <= p_min and {count} * p_min < 1)"
        )));
    }
    Ok(())
}

/// Selects an index by roulette wheel on non-negative weights.
///
/// Falls back to index 0 when the weights carry no mass.
pub(crate) fn roulette_select<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) || weights.is_empty() {
        return 0;
    }

    let mut roll = rng.random_range(0.0..total);
    for (i, &w) in weights.iter().enumerate() {
        roll -= w;
        if roll <= 0.0 {
            return i;
        }
    }
    weights.len() - 1
}

/// Index of the largest value; the first one wins ties.
pub(crate) fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, best_v), (i, &v)| {
            if v > best_v {
                (i, v)
            } else {
                (best, best_v)
            }
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_numflow::random::create_rng;

    #[test]
    fn test_validate_heuristics() {
        assert!(validate_heuristics(Vec::new()).is_err());
        let dup = [HeuristicId::new(1), HeuristicId::new(1)];
        assert!(validate_heuristics(dup).is_err());
        let ok = validate_heuristics([HeuristicId::new(1), HeuristicId::new(0)]).unwrap();
        assert_eq!(ok, vec![HeuristicId::new(1), HeuristicId::new(0)]);
    }

    #[test]
    fn test_validate_min_probability() {
        assert!(validate_min_probability(0.0, 4).is_ok());
        assert!(validate_min_probability(0.2, 4).is_ok());
        assert!(validate_min_probability(0.25, 4).is_err());
        assert!(validate_min_probability(-0.1, 4).is_err());
        assert!(validate_min_probability(f64::NAN, 4).is_err());
    }

    #[test]
    fn test_roulette_respects_zero_weights() {
        let mut rng = create_rng(7);
        for _ in 0..1000 {
            let i = roulette_select(&[0.0, 1.0, 0.0], &mut rng);
            assert_eq!(i, 1);
        }
        assert_eq!(roulette_select(&[0.0, 0.0], &mut rng), 0);
    }

    #[test]
    fn test_argmax_first_wins_ties() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0]), 1);
        assert_eq!(argmax(&[-2.0, -1.0]), 1);
    }
}
