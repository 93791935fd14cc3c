//! Upper confidence bound bandit.

use super::types::{argmax, validate_heuristics, HeuristicSelector};
use crate::error::{CreditError, Result};
use crate::heuristic::HeuristicId;
use crate::repository::{CreditAggregation, CreditRepository};
use rand::Rng;

/// Deterministic bandit selection (UCB1).
///
/// Heuristics without any recorded credit are tried first, in candidate
/// order. After that:
///
/// ```text
/// argmax  q_i + c * sqrt(2 ln N / n_i)
/// ```
///
/// where `n_i` is the length of heuristic `i`'s history and `N` the sum
/// over all candidates.
///
/// # References
///
/// Auer, Cesa-Bianchi & Fischer (2002), "Finite-time Analysis of the
/// Multiarmed Bandit Problem", Machine Learning 47
#[derive(Debug, Clone)]
pub struct UpperConfidenceBound {
    heuristics: Vec<HeuristicId>,
    exploration: f64,
    chosen: usize,
    iterations: usize,
}

impl UpperConfidenceBound {
    /// # Errors
    ///
    /// [`CreditError::Configuration`] for an empty or repeated candidate set
    /// or a negative exploration factor.
    pub fn new(heuristics: impl IntoIterator<Item = HeuristicId>, exploration: f64) -> Result<Self> {
        let heuristics = validate_heuristics(heuristics)?;
        if !(exploration >= 0.0 && exploration.is_finite()) {
            return Err(CreditError::Configuration(format!(
                "exploration must be non-negative, got {exploration}"
            )));
        }
        Ok(Self {
            heuristics,
            exploration,
            chosen: 0,
            iterations: 0,
        })
    }

    pub fn exploration(&self) -> f64 {
        self.exploration
    }
}

impl HeuristicSelector for UpperConfidenceBound {
    fn name(&self) -> &str {
        "UpperConfidenceBound"
    }

    fn heuristics(&self) -> &[HeuristicId] {
        &self.heuristics
    }

    fn next_heuristic<R: Rng>(&mut self, _rng: &mut R) -> HeuristicId {
        self.iterations += 1;
        self.heuristics[self.chosen]
    }

    fn update(&mut self, repository: &CreditRepository, aggregation: &dyn CreditAggregation) {
        let pulls: Vec<usize> = self
            .heuristics
            .iter()
            .map(|&h| repository.history(h).len())
            .collect();

        if let Some(untried) = pulls.iter().position(|&n| n == 0) {
            self.chosen = untried;
        } else {
            let total = pulls.iter().sum::<usize>() as f64;
            let bounds: Vec<f64> = self
                .heuristics
                .iter()
                .zip(&pulls)
                .map(|(&h, &n)| {
                    aggregation.aggregate(repository, h)
                        + self.exploration * (2.0 * total.ln() / n as f64).sqrt()
                })
                .collect();
            self.chosen = argmax(&bounds);
        }
        tracing::debug!(
            selector = self.name(),
            next = %self.heuristics[self.chosen],
            "selected by upper confidence bound"
        );
    }

    fn iterations(&self) -> usize {
        self.iterations
    }

    /// One-hot on the heuristic the next call will return.
    fn probabilities(&self) -> Vec<f64> {
        let mut p = vec![0.0; self.heuristics.len()];
        p[self.chosen] = 1.0;
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MeanAggregation;
    use u_numflow::random::create_rng;

    fn ids(k: usize) -> Vec<HeuristicId> {
        (0..k).map(HeuristicId::new).collect()
    }

    #[test]
    fn test_tries_every_heuristic_first() {
        let h = ids(3);
        let mut ucb = UpperConfidenceBound::new(h.clone(), 1.0).unwrap();
        let repo = CreditRepository::new();
        let mut rng = create_rng(0);

        let mut order = Vec::new();
        for gen in 0..3 {
            let pick = ucb.next_heuristic(&mut rng);
            order.push(pick);
            repo.record(pick, 0.0, gen).unwrap();
            ucb.update(&repo, &MeanAggregation);
        }
        assert_eq!(order, h);
    }

    #[test]
    fn test_exploits_without_exploration() {
        let h = ids(2);
        let mut ucb = UpperConfidenceBound::new(h.clone(), 0.0).unwrap();
        let repo = CreditRepository::new();
        repo.record(h[0], 0.2, 0).unwrap();
        repo.record(h[1], 0.8, 1).unwrap();
        ucb.update(&repo, &MeanAggregation);
        assert_eq!(ucb.next_heuristic(&mut create_rng(0)), h[1]);
        assert_eq!(ucb.probabilities(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_bonus_favours_rarely_tried() {
        let h = ids(2);
        let mut ucb = UpperConfidenceBound::new(h.clone(), 1.0).unwrap();
        let repo = CreditRepository::new();
        for gen in 0..50 {
            repo.record(h[0], 0.5, gen).unwrap();
        }
        repo.record(h[1], 0.4, 50).unwrap();
        ucb.update(&repo, &MeanAggregation);
        // 0.4 + sqrt(2 ln 51) dwarfs 0.5 + sqrt(2 ln 51 / 50)
        assert_eq!(ucb.next_heuristic(&mut create_rng(0)), h[1]);
    }

    #[test]
    fn test_invalid_exploration() {
        assert!(UpperConfidenceBound::new(ids(2), -1.0).is_err());
        assert!(UpperConfidenceBound::new(ids(2), f64::INFINITY).is_err());
    }
}
