//! Probability matching.

use super::types::{
    roulette_select, validate_heuristics, validate_min_probability, HeuristicSelector,
};
use crate::error::{CreditError, Result};
use crate::heuristic::HeuristicId;
use crate::repository::{CreditAggregation, CreditRepository};
use rand::Rng;

/// How credit estimates become matching scores.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scoring {
    /// `s_i = max(0, q_i)`.
    Proportional,
    /// `s_i = exp(q_i / temperature)`.
    Softmax { temperature: f64 },
}

/// Selection probability proportional to each heuristic's credit estimate,
/// with a floor so no heuristic is ever starved.
///
/// ```text
/// p_i = p_min + (1 - K * p_min) * s_i / sum(s)
/// ```
///
/// Probabilities are uniform until the first update, and whenever every
/// score is zero.
///
/// # References
///
/// Goldberg (1990), "Probability matching, the magnitude of reinforcement,
/// and classifier system bidding"
///
/// # Examples
///
/// ```
/// use u_hyperheur::heuristic::HeuristicId;
/// use u_hyperheur::repository::{CreditRepository, MeanAggregation};
/// use u_hyperheur::selector::{HeuristicSelector, ProbabilityMatching, Scoring};
///
/// let ids = [HeuristicId::new(0), HeuristicId::new(1)];
/// let mut pm = ProbabilityMatching::new(ids, 0.1, Scoring::Proportional).unwrap();
///
/// let repo = CreditRepository::new();
/// repo.record(ids[0], 1.0, 0).unwrap();
/// pm.update(&repo, &MeanAggregation);
///
/// let p = pm.probabilities();
/// assert!((p[0] - 0.9).abs() < 1e-12);
/// assert!((p[1] - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ProbabilityMatching {
    heuristics: Vec<HeuristicId>,
    probabilities: Vec<f64>,
    min_probability: f64,
    scoring: Scoring,
    iterations: usize,
}

impl ProbabilityMatching {
    /// # Errors
    ///
    /// [`CreditError::Configuration`] for an empty or repeated candidate set,
    /// `K * min_probability >= 1`, or a non-positive soft-max temperature.
    pub fn new(
        heuristics: impl IntoIterator<Item = HeuristicId>,
        min_probability: f64,
        scoring: Scoring,
    ) -> Result<Self> {
        let heuristics = validate_heuristics(heuristics)?;
        validate_min_probability(min_probability, heuristics.len())?;
        if let Scoring::Softmax { temperature } = scoring {
            if !(temperature > 0.0 && temperature.is_finite()) {
                return Err(CreditError::Configuration(format!(
                    "softmax temperature must be positive, got {temperature}"
                )));
            }
        }
        let k = heuristics.len();
        Ok(Self {
            heuristics,
            probabilities: vec![1.0 / k as f64; k],
            min_probability,
            scoring,
            iterations: 0,
        })
    }

    pub fn min_probability(&self) -> f64 {
        self.min_probability
    }

    pub fn scoring(&self) -> Scoring {
        self.scoring
    }

    fn scores(&self, estimates: &[f64]) -> Vec<f64> {
        match self.scoring {
            Scoring::Proportional => estimates.iter().map(|q| q.max(0.0)).collect(),
            Scoring::Softmax { temperature } => {
                let max = estimates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                estimates
                    .iter()
                    .map(|q| ((q - max) / temperature).exp())
                    .collect()
            }
        }
    }
}

impl HeuristicSelector for ProbabilityMatching {
    fn name(&self) -> &str {
        "ProbabilityMatching"
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
        let scores = self.scores(&estimates);
        let total: f64 = scores.iter().sum();
        let k = self.heuristics.len() as f64;

        if total > 0.0 && total.is_finite() {
            let spread = 1.0 - k * self.min_probability;
            for (p, s) in self.probabilities.iter_mut().zip(&scores) {
                *p = self.min_probability + spread * s / total;
            }
        } else {
            self.probabilities.fill(1.0 / k);
        }
        tracing::debug!(
            selector = self.name(),
            aggregation = aggregation.name(),
            probabilities = ?self.probabilities,
            "updated selection probabilities"
        );
    }

    fn iterations(&self) -> usize {
        self.iterations
    }

    fn probabilities(&self) -> Vec<f64> {
        self.probabilities.clone()
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
    fn test_uniform_before_update() {
        let pm = ProbabilityMatching::new(ids(4), 0.05, Scoring::Proportional).unwrap();
        assert_eq!(pm.probabilities(), vec![0.25; 4]);
    }

    #[test]
    fn test_proportional_update() {
        let h = ids(3);
        let mut pm = ProbabilityMatching::new(h.clone(), 0.1, Scoring::Proportional).unwrap();
        let repo = CreditRepository::new();
        repo.record(h[0], 3.0, 0).unwrap();
        repo.record(h[1], 1.0, 0).unwrap();
        repo.record(h[2], -5.0, 0).unwrap();
        pm.update(&repo, &MeanAggregation);

        let p = pm.probabilities();
        // spread 0.7 split 3:1:0
        assert!((p[0] - (0.1 + 0.7 * 0.75)).abs() < 1e-12);
        assert!((p[1] - (0.1 + 0.7 * 0.25)).abs() < 1e-12);
        assert!((p[2] - 0.1).abs() < 1e-12);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_scores_uniform() {
        let h = ids(2);
        let mut pm = ProbabilityMatching::new(h.clone(), 0.1, Scoring::Proportional).unwrap();
        let repo = CreditRepository::new();
        repo.record(h[0], -1.0, 0).unwrap();
        pm.update(&repo, &MeanAggregation);
        assert_eq!(pm.probabilities(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_softmax_update() {
        let h = ids(2);
        let mut pm =
            ProbabilityMatching::new(h.clone(), 0.0, Scoring::Softmax { temperature: 1.0 }).unwrap();
        let repo = CreditRepository::new();
        repo.record(h[0], 1.0, 0).unwrap();
        pm.update(&repo, &MeanAggregation);

        let e = std::f64::consts::E;
        let p = pm.probabilities();
        assert!((p[0] - e / (e + 1.0)).abs() < 1e-12);
        assert!((p[1] - 1.0 / (e + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_floor_is_respected_in_selection() {
        let h = ids(2);
        let mut pm = ProbabilityMatching::new(h.clone(), 0.2, Scoring::Proportional).unwrap();
        let repo = CreditRepository::new();
        repo.record(h[0], 1.0, 0).unwrap();
        pm.update(&repo, &MeanAggregation);

        let mut rng = create_rng(3);
        let draws = 5_000;
        let picked_second = (0..draws)
            .filter(|_| pm.next_heuristic(&mut rng) == h[1])
            .count();
        let freq = picked_second as f64 / draws as f64;
        assert!((freq - 0.2).abs() < 0.03, "frequency {freq}");
        assert_eq!(pm.iterations(), draws);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ProbabilityMatching::new(ids(4), 0.25, Scoring::Proportional).is_err());
        assert!(
            ProbabilityMatching::new(ids(2), 0.1, Scoring::Softmax { temperature: 0.0 }).is_err()
        );
    }
}
