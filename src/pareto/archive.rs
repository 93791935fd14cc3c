//! Epsilon-box dominance archive.
//!
//! Objective space is divided into hyper-boxes of side `epsilon_i`. At most
//! one solution survives per box, and a box dominated by another occupied box
//! is never kept, which bounds the archive size for bounded objectives.
//!
//! # References
//!
//! Laumanns, Thiele, Deb & Zitzler (2002), "Combining Convergence and Diversity
//! in Evolutionary Multiobjective Optimization"

use super::dominance::{dominance, Dominance};
use super::types::ObjectiveVector;
use crate::error::{CreditError, Result};

/// Bounded secondary archive using epsilon-box dominance.
///
/// # Examples
///
/// ```
/// use u_hyperheur::pareto::EpsilonBoxArchive;
///
/// let mut archive = EpsilonBoxArchive::uniform(0.5, 2).unwrap();
/// assert!(archive.add(vec![0.1, 0.9]));
/// // Same box (0, 1) and dominates the occupant: replaces it.
/// assert!(archive.add(vec![0.05, 0.55]));
/// assert_eq!(archive.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EpsilonBoxArchive<S> {
    epsilons: Vec<f64>,
    members: Vec<S>,
}

impl<S: ObjectiveVector> EpsilonBoxArchive<S> {
    /// Creates an archive with one epsilon per objective.
    pub fn new(epsilons: Vec<f64>) -> Result<Self> {
        if epsilons.is_empty() {
            return Err(CreditError::Configuration(
                "epsilon archive needs at least one objective".into(),
            ));
        }
        if let Some(bad) = epsilons.iter().find(|&&e| !(e > 0.0 && e.is_finite())) {
            return Err(CreditError::Configuration(format!(
                "archive epsilons must be positive and finite, got {bad}"
            )));
        }
        Ok(Self {
            epsilons,
            members: Vec::new(),
        })
    }

    /// Creates an archive with the same epsilon for every objective.
    pub fn uniform(epsilon: f64, num_objectives: usize) -> Result<Self> {
        Self::new(vec![epsilon; num_objectives])
    }

    pub fn epsilons(&self) -> &[f64] {
        &self.epsilons
    }

    fn box_index(&self, objectives: &[f64]) -> Vec<f64> {
        objectives
            .iter()
            .zip(&self.epsilons)
            .map(|(&f, &e)| (f / e).floor())
            .collect()
    }

    fn corner_distance(&self, objectives: &[f64], index: &[f64]) -> f64 {
        objectives
            .iter()
            .zip(index)
            .zip(&self.epsilons)
            .map(|((&f, &b), &e)| {
                let d = f - b * e;
                d * d
            })
            .sum()
    }

    /// Attempts to insert a solution. Returns `true` if it was accepted.
    pub fn add(&mut self, solution: S) -> bool {
        let candidate = solution.objectives();
        let candidate_box = self.box_index(candidate);
        let mut evicted = vec![false; self.members.len()];

        for (i, member) in self.members.iter().enumerate() {
            let member_objs = member.objectives();
            let member_box = self.box_index(member_objs);
            match dominance(&member_box, &candidate_box) {
                Dominance::Left => return false,
                Dominance::Right => evicted[i] = true,
                Dominance::Neither if member_box == candidate_box => {
                    match dominance(member_objs, candidate) {
                        Dominance::Left => return false,
                        Dominance::Right => evicted[i] = true,
                        Dominance::Neither => {
                            let kept = self.corner_distance(member_objs, &member_box);
                            let new = self.corner_distance(candidate, &candidate_box);
                            if new < kept {
                                evicted[i] = true;
                            } else {
                                return false;
                            }
                        }
                    }
                }
                Dominance::Neither => {}
            }
        }

        let mut flags = evicted.into_iter();
        self.members.retain(|_| !flags.next().unwrap_or(false));
        self.members.push(solution);
        true
    }

    /// Returns `true` if a member has exactly these objective values.
    pub fn contains(&self, objectives: &[f64]) -> bool {
        self.members.iter().any(|m| m.objectives() == objectives)
    }

    pub fn members(&self) -> &[S] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_epsilon() {
        assert!(EpsilonBoxArchive::<Vec<f64>>::new(vec![0.1, 0.0]).is_err());
        assert!(EpsilonBoxArchive::<Vec<f64>>::new(Vec::new()).is_err());
    }

    #[test]
    fn test_box_dominated_candidate_rejected() {
        let mut archive = EpsilonBoxArchive::uniform(1.0, 2).unwrap();
        assert!(archive.add(vec![0.5, 0.5]));
        assert!(!archive.add(vec![1.5, 1.2]));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_box_dominating_candidate_evicts() {
        let mut archive = EpsilonBoxArchive::uniform(1.0, 2).unwrap();
        assert!(archive.add(vec![2.5, 0.5]));
        assert!(archive.add(vec![0.5, 2.5]));
        assert!(archive.add(vec![0.5, 0.5]));
        assert_eq!(archive.len(), 1);
        assert!(archive.contains(&[0.5, 0.5]));
    }

    #[test]
    fn test_same_box_keeps_one() {
        let mut archive = EpsilonBoxArchive::uniform(1.0, 2).unwrap();
        assert!(archive.add(vec![0.2, 0.8]));
        // Same box, non-dominated, farther from the corner.
        assert!(!archive.add(vec![0.9, 0.1]));
        // Same box, dominates occupant.
        assert!(archive.add(vec![0.1, 0.7]));
        assert_eq!(archive.len(), 1);
        assert!(archive.contains(&[0.1, 0.7]));
    }

    #[test]
    fn test_non_dominated_boxes_coexist() {
        let mut archive = EpsilonBoxArchive::uniform(0.5, 2).unwrap();
        assert!(archive.add(vec![0.1, 2.1]));
        assert!(archive.add(vec![1.1, 1.1]));
        assert!(archive.add(vec![2.1, 0.1]));
        assert_eq!(archive.len(), 3);
    }
}
