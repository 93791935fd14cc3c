//! Non-dominated front container.

use super::dominance::{dominates, non_dominated_sort, weakly_dominates};
use super::types::ObjectiveVector;

/// An unbounded set of mutually non-dominated solutions.
///
/// Adding a solution removes every member it dominates; a solution that is
/// weakly dominated by a member (including an exact duplicate) is rejected.
///
/// # Examples
///
/// ```
/// use u_hyperheur::pareto::ParetoFront;
///
/// let mut front = ParetoFront::new();
/// assert!(front.add(vec![1.0, 3.0]));
/// assert!(front.add(vec![3.0, 1.0]));
/// assert!(!front.add(vec![4.0, 4.0])); // dominated
/// assert!(front.add(vec![0.5, 0.5]));  // dominates both members
/// assert_eq!(front.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ParetoFront<S> {
    members: Vec<S>,
}

impl<S> Default for ParetoFront<S> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<S: ObjectiveVector> ParetoFront<S> {
    /// Creates an empty front.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the front (rank 0) of a population.
    ///
    /// Duplicate objective vectors are kept once.
    pub fn from_population(population: &[S]) -> Self
    where
        S: Clone,
    {
        let objectives: Vec<&[f64]> = population.iter().map(|s| s.objectives()).collect();
        let sorted = non_dominated_sort(&objectives);
        let mut front = Self::new();
        if let Some(first) = sorted.fronts.first() {
            for &i in first {
                front.add(population[i].clone());
            }
        }
        front
    }

    /// Attempts to insert a solution. Returns `true` if it was accepted.
    pub fn add(&mut self, solution: S) -> bool {
        let candidate = solution.objectives();
        if self
            .members
            .iter()
            .any(|m| weakly_dominates(m.objectives(), candidate))
        {
            return false;
        }
        self.members
            .retain(|m| !dominates(candidate, m.objectives()));
        self.members.push(solution);
        true
    }

    /// Returns `true` if a member has exactly these objective values.
    pub fn contains(&self, objectives: &[f64]) -> bool {
        self.members.iter().any(|m| m.objectives() == objectives)
    }

    /// Members in insertion order.
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
