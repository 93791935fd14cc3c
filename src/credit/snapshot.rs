//! Read-only population state handed to credit definitions.

use crate::error::{CreditError, Result};
use crate::pareto::{non_dominated_sort, ObjectiveVector};

/// Which solution set a population-level credit is measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceSet {
    /// The current non-dominated front.
    ParetoFront,
    /// The secondary bounded archive.
    Archive,
}

impl ReferenceSet {
    /// Suffix used in credit definition names (`PF` / `A`).
    pub fn suffix(self) -> &'static str {
        match self {
            ReferenceSet::ParetoFront => "PF",
            ReferenceSet::Archive => "A",
        }
    }
}

/// Before or after the offspring were inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Before,
    After,
}

/// Decomposition view around the parent's subproblem.
///
/// `weights[j]` is the weight vector of neighbour subproblem `j` and
/// `incumbents[j]` its current solution, before the offspring is inserted.
#[derive(Debug)]
pub struct Neighborhood<'a, S> {
    /// Ideal point used by the Tchebycheff scalarization.
    pub ideal_point: &'a [f64],
    /// Weight vector of the subproblem the parent was drawn from.
    pub home_weights: &'a [f64],
    /// Weight vectors of the neighbouring subproblems.
    pub weights: &'a [Vec<f64>],
    /// Current solution of each neighbouring subproblem.
    pub incumbents: &'a [S],
}

impl<S> Clone for Neighborhood<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Neighborhood<'_, S> {}

impl<'a, S> Neighborhood<'a, S> {
    pub fn new(
        ideal_point: &'a [f64],
        home_weights: &'a [f64],
        weights: &'a [Vec<f64>],
        incumbents: &'a [S],
    ) -> Self {
        Self {
            ideal_point,
            home_weights,
            weights,
            incumbents,
        }
    }
}

/// Immutable snapshot of population state around one heuristic application.
///
/// Each credit definition reads only the parts it needs and fails with
/// [`CreditError::InvalidSnapshot`] when one of them is missing. A front that
/// was not supplied is derived from the population of the same stage.
///
/// # Examples
///
/// ```
/// use u_hyperheur::credit::PopulationSnapshot;
///
/// let parents = vec![vec![1.0, 1.0]];
/// let offspring = vec![vec![0.5, 0.9]];
/// let snapshot = PopulationSnapshot::new()
///     .with_parents(&parents)
///     .with_offspring(&offspring);
/// assert_eq!(snapshot.offspring().unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct PopulationSnapshot<'a, S> {
    parents: Option<&'a [S]>,
    offspring: Option<&'a [S]>,
    population_before: Option<&'a [S]>,
    population_after: Option<&'a [S]>,
    front_before: Option<&'a [S]>,
    front_after: Option<&'a [S]>,
    archive_before: Option<&'a [S]>,
    archive_after: Option<&'a [S]>,
    neighborhood: Option<Neighborhood<'a, S>>,
}

impl<S> Default for PopulationSnapshot<'_, S> {
    fn default() -> Self {
        Self {
            parents: None,
            offspring: None,
            population_before: None,
            population_after: None,
            front_before: None,
            front_after: None,
            archive_before: None,
            archive_after: None,
            neighborhood: None,
        }
    }
}

impl<'a, S: ObjectiveVector> PopulationSnapshot<'a, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parents(mut self, parents: &'a [S]) -> Self {
        self.parents = Some(parents);
        self
    }

    pub fn with_offspring(mut self, offspring: &'a [S]) -> Self {
        self.offspring = Some(offspring);
        self
    }

    pub fn with_population(mut self, before: &'a [S], after: &'a [S]) -> Self {
        self.population_before = Some(before);
        self.population_after = Some(after);
        self
    }

    pub fn with_front(mut self, before: &'a [S], after: &'a [S]) -> Self {
        self.front_before = Some(before);
        self.front_after = Some(after);
        self
    }

    pub fn with_archive(mut self, before: &'a [S], after: &'a [S]) -> Self {
        self.archive_before = Some(before);
        self.archive_after = Some(after);
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood<'a, S>) -> Self {
        self.neighborhood = Some(neighborhood);
        self
    }

    /// Parents of the offspring; at least one is required.
    pub fn parents(&self) -> Result<&'a [S]> {
        non_empty("parents", self.parents)
    }

    /// Offspring produced by the heuristic; at least one is required.
    pub fn offspring(&self) -> Result<&'a [S]> {
        non_empty("offspring", self.offspring)
    }

    /// Decomposition view, checked for consistent lengths and for every
    /// weight vector and solution matching the ideal point's dimension.
    pub fn neighborhood(&self) -> Result<&Neighborhood<'a, S>> {
        let hood = self.neighborhood.as_ref().ok_or_else(|| {
            CreditError::InvalidSnapshot("snapshot carries no neighborhood".into())
        })?;
        if hood.weights.len() != hood.incumbents.len() {
            return Err(CreditError::InvalidSnapshot(format!(
                "neighborhood has {} weight vectors but {} incumbents",
                hood.weights.len(),
                hood.incumbents.len()
            )));
        }
        let m = hood.ideal_point.len();
        let mut weights =
            std::iter::once(hood.home_weights).chain(hood.weights.iter().map(Vec::as_slice));
        if let Some(w) = weights.find(|w| w.len() != m) {
            return Err(CreditError::InvalidSnapshot(format!(
                "neighborhood weight vector has {} components, ideal point has {m}",
                w.len()
            )));
        }
        let mut solutions = hood
            .incumbents
            .iter()
            .chain(self.parents.unwrap_or_default())
            .chain(self.offspring.unwrap_or_default());
        if let Some(s) = solutions.find(|s| s.objectives().len() != m) {
            return Err(CreditError::InvalidSnapshot(format!(
                "solution has {} objectives, neighborhood has {m}",
                s.objectives().len()
            )));
        }
        Ok(hood)
    }

    /// Objective vectors of the front or archive at `stage`.
    ///
    /// A missing front is derived from the population at the same stage by
    /// non-dominated sorting. Archives cannot be derived.
    pub fn set(&self, set: ReferenceSet, stage: Stage) -> Result<Vec<&'a [f64]>> {
        let explicit = match (set, stage) {
            (ReferenceSet::ParetoFront, Stage::Before) => self.front_before,
            (ReferenceSet::ParetoFront, Stage::After) => self.front_after,
            (ReferenceSet::Archive, Stage::Before) => self.archive_before,
            (ReferenceSet::Archive, Stage::After) => self.archive_after,
        };
        if let Some(members) = explicit {
            return Ok(members.iter().map(|s| s.objectives()).collect());
        }

        let population = match stage {
            Stage::Before => self.population_before,
            Stage::After => self.population_after,
        };
        match (set, population) {
            (ReferenceSet::ParetoFront, Some(population)) => {
                let objectives: Vec<&'a [f64]> =
                    population.iter().map(|s| s.objectives()).collect();
                let sorted = non_dominated_sort(&objectives);
                Ok(sorted
                    .fronts
                    .first()
                    .map(|front| front.iter().map(|&i| objectives[i]).collect())
                    .unwrap_or_default())
            }
            _ => Err(CreditError::InvalidSnapshot(format!(
                "snapshot carries no {set:?} for stage {stage:?}"
            ))),
        }
    }
}

fn non_empty<'a, S>(what: &str, items: Option<&'a [S]>) -> Result<&'a [S]> {
    match items {
        Some(items) if !items.is_empty() => Ok(items),
        Some(_) => Err(CreditError::InvalidSnapshot(format!("{what} are empty"))),
        None => Err(CreditError::InvalidSnapshot(format!(
            "snapshot carries no {what}"
        ))),
    }
}
