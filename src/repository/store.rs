//! Append-only store of credit observations.

use crate::error::{CreditError, Result};
use crate::heuristic::HeuristicId;
use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

/// One credit earned by one heuristic application.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreditObservation {
    pub heuristic: HeuristicId,
    pub value: f64,
    pub generation: usize,
}

/// Owned copy of one heuristic's observations, in insertion order.
///
/// Taken under a single read lock, so `latest_generation` is the repository
/// clock at the moment the history was copied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    observations: Vec<CreditObservation>,
    latest_generation: Option<usize>,
}

impl History {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CreditObservation> {
        self.observations.iter()
    }

    pub fn as_slice(&self) -> &[CreditObservation] {
        &self.observations
    }

    /// Credit values only.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.value)
    }

    pub fn last(&self) -> Option<&CreditObservation> {
        self.observations.last()
    }

    /// Latest generation recorded for any heuristic when this copy was taken.
    pub fn latest_generation(&self) -> Option<usize> {
        self.latest_generation
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a CreditObservation;
    type IntoIter = std::slice::Iter<'a, CreditObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

impl IntoIterator for History {
    type Item = CreditObservation;
    type IntoIter = std::vec::IntoIter<CreditObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.into_iter()
    }
}

#[derive(Debug, Default)]
struct Inner {
    histories: HashMap<HeuristicId, Vec<CreditObservation>>,
    total: usize,
    latest_generation: Option<usize>,
}

/// Credit history per heuristic.
///
/// `record` takes `&self`; concurrent writers never lose or duplicate an
/// observation. Readers receive owned copies of a consistent prefix.
///
/// # Examples
///
/// ```
/// use u_hyperheur::heuristic::HeuristicId;
/// use u_hyperheur::repository::CreditRepository;
///
/// let repo = CreditRepository::new();
/// let h = HeuristicId::new(0);
/// repo.record(h, 0.5, 1).unwrap();
/// repo.record(h, 1.0, 2).unwrap();
///
/// let values: Vec<f64> = repo.history(h).values().collect();
/// assert_eq!(values, vec![0.5, 1.0]);
/// assert!(repo.history(HeuristicId::new(7)).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CreditRepository {
    inner: RwLock<Inner>,
}

impl CreditRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one observation.
    ///
    /// # Errors
    ///
    /// [`CreditError::InvalidSnapshot`] if `value` is not finite; nothing is
    /// recorded in that case.
    pub fn record(&self, heuristic: HeuristicId, value: f64, generation: usize) -> Result<()> {
        if !value.is_finite() {
            return Err(CreditError::InvalidSnapshot(format!(
                "credit for {heuristic} must be finite, got {value}"
            )));
        }
        // Observations are pushed whole, so a poisoned lock still holds a
        // consistent store.
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .histories
            .entry(heuristic)
            .or_default()
            .push(CreditObservation {
                heuristic,
                value,
                generation,
            });
        inner.total += 1;
        inner.latest_generation = Some(
            inner
                .latest_generation
                .map_or(generation, |g| g.max(generation)),
        );
        Ok(())
    }

    /// Observations of `heuristic` in insertion order; empty if unknown.
    pub fn history(&self, heuristic: HeuristicId) -> History {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        History {
            observations: inner
                .histories
                .get(&heuristic)
                .cloned()
                .unwrap_or_default(),
            latest_generation: inner.latest_generation,
        }
    }

    /// Heuristics with at least one observation.
    pub fn known_heuristics(&self) -> BTreeSet<HeuristicId> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.histories.keys().copied().collect()
    }

    /// Total number of observations over all heuristics.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .total
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest generation recorded so far, for any heuristic.
    pub fn latest_generation(&self) -> Option<usize> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .latest_generation
    }
}
