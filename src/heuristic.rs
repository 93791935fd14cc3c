//! Heuristic identities and the pool that allocates them.

use std::fmt;

/// Identity of one heuristic within a [`HeuristicPool`].
///
/// Ids are positions in the pool, so two operators in the same pool never
/// share an id even when they behave identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeuristicId(usize);

impl HeuristicId {
    /// Wraps a pool position. Prefer ids handed out by [`HeuristicPool::add`].
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for HeuristicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// A search operator competing for selection.
///
/// The selection machinery never applies heuristics itself; it only needs a
/// name for logging.
pub trait Heuristic: Send + Sync {
    /// Returns a human-readable name for this heuristic.
    fn name(&self) -> &str;
}

impl<H: Heuristic + ?Sized> Heuristic for Box<H> {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// The fixed set of candidate heuristics of a run.
///
/// # Examples
///
/// ```
/// use u_hyperheur::heuristic::{Heuristic, HeuristicPool};
///
/// struct Swap;
/// impl Heuristic for Swap {
///     fn name(&self) -> &str { "swap" }
/// }
///
/// struct Insert;
/// impl Heuristic for Insert {
///     fn name(&self) -> &str { "insert" }
/// }
///
/// let mut pool: HeuristicPool<Box<dyn Heuristic>> = HeuristicPool::new();
/// let swap = pool.add(Box::new(Swap));
/// let insert = pool.add(Box::new(Insert));
///
/// assert_ne!(swap, insert);
/// assert_eq!(pool.get(insert).map(|h| h.name()), Some("insert"));
/// ```
#[derive(Debug, Clone)]
pub struct HeuristicPool<H> {
    heuristics: Vec<H>,
}

impl<H> Default for HeuristicPool<H> {
    fn default() -> Self {
        Self {
            heuristics: Vec::new(),
        }
    }
}

impl<H: Heuristic> HeuristicPool<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a heuristic and returns its id.
    pub fn add(&mut self, heuristic: H) -> HeuristicId {
        let id = HeuristicId(self.heuristics.len());
        tracing::debug!(heuristic = %id, name = heuristic.name(), "registered heuristic");
        self.heuristics.push(heuristic);
        id
    }

    pub fn get(&self, id: HeuristicId) -> Option<&H> {
        self.heuristics.get(id.0)
    }

    /// Name of the heuristic behind `id`, if it belongs to this pool.
    pub fn name_of(&self, id: HeuristicId) -> Option<&str> {
        self.get(id).map(|h| h.name())
    }

    /// All ids, in insertion order.
    pub fn ids(&self) -> Vec<HeuristicId> {
        (0..self.heuristics.len()).map(HeuristicId).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HeuristicId, &H)> {
        self.heuristics
            .iter()
            .enumerate()
            .map(|(i, h)| (HeuristicId(i), h))
    }

    pub fn len(&self) -> usize {
        self.heuristics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heuristics.is_empty()
    }
}

impl<H: Heuristic> FromIterator<H> for HeuristicPool<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        let mut pool = Self::new();
        for heuristic in iter {
            pool.add(heuristic);
        }
        pool
    }
}
