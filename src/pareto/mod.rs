//! Pareto dominance utilities and solution sets.
//!
//! Domain-agnostic building blocks the credit definitions read from:
//!
//! - [`dominance`] / [`non_dominated_sort`]: Pareto comparison and ranking
//! - [`ParetoFront`]: the current non-dominated set
//! - [`EpsilonBoxArchive`]: a bounded secondary archive
//!
//! All objectives are minimized.

mod archive;
mod dominance;
mod front;
mod types;

pub use archive::EpsilonBoxArchive;
pub use dominance::{
    dominance, dominates, non_dominated_sort, weakly_dominates, Dominance,
    NondominatedSortResult,
};
pub use front::ParetoFront;
pub use types::ObjectiveVector;
