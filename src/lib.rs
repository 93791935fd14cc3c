//! Adaptive operator selection for multi-objective hyper-heuristics.
//!
//! A hyper-heuristic repeatedly chooses one of several search operators
//! ("heuristics") to apply. This crate supplies the machinery that makes the
//! choice adaptive:
//!
//! - **Credit definitions**: score one heuristic application from population
//!   state before and after it, in three families (offspring vs. parent,
//!   offspring vs. population, contribution to population), built by name
//!   through a factory.
//! - **Credit repository**: append-only credit history per heuristic, safe
//!   for concurrent writers.
//! - **Aggregation**: reduces a history to the estimate a selector reads
//!   (mean, sum, recency-decayed, sliding window).
//! - **Selectors**: random baseline, probability matching, adaptive pursuit
//!   and an upper confidence bound bandit.
//! - **Controller**: runs the select, reward, update cycle.
//!
//! Pareto utilities and quality indicators (hypervolume, R2, additive
//! epsilon) are included so the set-based credit definitions work out of
//! the box. All objectives are minimized.
//!
//! # Architecture
//!
//! Like the rest of the U-Engine algorithms layer, the crate holds no
//! domain concepts. Solutions only expose their objective vector through
//! [`pareto::ObjectiveVector`]; applying a heuristic is the caller's job.

pub mod controller;
pub mod credit;
pub mod error;
pub mod heuristic;
pub mod indicator;
pub mod pareto;
pub mod repository;
pub mod selector;

pub use error::{CreditError, Result};
