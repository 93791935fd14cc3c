//! Adaptive operator selection loop.
//!
//! [`Controller`] ties a selector, a credit repository, an aggregation
//! strategy and a credit definition together. The evolutionary algorithm
//! stays outside: it asks for a heuristic, applies it, and hands back a
//! [`PopulationSnapshot`](crate::credit::PopulationSnapshot) of the result.

mod runner;

pub use runner::Controller;
