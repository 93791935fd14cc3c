//! Heuristic selectors.
//!
//! A selector picks the next heuristic from a fixed candidate set and is
//! refreshed from the credit repository after each application.
//!
//! - [`RandomSelect`]: uniform baseline, ignores credits
//! - [`ProbabilityMatching`]: probabilities proportional to credit, with a floor
//! - [`AdaptivePursuit`]: winner-takes-most probability pursuit
//! - [`UpperConfidenceBound`]: deterministic UCB1 bandit
//!
//! # Examples
//!
//! ```
//! use u_hyperheur::heuristic::HeuristicId;
//! use u_hyperheur::selector::{HeuristicSelector, RandomSelect};
//!
//! let mut selector = RandomSelect::new([HeuristicId::new(0)]).unwrap();
//! let mut rng = rand::rng();
//! assert_eq!(selector.next_heuristic(&mut rng), HeuristicId::new(0));
//! assert_eq!(selector.iterations(), 1);
//! ```

mod adaptive_pursuit;
mod probability_matching;
mod random;
mod types;
mod ucb;

pub use adaptive_pursuit::AdaptivePursuit;
pub use probability_matching::{ProbabilityMatching, Scoring};
pub use random::RandomSelect;
pub use types::HeuristicSelector;
pub use ucb::UpperConfidenceBound;
