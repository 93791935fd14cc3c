//! Credit repository and aggregation strategies.
//!
//! - [`CreditRepository`]: append-only history of credits per heuristic
//! - [`CreditAggregation`]: reduces a history into the estimate selectors read
//!
//! # Examples
//!
//! ```
//! use u_hyperheur::heuristic::HeuristicId;
//! use u_hyperheur::repository::{CreditAggregation, CreditRepository, MeanAggregation};
//!
//! let repo = CreditRepository::new();
//! let h = HeuristicId::new(0);
//! repo.record(h, 1.0, 0).unwrap();
//! repo.record(h, 0.0, 1).unwrap();
//! assert_eq!(MeanAggregation.aggregate(&repo, h), 0.5);
//! ```

mod aggregation;
mod store;

pub use aggregation::{
    CreditAggregation, DecayingAggregation, MeanAggregation, SumAggregation, WindowAggregation,
    NEUTRAL_CREDIT,
};
pub use store::{CreditObservation, CreditRepository, History};
