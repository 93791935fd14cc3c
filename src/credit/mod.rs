//! Credit assignment for adaptive operator selection.
//!
//! A credit definition turns the outcome of one heuristic application into a
//! scalar reward. Definitions are built by name through [`CreditFactory`]
//! and evaluated against a read-only [`PopulationSnapshot`].
//!
//! # Examples
//!
//! ```
//! use u_hyperheur::credit::{CreditConfig, CreditFactory, PopulationSnapshot, ProblemDescriptor};
//!
//! let def = CreditFactory::create("OPDo", &CreditConfig::default(), &ProblemDescriptor::new(2))
//!     .unwrap();
//!
//! let parents = vec![vec![2.0, 2.0]];
//! let offspring = vec![vec![1.0, 1.0]];
//! let snapshot = PopulationSnapshot::new()
//!     .with_parents(&parents)
//!     .with_offspring(&offspring);
//! assert_eq!(def.compute(&snapshot).unwrap(), 1.0);
//! ```

mod config;
mod definition;
mod factory;
mod snapshot;

pub use config::{
    CreditConfig, ProblemDescriptor, Properties, KEY_DISATISFY, KEY_IDEAL_POINT, KEY_KAPPA,
    KEY_NEITHER, KEY_NUM_REFERENCE_VECTORS, KEY_REF_POINT, KEY_SATISFY,
};
pub use definition::CreditDefinition;
pub use factory::{CreditFactory, CreditKind};
pub use snapshot::{Neighborhood, PopulationSnapshot, ReferenceSet, Stage};
