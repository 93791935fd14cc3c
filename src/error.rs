//! Error types for credit assignment and heuristic selection.

use thiserror::Error;

/// Errors raised while building or driving the operator-selection controller.
///
/// Construction-time errors ([`UnknownCreditDefinition`](CreditError::UnknownCreditDefinition),
/// [`Configuration`](CreditError::Configuration)) abort run setup. Per-generation
/// errors ([`InvalidSnapshot`](CreditError::InvalidSnapshot),
/// [`SelectionOrder`](CreditError::SelectionOrder)) are returned to the caller and
/// never leave partially recorded state behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CreditError {
    /// The requested credit definition name is not registered.
    #[error("no such credit definition: {0}")]
    UnknownCreditDefinition(String),

    /// A parameter is missing, malformed, or out of range.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A population snapshot lacks data the credit definition requires.
    #[error("invalid population snapshot: {0}")]
    InvalidSnapshot(String),

    /// `select` and `reward` were not called in strict alternation.
    #[error("selection order violated: {0}")]
    SelectionOrder(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CreditError>;
