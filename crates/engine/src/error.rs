//! The module contains the errors the engine can return.
//!
//! User-facing failures are raised before any state is touched:
//!
//! - [`Validation`] for bad shapes (empty names, non-members, strategy mismatch).
//! - [`SplitConservation`] when a split cannot add up to the expense total.
//! - [`UnknownSplitType`] for an unrecognized strategy tag.
//!
//! [`InvariantViolation`] is different: it signals a broken ledger
//! (credits and debits no longer match) and is a programming error.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`SplitConservation`]: EngineError::SplitConservation
//!  [`UnknownSplitType`]: EngineError::UnknownSplitType
//!  [`InvariantViolation`]: EngineError::InvariantViolation
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Split does not add up: {0}")]
    SplitConservation(String),
    #[error("Unknown split type: \"{0}\"")]
    UnknownSplitType(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Ledger invariant violated: {0}")]
    InvariantViolation(String),
}
