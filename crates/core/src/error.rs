//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// identity conflicts, ledger invariants). Infrastructure failures cross
/// into the domain only as `Storage`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identity conflict (duplicate username or email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A requested account was not found.
    #[error("not found")]
    NotFound,

    /// A deposit or transfer amount was not strictly positive.
    #[error("amount must be positive")]
    InvalidAmount,

    /// A debit would exceed the sender's balance.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Authentication failure (unknown account or bad credentials).
    #[error("unauthorized")]
    Unauthorized,

    /// The backing store failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
