//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// uniqueness conflicts, ledger rules). Transport/status mapping lives in the
/// API layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or out-of-range input).
    #[error("{0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The acting account record does not exist.
    #[error("Sender account not found.")]
    NotFound,

    /// The referenced transfer recipient does not exist.
    #[error("Recipient not found. Check email or username.")]
    RecipientNotFound,

    /// Sender and resolved recipient are the same account.
    #[error("Cannot transfer to yourself.")]
    SelfTransfer,

    /// The sender's balance does not cover the transfer amount.
    #[error("Insufficient balance.")]
    InsufficientFunds,

    /// A uniqueness conflict (duplicate username/email).
    #[error("{0}")]
    Conflict(String),

    /// An unexpected infrastructure fault (poisoned lock, etc).
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
