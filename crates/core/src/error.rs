//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic request-terminal failures (validation,
/// authentication, authorization, invariants). Infrastructure concerns belong
/// elsewhere.
///
/// Every variant is fail-closed: ambiguity resolves to a denial, never to an
/// implicit allow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or malformed input (reported with a field-level message).
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, or expired bearer token. One uniform message for
    /// every token failure so callers cannot distinguish why.
    #[error("Invalid or expired token.")]
    Unauthenticated,

    /// Failed login. Uniform regardless of whether the email was unknown,
    /// the account inactive, or the password wrong.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Valid identity, insufficient capability.
    #[error("{0}")]
    Forbidden(String),

    /// Uniqueness violation or a directory invariant violation
    /// (primary-admin protection, self-action protection).
    #[error("{0}")]
    Conflict(String),

    /// The target identity does not exist.
    #[error("User not found.")]
    NotFound,

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
