//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (bad input, undecodable
/// records). Storage and connectivity failures belong to the infra layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Caller-supplied values were rejected (empty name, bad quantity or price).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A stored record could not be decoded into an item.
    #[error("malformed record '{name}': {message}")]
    MalformedRecord { name: String, message: String },
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn malformed(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::MalformedRecord {
            name: name.into(),
            message: msg.into(),
        }
    }
}
