//! Domain-level errors.
//!
//! These errors represent malformed query input detected before any SQL is
//! built. They are independent of the database engine.

use thiserror::Error;

/// Domain-specific errors for query input validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Ordering string could not be parsed
    #[error("Invalid sort specification: {0}")]
    InvalidSortSpecification(String),

    /// Page index or size out of range
    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),
}

impl DomainError {
    /// Create an invalid sort specification error
    pub fn invalid_sort(msg: impl Into<String>) -> Self {
        DomainError::InvalidSortSpecification(msg.into())
    }

    /// Create an invalid page request error
    pub fn invalid_page(msg: impl Into<String>) -> Self {
        DomainError::InvalidPageRequest(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
