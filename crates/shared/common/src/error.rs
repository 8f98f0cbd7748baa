//! Unified error handling for repository operations.
//!
//! Every query operation surfaces failures as [`AppError`]. Engine failures
//! keep the original driver error as their `source()`.

use domain::DomainError;
use thiserror::Error;

/// Application error types for the query layer.
#[derive(Error, Debug)]
pub enum AppError {
    // Query input
    #[error("Invalid sort specification: {0}")]
    InvalidSortSpecification(String),

    #[error("Unsupported predicate expression: {0}")]
    UnsupportedPredicateExpression(String),

    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("Missing value for SQL parameter `@{0}`")]
    MissingParameter(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Data access error: {0}")]
    DataAccess(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get stable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidSortSpecification(_) => "INVALID_SORT_SPECIFICATION",
            AppError::UnsupportedPredicateExpression(_) => "UNSUPPORTED_PREDICATE_EXPRESSION",
            AppError::InvalidPageRequest(_) => "INVALID_PAGE_REQUEST",
            AppError::MissingParameter(_) => "MISSING_PARAMETER",
            #[cfg(feature = "database")]
            AppError::DataAccess(_) => "DATA_ACCESS_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True when the caller supplied malformed query input
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidSortSpecification(_)
                | AppError::UnsupportedPredicateExpression(_)
                | AppError::InvalidPageRequest(_)
                | AppError::MissingParameter(_)
        )
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::DataAccess(e) => {
                tracing::error!("Data access error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Caller errors are safe to show verbatim
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidSortSpecification(msg) => AppError::InvalidSortSpecification(msg),
            DomainError::InvalidPageRequest(msg) => AppError::InvalidPageRequest(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn invalid_sort(msg: impl Into<String>) -> Self {
        AppError::InvalidSortSpecification(msg.into())
    }

    pub fn unsupported_predicate(msg: impl Into<String>) -> Self {
        AppError::UnsupportedPredicateExpression(msg.into())
    }

    pub fn missing_parameter(name: impl Into<String>) -> Self {
        AppError::MissingParameter(name.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
