//! Unified error handling for Loro Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Loro Core operations.
#[derive(Debug, Error, Clone)]
pub enum LoroError {
    /// Errors from the domain layer (bad data, unknown formats).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (service calls, file access).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl LoroError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in the Loro CLI".into(),
                "Please report this issue at: https://github.com/lorotemplates/loro-cli/issues"
                    .into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::RateLimited
                    | ApplicationError::ServerError
                    | ApplicationError::Network { .. }
            )
        )
    }

    /// The service answered, but does not offer the requested endpoint.
    pub fn is_unsupported_endpoint(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::NotFound { .. } | ApplicationError::Api { status: 501, .. }
            )
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    /// The remote service refused the request or could not be reached.
    Network,
    Internal,
}

/// Convenient result type alias.
pub type LoroResult<T> = Result<T, LoroError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> LoroResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> LoroResult<T> {
        self.map_err(|e| LoroError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
