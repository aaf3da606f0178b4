//! Application layer errors.
//!
//! These errors represent failures talking to the outside world (the Loro
//! service, the filesystem), not bad data. Data errors are `DomainError`
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while orchestrating a use case.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// 401 from the service.
    #[error("Invalid API key. Please check your configuration.")]
    Unauthorized,

    /// 403 from the service.
    #[error("Access denied. Please check your API key permissions.")]
    Forbidden,

    /// 429 from the service.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// 500 from the service.
    #[error("Server error. Please try again later.")]
    ServerError,

    /// Any other non-success status.
    #[error("API Error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A named resource does not exist on the service.
    #[error("{message}")]
    NotFound { message: String },

    /// The service could not be reached at all.
    #[error("Network error: Unable to reach Loro API at {url}")]
    Network { url: String },

    /// The service answered with something we could not decode.
    #[error("Unexpected response from Loro API: {reason}")]
    InvalidResponse { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A file that was asked for does not exist.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The data file passed with `--data` does not exist.
    #[error("Data file not found: {path}")]
    DataFileNotFound { path: PathBuf },

    /// No local template, template ID or GUID was given.
    #[error("No template specified")]
    MissingTemplateSource,

    /// Lock on shared in-memory state was poisoned.
    #[error("Internal state lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Unauthorized => vec![
                "Set your API key: loro config --api-key YOUR_API_KEY".into(),
                "Or export LORO_API_KEY in your environment".into(),
            ],
            Self::Forbidden => vec!["Check that your API key has access to this template".into()],
            Self::RateLimited | Self::ServerError => vec!["Try again in a moment".into()],
            Self::Network { url } => vec![
                format!("Check that {} is reachable", url),
                "Override the endpoint with --api-url or loro config --api-url".into(),
            ],
            Self::NotFound { .. } => vec![
                "List available templates: loro list".into(),
                "Check the template ID or GUID for typos".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check file permissions".into(),
            ],
            Self::FileNotFound { path } | Self::DataFileNotFound { path } => vec![
                format!("No file at {}", path.display()),
                "Check the path relative to the current directory".into(),
            ],
            Self::MissingTemplateSource => vec![
                "Pass a template file: loro transform template.sbn -d data.json".into(),
                "Or use a stored template: loro transform -t <template-id>".into(),
                "Or render by GUID: loro transform -g <guid>".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthorized | Self::Forbidden => ErrorCategory::Configuration,
            Self::RateLimited | Self::ServerError | Self::Api { .. } | Self::Network { .. } => {
                ErrorCategory::Network
            }
            Self::NotFound { .. } | Self::FileNotFound { .. } | Self::DataFileNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::MissingTemplateSource => ErrorCategory::Validation,
            Self::InvalidResponse { .. } | Self::FilesystemError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}
