use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors raised by pure domain logic (no I/O involved).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid JSON in data file: {reason}")]
    InvalidJson { reason: String },

    #[error("Unknown data format '{format}'")]
    UnknownFormat { format: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidJson { .. } => vec![
                "Check the data file for trailing commas or unquoted keys".into(),
                "Pass --input-format xml or --input-format text for non-JSON data".into(),
            ],
            Self::UnknownFormat { format } => vec![
                format!("'{}' is not a supported format", format),
                "Supported formats: json, xml, text".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidJson { .. } | Self::UnknownFormat { .. } => ErrorCategory::Validation,
        }
    }
}
