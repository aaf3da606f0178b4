//! Error handling for the Loro CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use loro_core::error::LoroError;

// Re-export so callers only need `use crate::error::*`.
pub use loro_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A command needs the service but no API key resolved.
    #[error("API key not configured")]
    MissingApiKey,

    /// The template checker (or the service) reported problems.
    #[error("Template validation failed: {count} problem(s) found")]
    ValidationFailed { count: usize },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `loro-core` or an adapter.
    ///
    /// The core message is shown as is; it is already phrased for users.
    #[error(transparent)]
    Core(#[from] LoroError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,

    /// Feature not available (e.g., interactive mode without feature flag).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Wrap a bootstrap failure from config loading or saving.
    pub fn config(err: anyhow::Error) -> Self {
        CliError::ConfigError {
            message: format!("{err:#}"),
            source: None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::MissingApiKey => vec![
                "Please configure your API key first:".into(),
                "  loro config --api-key YOUR_API_KEY".into(),
                "Or set the LORO_API_KEY environment variable".into(),
            ],

            Self::ValidationFailed { .. } => vec![
                "Fix the problems listed above and run loro validate again".into(),
                "Every {{if}} and {{for}} block needs a matching {{end}}".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check your config file at ~/.loro-cli-config.json".into(),
                "Use 'loro config --reset' to restore the defaults".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec!["Operation was cancelled".into(), "No changes were made".into()],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{}' feature is not available in this build", feature),
                "Pass the values as flags instead: loro config --api-key KEY --api-url URL".into(),
                format!(
                    "Or install with the feature enabled: cargo install loro-cli --features {}",
                    feature
                ),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::MissingApiKey => ErrorCategory::Configuration,
            Self::ValidationFailed { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Network => ErrorCategory::Network,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::UserError,
            Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Network       |  5   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Network => 5,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Network => tracing::error!("Service error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// The service rejected the request or could not be reached.
    Network,
    /// Internal/system error.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use loro_core::application::ApplicationError;
    use std::io;

    #[test]
    fn missing_key_suggests_config_command() {
        let err = CliError::MissingApiKey;
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("loro config --api-key YOUR_API_KEY"))
        );
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn core_message_is_shown_unchanged() {
        let err = CliError::from(LoroError::from(ApplicationError::NotFound {
            message: "Template not found: abc".into(),
        }));
        assert_eq!(err.to_string(), "Template not found: abc");
        assert_eq!(err.exit_code(), 3);
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(CliError::ValidationFailed { count: 2 }.exit_code(), 2);
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
    }

    #[test]
    fn exit_code_network() {
        let err = CliError::from(LoroError::from(ApplicationError::Network {
            url: "http://localhost".into(),
        }));
        assert_eq!(err.exit_code(), 5);
        let err = CliError::from(LoroError::from(ApplicationError::Unauthorized));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let s = CliError::MissingApiKey.format_plain(false);
        assert!(s.contains("Error: API key not configured"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_chain() {
        let err = CliError::IoError {
            message: "writing output".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: disk full"));
        assert!(!s.contains("Use -v"));
    }
}
