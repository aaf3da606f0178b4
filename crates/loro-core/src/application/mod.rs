//! Application layer for Loro.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateService, ValidationService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! template or data logic itself. Those rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    TemplateService, TransformOptions, TransformOutcome, ValidationReport, ValidationService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateApi};

pub use error::ApplicationError;
