//! Core domain layer for Loro.
//!
//! Pure logic only: the template syntax heuristics, data format handling
//! and the entities exchanged with the template service. No filesystem or
//! network access happens here; that lives behind the ports defined in the
//! application layer.

pub mod data_format;
pub mod entities;
pub mod error;
pub mod syntax;

pub use data_format::{DataFormat, detect_format, format_output, parse_data};
pub use entities::{
    AccountInfo, Activity, ApiUsage, ListQuery, Received, RemoteValidation, TemplateRef,
    TemplateSource, TemplateSummary, TemplateUsage, TransformRequest, UsageStats, format_bytes,
};
pub use error::DomainError;
pub use syntax::{Diagnostic, DiagnosticKind, TemplateStats};
