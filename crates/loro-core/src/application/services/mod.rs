//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "transform a template" or "validate a file".

mod data_loader;
pub mod template_service;
pub mod validation_service;

pub use template_service::{TemplateService, TransformOptions, TransformOutcome};
pub use validation_service::{ValidationReport, ValidationService};
