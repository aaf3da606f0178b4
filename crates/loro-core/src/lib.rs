//! Loro Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Loro
//! template CLI, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            loro-cli (CLI)               │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (TemplateService, ValidationService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: TemplateApi, Filesystem)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     loro-adapters (Infrastructure)      │
//! │   (LoroHttpClient, LocalFilesystem)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (syntax checks, data formats, entities)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use loro_core::domain::syntax;
//!
//! let diagnostics = syntax::check("{{if ready}}\nHello");
//! assert_eq!(diagnostics[0].to_string(), "Line 1: Possible unclosed if statement");
//! assert_eq!(syntax::count_conditions("{{if ready}}"), 1);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        TemplateService, TransformOptions, TransformOutcome, ValidationReport, ValidationService,
        ports::{Filesystem, TemplateApi},
    };
    pub use crate::domain::{
        DataFormat, Diagnostic, DiagnosticKind, ListQuery, TemplateSource, TemplateStats,
        TemplateSummary, UsageStats,
    };
    pub use crate::error::{LoroError, LoroResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
