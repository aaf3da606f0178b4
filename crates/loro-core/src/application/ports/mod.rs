//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `loro-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: template, data and output files
//!   - `TemplateApi`: the remote Loro Template Service

pub mod output;

pub use output::{Filesystem, TemplateApi};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateApi};
