//! Infrastructure adapters for Loro.
//!
//! This crate implements the ports defined in `loro-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod http;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use http::{DEFAULT_API_URL, LoroHttpClient};
