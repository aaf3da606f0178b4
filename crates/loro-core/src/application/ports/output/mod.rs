//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `loro-adapters` crate provides implementations.

use std::path::Path;

use serde_json::Value;

use crate::domain::{
    ListQuery, Received, RemoteValidation, TemplateSummary, TransformRequest, UsageStats,
};
use crate::error::LoroResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `loro_adapters::filesystem::LocalFilesystem` (production)
/// - `loro_adapters::filesystem::MemoryFilesystem` (testing)
///
/// A missing file must be reported as `ApplicationError::FileNotFound` so
/// services can turn it into a more specific message.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> LoroResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> LoroResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> LoroResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for the remote Loro Template Service.
///
/// Implemented by:
/// - `loro_adapters::http::LoroHttpClient` (blocking HTTP)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateApi: Send + Sync {
    /// Transform inline template text with data.
    fn transform(&self, request: &TransformRequest) -> LoroResult<Value>;

    /// Fetch the content of a stored template.
    fn get_template(&self, id: &str) -> LoroResult<String>;

    /// List stored templates, keeping the listing as sent.
    fn list_templates(&self, query: &ListQuery) -> LoroResult<Received<Vec<TemplateSummary>>>;

    /// Ask the service to validate template text.
    fn validate_template(&self, template: &str) -> LoroResult<RemoteValidation>;

    /// Render a stored template server-side with the given data.
    fn render_by_guid(&self, guid: &str, data: &Value) -> LoroResult<Value>;

    /// Usage statistics of the account behind the API key, kept as sent.
    fn usage_stats(&self) -> LoroResult<Received<UsageStats>>;
}
