//! Templates as the Loro service exposes them.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use crate::domain::data_format::DataFormat;

/// Where the template for a transformation comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A template file on the local disk.
    LocalFile(PathBuf),
    /// A stored template, fetched by ID and transformed with its content.
    TemplateId(String),
    /// A stored template rendered server-side by GUID.
    Guid(String),
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalFile(path) => write!(f, "file {}", path.display()),
            Self::TemplateId(id) => write!(f, "template {id}"),
            Self::Guid(guid) => write!(f, "guid {guid}"),
        }
    }
}

/// Body of `POST /api/templates/transform`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    pub template: String,
    pub data: Value,
    pub input_format: DataFormat,
    pub output_format: DataFormat,
}

/// One entry of the template listing.
///
/// Every field is optional: the listing is shown even when the service
/// leaves some out or sends IDs as numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateSummary {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::strings", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Paging and search parameters for the template listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: usize,
    pub offset: usize,
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            search: None,
        }
    }
}

/// Server-side validation verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteValidation {
    #[serde(default)]
    pub valid: Option<bool>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RemoteValidation {
    /// Valid unless the server says otherwise or lists errors.
    pub fn is_valid(&self) -> bool {
        self.valid != Some(false) && self.errors.is_empty()
    }
}
