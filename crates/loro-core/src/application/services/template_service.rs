//! Template Service - everything that talks to the Loro service.
//!
//! This service coordinates one request at a time:
//! 1. Load data and template text through the filesystem port
//! 2. Call the remote service through the API port
//! 3. Format the result for output
//!
//! It holds no state between calls beyond its two adapters.

use std::path::Path;

use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::data_loader;
use crate::{
    application::ports::{Filesystem, TemplateApi},
    domain::{
        DataFormat, ListQuery, Received, RemoteValidation, TemplateSource, TemplateSummary,
        TransformRequest, UsageStats, format_output,
    },
    error::LoroResult,
};

/// Result of a transformation, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    /// Result as returned by the service.
    pub raw: Value,
    /// Result rendered in the requested output format.
    pub output: String,
    /// Size in bytes of the template text, when it passed through the client.
    pub template_size: Option<usize>,
}

/// Options for a single transformation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub input_format: DataFormat,
    pub output_format: DataFormat,
}

/// Service for template transformation and service queries.
pub struct TemplateService {
    api: Box<dyn TemplateApi>,
    filesystem: Box<dyn Filesystem>,
}

impl TemplateService {
    /// Create a new template service with the given adapters.
    pub fn new(api: Box<dyn TemplateApi>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { api, filesystem }
    }

    /// Load a data file, detecting its format unless one is given.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_data(&self, path: &Path, format: Option<DataFormat>) -> LoroResult<Value> {
        data_loader::load_data(self.filesystem.as_ref(), path, format)
    }

    /// Load data when a path is given, otherwise start from an empty object.
    pub fn load_data_or_default(
        &self,
        path: Option<&Path>,
        format: Option<DataFormat>,
    ) -> LoroResult<Value> {
        match path {
            Some(path) => self.load_data(path, format),
            None => Ok(json!({})),
        }
    }

    /// Transform `data` with the template from `source`.
    #[instrument(skip(self, data), fields(source = %source))]
    pub fn transform(
        &self,
        source: &TemplateSource,
        data: Value,
        options: TransformOptions,
    ) -> LoroResult<TransformOutcome> {
        let (raw, template_size) = match source {
            TemplateSource::Guid(guid) => {
                info!(%guid, "Rendering remote template");
                (self.api.render_by_guid(guid, &data)?, None)
            }
            TemplateSource::TemplateId(id) => {
                info!(%id, "Fetching template from service");
                let template = self.api.get_template(id)?;
                let size = template.len();
                (self.transform_text(template, data, options)?, Some(size))
            }
            TemplateSource::LocalFile(path) => {
                info!(path = %path.display(), "Loading template file");
                let template = self.filesystem.read_to_string(path)?;
                let size = template.len();
                (self.transform_text(template, data, options)?, Some(size))
            }
        };

        let output = format_output(&raw, options.output_format);
        info!(bytes = output.len(), "Transformation completed");

        Ok(TransformOutcome {
            raw,
            output,
            template_size,
        })
    }

    /// Fetch the content of a stored template.
    pub fn fetch_template(&self, id: &str) -> LoroResult<String> {
        self.api.get_template(id)
    }

    /// List stored templates.
    pub fn list(&self, query: &ListQuery) -> LoroResult<Received<Vec<TemplateSummary>>> {
        self.api.list_templates(query)
    }

    /// Ask the service to validate template text.
    pub fn validate_remote(&self, template: &str) -> LoroResult<RemoteValidation> {
        self.api.validate_template(template)
    }

    /// Usage statistics, or demonstration figures when the service does
    /// not offer the endpoint.
    #[instrument(skip(self))]
    pub fn usage_stats(&self) -> LoroResult<Received<UsageStats>> {
        match self.api.usage_stats() {
            Ok(stats) => Ok(stats),
            Err(e) if e.is_unsupported_endpoint() => {
                warn!(error = %e, "Usage endpoint unavailable, showing sample statistics");
                Ok(Received::local(UsageStats::sample(chrono::Utc::now())))
            }
            Err(e) => Err(e),
        }
    }

    /// Write rendered output, creating the parent directory if needed.
    #[instrument(skip(self, content), fields(path = %path.display()))]
    pub fn write_output(&self, path: &Path, content: &str) -> LoroResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !self.filesystem.exists(parent) {
                self.filesystem.create_dir_all(parent)?;
            }
        }
        self.filesystem.write_file(path, content)
    }

    fn transform_text(
        &self,
        template: String,
        data: Value,
        options: TransformOptions,
    ) -> LoroResult<Value> {
        let request = TransformRequest {
            template,
            data,
            input_format: options.input_format,
            output_format: options.output_format,
        };
        self.api.transform(&request)
    }
}
