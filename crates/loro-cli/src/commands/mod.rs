//! Command handlers. Each turns parsed arguments into service calls and
//! prints the result; no business logic lives here.

pub mod completions;
pub mod config;
pub mod list;
pub mod remote;
pub mod stats;
pub mod transform;
pub mod validate;

use loro_adapters::{LocalFilesystem, LoroHttpClient};
use loro_core::application::TemplateService;
use tracing::debug;

use crate::{
    cli::ServiceArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// API key and endpoint after flags have been applied over the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub api_key: String,
    pub api_url: String,
}

impl Connection {
    /// Flags win over the loaded config. Fails without a non-empty key.
    pub fn resolve(config: &AppConfig, flags: &ServiceArgs) -> CliResult<Self> {
        let api_key = flags
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingApiKey)?;
        let api_url = flags
            .api_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| config.api_url.clone());

        Ok(Self { api_key, api_url })
    }
}

/// A template service wired to the HTTP client and the local disk.
pub fn template_service(config: &AppConfig, flags: &ServiceArgs) -> CliResult<TemplateService> {
    let connection = Connection::resolve(config, flags)?;
    debug!(api_url = %connection.api_url, "Connecting to Loro API");
    let client = LoroHttpClient::new(connection.api_url, &connection.api_key)?;
    Ok(TemplateService::new(
        Box::new(client),
        Box::new(LocalFilesystem::new()),
    ))
}
