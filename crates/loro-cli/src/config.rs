//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--api-key`, `--api-url`; handled at the call-site)
//! 2. Environment variables (`LORO_API_KEY`, `LORO_API_URL`)
//! 3. Config file (`~/.loro-cli-config.json` or `--config FILE`)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use loro_adapters::DEFAULT_API_URL;

/// File name of the per-user configuration in the home directory.
pub const CONFIG_FILE_NAME: &str = ".loro-cli-config.json";

/// Application configuration, persisted as `{"apiKey": …, "apiUrl": …}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default, alias = "apikey")]
    pub api_key: Option<String>,
    #[serde(default = "default_api_url", alias = "apiurl")]
    pub api_url: String,
}

/// Values picked up from `LORO_*` variables.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    api_key: Option<String>,
    api_url: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
        }
    }
}

impl AppConfig {
    /// Load the effective configuration: file, then environment.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Self::load_with_env(path, Environment::with_prefix("LORO"))
    }

    /// Like [`Self::load`] with an explicit environment source.
    pub fn load_with_env(path: &Path, env: Environment) -> anyhow::Result<Self> {
        let mut config = Self::load_file(path)?;

        let overrides: EnvOverrides = Config::builder()
            .add_source(env)
            .build()
            .and_then(Config::try_deserialize)
            .context("Failed to read LORO_* environment variables")?;

        if let Some(key) = overrides.api_key {
            config.api_key = Some(key);
        }
        if let Some(url) = overrides.api_url {
            config.api_url = url;
        }

        Ok(config.normalized())
    }

    /// Load only what is stored in the file. A missing file yields defaults.
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let config: Self = Config::builder()
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .build()
            .and_then(Config::try_deserialize)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Configuration loaded");
        Ok(config.normalized())
    }

    /// Write the configuration as pretty JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialise config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Path to the default configuration file in the home directory,
    /// falling back to the current directory.
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// The stored key as `***` plus its last four characters.
    pub fn masked_key(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_key)
    }

    // Empty strings count as unset, the way older config files stored them.
    fn normalized(mut self) -> Self {
        if self.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            self.api_key = None;
        }
        if self.api_url.trim().is_empty() {
            self.api_url = default_api_url();
        }
        self
    }
}

/// `***` followed by the last four characters of `key`.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("***{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        Environment::with_prefix("LORO").source(Some(Default::default()))
    }

    fn env_with(pairs: &[(&str, &str)]) -> Environment {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("LORO").source(Some(map))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_with_env(&dir.path().join("none.json"), no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.api_url, "https://api.lorotemplates.com");
    }

    #[test]
    fn file_values_are_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"apiKey": "secret-1234", "apiUrl": "http://localhost:5000"}"#)
            .unwrap();

        let cfg = AppConfig::load_with_env(&path, no_env()).unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("secret-1234"));
        assert_eq!(cfg.api_url, "http://localhost:5000");
    }

    #[test]
    fn environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"apiKey": "from-file"}"#).unwrap();

        let env = env_with(&[("LORO_API_KEY", "from-env"), ("LORO_API_URL", "http://env")]);
        let cfg = AppConfig::load_with_env(&path, env).unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("from-env"));
        assert_eq!(cfg.api_url, "http://env");
    }

    #[test]
    fn empty_key_counts_as_unset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"apiKey": "", "apiUrl": ""}"#).unwrap();

        let cfg = AppConfig::load_with_env(&path, no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn save_then_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        let cfg = AppConfig {
            api_key: Some("abc".into()),
            api_url: "http://localhost".into(),
        };
        cfg.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"apiKey\": \"abc\""));
        assert_eq!(AppConfig::load_file(&path).unwrap(), cfg);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(AppConfig::load_file(&path).is_err());
    }

    #[test]
    fn key_masking() {
        assert_eq!(mask_key("sk-live-98765"), "***8765");
        assert_eq!(mask_key("ab"), "***ab");
        assert_eq!(AppConfig::default().masked_key(), None);
    }

    #[test]
    fn default_path_ends_with_file_name() {
        assert!(AppConfig::default_path().ends_with(CONFIG_FILE_NAME));
    }
}
