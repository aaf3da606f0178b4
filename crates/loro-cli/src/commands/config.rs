//! `loro config`: show, change or reset the stored settings.

use std::path::Path;

use tracing::instrument;

use crate::{
    cli::ConfigArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, Paint},
};

/// Dispatch on the config flags.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn execute(
    args: ConfigArgs,
    config: &AppConfig,
    path: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    if args.list {
        return show(config, path, output);
    }

    if args.reset {
        AppConfig::default().save(path).map_err(CliError::config)?;
        output.success("Configuration reset to defaults")?;
        return Ok(());
    }

    // Only file values are written back; environment overrides stay where
    // they came from.
    let mut stored = AppConfig::load_file(path).map_err(CliError::config)?;
    if args.api_key.is_none() && args.api_url.is_none() {
        output.info(&format!("Configuring {}", path.display()))?;
        let (api_key, api_url) = prompt(&stored)?;
        apply(&mut stored, Some(api_key), Some(api_url));
    } else {
        apply(&mut stored, args.api_key, args.api_url);
    }

    stored.save(path).map_err(CliError::config)?;
    output.success("Configuration saved successfully")?;
    Ok(())
}

fn show(config: &AppConfig, path: &Path, output: &OutputManager) -> CliResult<()> {
    output.header("Current Loro CLI Configuration:")?;
    output.muted(&"─".repeat(40))?;

    let key = match config.masked_key() {
        Some(masked) => output.paint(&masked, Paint::Green),
        None => output.paint("Not set", Paint::Yellow),
    };
    output.print(&format!("API Key: {key}"))?;
    output.print(&format!(
        "API URL: {}",
        output.paint(&config.api_url, Paint::Blue)
    ))?;
    output.print(&format!(
        "Config file: {}",
        output.paint(&path.display().to_string(), Paint::Dimmed)
    ))?;
    Ok(())
}

/// Blank answers keep the current value.
fn apply(config: &mut AppConfig, api_key: Option<String>, api_url: Option<String>) {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(key.trim().to_owned());
    }
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.api_url = url.trim().to_owned();
    }
}

#[cfg(feature = "interactive")]
fn prompt(current: &AppConfig) -> CliResult<(String, String)> {
    use dialoguer::Input;

    let has_key = current.api_key.is_some();
    let api_key: String = Input::new()
        .with_prompt("Enter your Loro API key")
        .allow_empty(has_key)
        .validate_with(move |input: &String| -> Result<(), &str> {
            if input.trim().is_empty() && !has_key {
                Err("API key is required")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_error)?;

    let api_url: String = Input::new()
        .with_prompt("Enter Loro API URL")
        .default(current.api_url.clone())
        .interact_text()
        .map_err(prompt_error)?;

    Ok((api_key, api_url))
}

#[cfg(feature = "interactive")]
fn prompt_error(e: dialoguer::Error) -> CliError {
    let io: std::io::Error = e.into();
    if io.kind() == std::io::ErrorKind::Interrupted {
        return CliError::Cancelled;
    }
    CliError::InvalidInput {
        message: format!("Could not read answer: {io}"),
        source: Some(Box::new(io)),
    }
}

#[cfg(not(feature = "interactive"))]
fn prompt(_current: &AppConfig) -> CliResult<(String, String)> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_given_values() {
        let mut cfg = AppConfig::default();
        apply(&mut cfg, Some("new-key".into()), None);
        assert_eq!(cfg.api_key.as_deref(), Some("new-key"));
        assert_eq!(cfg.api_url, "https://api.lorotemplates.com");

        apply(&mut cfg, None, Some("http://localhost:5000".into()));
        assert_eq!(cfg.api_url, "http://localhost:5000");
    }

    #[test]
    fn blank_answers_keep_current_values() {
        let mut cfg = AppConfig {
            api_key: Some("kept".into()),
            api_url: "http://kept".into(),
        };
        apply(&mut cfg, Some("   ".into()), Some(String::new()));
        assert_eq!(cfg.api_key.as_deref(), Some("kept"));
        assert_eq!(cfg.api_url, "http://kept");
    }
}
