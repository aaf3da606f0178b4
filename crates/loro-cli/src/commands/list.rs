//! Implementation of the `loro list` command.

use chrono::DateTime;
use tracing::instrument;

use loro_core::domain::{ListQuery, TemplateSummary};

use crate::{
    cli::{ListArgs, OutputFormat, ServiceArgs},
    commands::template_service,
    config::AppConfig,
    error::CliResult,
    output::{OutputManager, Paint},
};

#[instrument(skip_all, fields(limit = args.limit))]
pub fn execute(args: ListArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let service = template_service(config, &ServiceArgs::default())?;

    let query = ListQuery {
        limit: args.limit,
        offset: args.offset,
        search: args.search,
    };

    let spinner = output.spinner("Fetching templates...");
    let listing = match service.list(&query) {
        Ok(listing) => listing,
        Err(e) => {
            spinner.fail("Failed to fetch templates");
            return Err(e.into());
        }
    };
    let templates = &listing.value;
    spinner.succeed(&format!("Found {} template(s)", templates.len()));

    if args.json || output.format() == OutputFormat::Json {
        // Bypasses quiet mode: JSON output must stay parseable in pipes.
        let json = serde_json::to_string_pretty(&listing.raw).unwrap_or_else(|_| "[]".into());
        output.data(&json)?;
        return Ok(());
    }

    if templates.is_empty() {
        output.warning("No templates found")?;
        return Ok(());
    }

    output.print("")?;
    output.header("Available Templates:")?;
    output.muted(&"─".repeat(80))?;

    for (index, template) in templates.iter().enumerate() {
        print_entry(index + 1, template, output)?;
    }

    output.print("")?;
    output.muted(&"─".repeat(80))?;
    output.muted("Use 'loro transform -t <template-id>' to use a template")?;

    Ok(())
}

fn print_entry(number: usize, template: &TemplateSummary, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.print(&format!(
        "{} {}",
        output.paint(
            &format!("{number}. {}", template.name.as_deref().unwrap_or("Unnamed")),
            Paint::Bold
        ),
        output.paint(
            &format!("(ID: {})", template.id.as_deref().unwrap_or("N/A")),
            Paint::Dimmed
        )
    ))?;
    if let Some(description) = &template.description {
        output.print(&format!("   {}", output.paint(description, Paint::Dimmed)))?;
    }
    if let Some(created) = &template.created_at {
        output.print(&format!(
            "   {} {}",
            output.paint("Created:", Paint::Green),
            created_date(created)
        ))?;
    }
    if !template.tags.is_empty() {
        output.print(&format!(
            "   {} {}",
            output.paint("Tags:", Paint::Blue),
            template.tags.join(", ")
        ))?;
    }
    Ok(())
}

/// Calendar date of an RFC 3339 timestamp; other strings are shown as is.
fn created_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_date_keeps_the_day() {
        assert_eq!(created_date("2024-03-01T12:30:00Z"), "2024-03-01");
        assert_eq!(created_date("2024-03-01T23:30:00+02:00"), "2024-03-01");
    }

    #[test]
    fn unparseable_created_date_is_shown_raw() {
        assert_eq!(created_date("last tuesday"), "last tuesday");
    }
}
