//! Implementation of the `loro stats` command.

use chrono::{DateTime, Local, Utc};
use tracing::instrument;

use loro_core::domain::{AccountInfo, Activity, ApiUsage, TemplateUsage, format_bytes};

use crate::{
    cli::{OutputFormat, ServiceArgs, StatsArgs, global::GlobalArgs},
    commands::template_service,
    config::AppConfig,
    error::CliResult,
    output::{OutputManager, Paint},
};

/// Recent activities shown at most.
const RECENT_LIMIT: usize = 5;

#[instrument(skip_all)]
pub fn execute(
    args: StatsArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = template_service(config, &ServiceArgs::default())?;

    let spinner = output.spinner("Fetching usage statistics...");
    let report = match service.usage_stats() {
        Ok(report) => report,
        Err(e) => {
            spinner.fail("Failed to fetch usage statistics");
            return Err(e.into());
        }
    };
    spinner.succeed("Usage statistics fetched");

    let stats = &report.value;
    let json = serde_json::to_string_pretty(&report.raw).unwrap_or_else(|_| "{}".into());
    if args.json || output.format() == OutputFormat::Json {
        output.data(&json)?;
        return Ok(());
    }

    output.print("")?;
    output.header("Loro CLI Usage Statistics")?;
    output.muted(&"═".repeat(50))?;

    if let Some(api) = &stats.api {
        print_api(api, output)?;
    }
    if let Some(templates) = &stats.templates {
        print_templates(templates, output)?;
    }
    if !stats.recent.is_empty() {
        print_recent(&stats.recent, output)?;
    }
    if let Some(account) = &stats.account {
        print_account(account, output)?;
    }
    print_cli_info(config, output)?;

    if global.is_verbose() {
        output.print("")?;
        output.print(&output.paint("Detailed Statistics:", Paint::Bold))?;
        output.muted(&json)?;
    }

    Ok(())
}

fn section(title: &str, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.print(&output.paint(title, Paint::Bold))?;
    Ok(())
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".into())
}

fn print_api(api: &ApiUsage, output: &OutputManager) -> CliResult<()> {
    section("API Usage:", output)?;
    let green = |v: String| output.paint(&v, Paint::Green);
    output.print(&format!(
        "  Total API calls: {}",
        green(api.total_calls.unwrap_or(0).to_string())
    ))?;
    output.print(&format!(
        "  Templates rendered: {}",
        green(api.templates_rendered.unwrap_or(0).to_string())
    ))?;
    output.print(&format!(
        "  Data processed: {}",
        green(format_bytes(api.data_processed.unwrap_or(0)))
    ))?;
    output.print(&format!(
        "  Rate limit remaining: {}",
        output.paint(&or_na(api.rate_limit_remaining), Paint::Yellow)
    ))?;
    output.print(&format!(
        "  Rate limit reset: {}",
        output.paint(&or_na(api.rate_limit_reset.as_deref()), Paint::Dimmed)
    ))?;
    Ok(())
}

fn print_templates(templates: &TemplateUsage, output: &OutputManager) -> CliResult<()> {
    section("Template Usage:", output)?;
    let most_used = templates.most_used.as_ref().and_then(|t| t.name.as_deref());
    output.print(&format!(
        "  Most used template: {}",
        output.paint(&or_na(most_used), Paint::Blue)
    ))?;
    output.print(&format!(
        "  Total unique templates: {}",
        output.paint(&templates.unique_count.unwrap_or(0).to_string(), Paint::Green)
    ))?;
    output.print(&format!(
        "  Average render time: {}ms",
        output.paint(&or_na(templates.avg_render_time), Paint::Yellow)
    ))?;
    Ok(())
}

fn print_recent(recent: &[Activity], output: &OutputManager) -> CliResult<()> {
    section("Recent Activity:", output)?;
    for (index, activity) in recent.iter().take(RECENT_LIMIT).enumerate() {
        output.print(&format!(
            "  {}. {} - {}",
            index + 1,
            output.paint(activity.action.as_deref().unwrap_or("unknown"), Paint::Cyan),
            output.paint(&or_na(activity.timestamp.as_deref().map(local_time)), Paint::Dimmed)
        ))?;
        if let Some(label) = activity.template.as_ref().and_then(|t| t.label()) {
            output.print(&format!(
                "     Template: {}",
                output.paint(label, Paint::Blue)
            ))?;
        }
    }
    Ok(())
}

fn print_account(account: &AccountInfo, output: &OutputManager) -> CliResult<()> {
    section("Account Information:", output)?;
    output.print(&format!(
        "  Plan: {}",
        output.paint(account.plan.as_deref().unwrap_or("Free"), Paint::Green)
    ))?;
    output.print(&format!(
        "  API calls this month: {}",
        output.paint(&account.monthly_usage.unwrap_or(0).to_string(), Paint::Yellow)
    ))?;
    let limit = account
        .monthly_limit
        .map(|l| l.to_string())
        .unwrap_or_else(|| "Unlimited".into());
    output.print(&format!(
        "  API call limit: {}",
        output.paint(&limit, Paint::Yellow)
    ))?;

    if let Some(percentage) = account.usage_percentage() {
        output.print(&format!(
            "  Usage percentage: {}",
            output.paint(&format!("{percentage:.1}%"), usage_paint(percentage))
        ))?;
    }
    Ok(())
}

fn print_cli_info(config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    section("CLI Information:", output)?;
    output.print(&format!(
        "  API Endpoint: {}",
        output.paint(&config.api_url, Paint::Blue)
    ))?;
    let key = config.masked_key().unwrap_or_else(|| "***none".into());
    output.print(&format!("  API Key: {}", output.paint(&key, Paint::Dimmed)))?;
    output.print(&format!(
        "  CLI Version: {}",
        output.paint(env!("CARGO_PKG_VERSION"), Paint::Green)
    ))?;
    Ok(())
}

/// Red above 80 %, yellow above 60 %, green otherwise.
fn usage_paint(percentage: f64) -> Paint {
    if percentage > 80.0 {
        Paint::Red
    } else if percentage > 60.0 {
        Paint::Yellow
    } else {
        Paint::Green
    }
}

/// An RFC 3339 timestamp or epoch milliseconds in local time; other strings
/// are shown as is.
fn local_time(raw: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local))
        .ok()
        .or_else(|| {
            raw.parse::<i64>()
                .ok()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|dt| dt.with_timezone(&Local))
        });
    match parsed {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => raw.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_colour_thresholds() {
        assert!(matches!(usage_paint(95.0), Paint::Red));
        assert!(matches!(usage_paint(80.0), Paint::Yellow));
        assert!(matches!(usage_paint(60.5), Paint::Yellow));
        assert!(matches!(usage_paint(60.0), Paint::Green));
        assert!(matches!(usage_paint(12.7), Paint::Green));
    }

    #[test]
    fn missing_values_read_na() {
        assert_eq!(or_na::<u64>(None), "N/A");
        assert_eq!(or_na(Some(245.0)), "245");
        assert_eq!(or_na(Some(4873u64)), "4873");
    }

    #[test]
    fn unparseable_timestamp_is_shown_raw() {
        assert_eq!(local_time("yesterday"), "yesterday");
        assert_ne!(local_time("2024-03-01T12:30:00Z"), "2024-03-01T12:30:00Z");
    }

    #[test]
    fn epoch_millis_are_formatted() {
        let formatted = local_time("1709296200000");
        assert_ne!(formatted, "1709296200000");
        assert!(formatted.starts_with("2024-03-0"));
        assert_eq!(local_time("1709296200000"), local_time("2024-03-01T12:30:00Z"));
    }
}
