//! Implementation of the `loro validate` command.

use tracing::instrument;

use loro_adapters::LocalFilesystem;
use loro_core::{
    application::{ValidationReport, ValidationService},
    domain::TemplateStats,
};

use crate::{
    cli::{ServiceArgs, ValidateArgs, global::GlobalArgs},
    commands::template_service,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, Paint},
};

/// Execute the `loro validate` command.
///
/// 1. Run the local syntax checks; any diagnostic fails the command
/// 2. With `--data`, prove the sample data parses
/// 3. With `--remote`, ask the service for its verdict
/// 4. With `-v`, print template statistics
#[instrument(skip_all, fields(template = %args.template.display()))]
pub fn execute(
    args: ValidateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let validator = ValidationService::new(Box::new(LocalFilesystem::new()));

    let spinner = output.spinner("Validating template...");
    let (template, report) = match validator.validate_file(&args.template) {
        Ok(checked) => checked,
        Err(e) => {
            spinner.fail("Validation failed");
            return Err(e.into());
        }
    };

    if !report.is_valid() {
        spinner.fail("Template validation failed");
        print_problems(
            report.diagnostics.iter().map(ToString::to_string),
            output,
        )?;
        return Err(CliError::ValidationFailed {
            count: report.diagnostics.len(),
        });
    }
    spinner.succeed("Template syntax is valid");

    if let Some(data) = &args.data {
        let spinner = output.spinner("Testing template with provided data...");
        match validator.load_sample_data(data) {
            Ok(_) => spinner.succeed("Template test successful"),
            Err(e) => {
                spinner.fail("Template test failed");
                return Err(e.into());
            }
        }
    }

    if args.remote {
        validate_remote(&template, config, output)?;
    }

    if global.is_verbose() {
        print_stats(&report, output)?;
    }

    Ok(())
}

fn validate_remote(template: &str, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let service = template_service(config, &ServiceArgs::default())?;

    let spinner = output.spinner("Validating with Loro service...");
    let verdict = match service.validate_remote(template) {
        Ok(verdict) => verdict,
        Err(e) => {
            spinner.fail("Remote validation failed");
            return Err(e.into());
        }
    };

    if verdict.is_valid() {
        spinner.succeed(
            verdict
                .message
                .as_deref()
                .unwrap_or("Loro service accepted the template"),
        );
        return Ok(());
    }

    spinner.fail("Remote validation failed");
    let mut problems = verdict.errors.clone();
    if problems.is_empty() {
        problems.extend(verdict.message.clone());
    }
    print_problems(problems.iter().cloned(), output)?;
    Err(CliError::ValidationFailed {
        count: problems.len().max(1),
    })
}

fn print_problems(
    problems: impl Iterator<Item = String>,
    output: &OutputManager,
) -> CliResult<()> {
    // Diagnostics are the result of the command, so quiet mode keeps them.
    output.print("")?;
    output.data(&output.paint("Validation errors:", Paint::Red))?;
    for (index, problem) in problems.enumerate() {
        output.data(&output.paint(&format!("  {}. {problem}", index + 1), Paint::Red))?;
    }
    Ok(())
}

fn print_stats(report: &ValidationReport, output: &OutputManager) -> CliResult<()> {
    let TemplateStats {
        size,
        lines,
        variables,
        loops,
        conditions,
    } = report.stats;

    output.print("")?;
    output.muted("Template Statistics:")?;
    output.print(&format!("  Size: {size} bytes"))?;
    output.print(&format!("  Lines: {lines}"))?;
    output.print(&format!("  Variables: {variables}"))?;
    output.print(&format!("  Loops: {loops}"))?;
    output.print(&format!("  Conditions: {conditions}"))?;
    Ok(())
}
