//! Implementation of the `loro remote` command.

use tracing::{debug, instrument};

use loro_core::domain::TemplateSource;

use crate::{
    cli::{RemoteArgs, global::GlobalArgs},
    commands::{template_service, transform},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `loro remote` command.
#[instrument(skip_all, fields(guid = %args.guid))]
pub fn execute(
    args: RemoteArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = template_service(config, &args.service)?;

    if args.show_template {
        let spinner = output.spinner("Fetching template content...");
        match service.fetch_template(&args.guid) {
            Ok(template) => {
                spinner.succeed("Template fetched");
                output.print("")?;
                output.header("--- Template Content ---")?;
                output.print(&template)?;
                output.header("--- End Template ---")?;
                output.print("")?;
            }
            Err(e) => {
                debug!(error = %e, "Template fetch for display failed");
                spinner.warn("Could not fetch template content for display");
            }
        }
    }

    let source = TemplateSource::Guid(args.guid.clone());
    let spinner = output.spinner("Transforming template...");
    let outcome = match transform::run(&service, &source, &args.data, &spinner) {
        Ok((outcome, _)) => {
            spinner.succeed("Template transformed successfully");
            outcome
        }
        Err(e) => {
            spinner.fail("Transformation failed");
            return Err(e.into());
        }
    };

    transform::emit(&service, &outcome, args.data.output.as_deref(), output, false)?;

    if global.is_verbose() {
        let (_, options) = transform::formats(&args.data);
        let data_file = args
            .data
            .data
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".into());

        output.print("")?;
        output.muted("Transformation details:")?;
        output.muted(&format!("- Template GUID: {}", args.guid))?;
        output.muted(&format!("- Input format: {}", options.input_format))?;
        output.muted(&format!("- Output format: {}", options.output_format))?;
        output.muted(&format!("- Data file: {data_file}"))?;
    }

    Ok(())
}
