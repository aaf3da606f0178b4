//! Implementation of the `loro transform` command.

use std::path::Path;

use tracing::instrument;

use loro_core::{
    application::{ApplicationError, TemplateService, TransformOptions, TransformOutcome},
    domain::{DataFormat, TemplateSource},
    error::LoroResult,
};

use crate::{
    cli::{DataArgs, TransformArgs, global::GlobalArgs},
    commands::template_service,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, Spinner},
};

/// Execute the `loro transform` command.
#[instrument(skip_all)]
pub fn execute(
    args: TransformArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let source = template_source(&args)?;
    let service = template_service(config, &args.service)?;

    let spinner = output.spinner("Processing template transformation");
    let (outcome, data_size) = match run(&service, &source, &args.data, &spinner) {
        Ok(done) => {
            spinner.succeed("Template transformation completed");
            done
        }
        Err(e) => {
            spinner.fail("Transformation failed");
            return Err(e.into());
        }
    };

    emit(&service, &outcome, args.data.output.as_deref(), output, true)?;

    if global.is_verbose() {
        output.print("")?;
        output.muted("--- Statistics ---")?;
        match (&source, outcome.template_size) {
            (TemplateSource::Guid(guid), _) => output.print(&format!("Template GUID: {guid}"))?,
            (_, Some(size)) => output.print(&format!("Template size: {size} bytes"))?,
            _ => {}
        }
        output.print(&format!("Data size: {data_size} bytes"))?;
        output.print(&format!("Output size: {} bytes", outcome.output.len()))?;
    }

    Ok(())
}

/// GUID first, then template ID, then the local file.
fn template_source(args: &TransformArgs) -> CliResult<TemplateSource> {
    if let Some(guid) = &args.guid {
        return Ok(TemplateSource::Guid(guid.clone()));
    }
    if let Some(id) = &args.template_id {
        return Ok(TemplateSource::TemplateId(id.clone()));
    }
    args.template
        .clone()
        .map(TemplateSource::LocalFile)
        .ok_or_else(|| CliError::Core(ApplicationError::MissingTemplateSource.into()))
}

/// Formats for loading the data file and for the request.
///
/// Without `--input-format` the file's format is detected, while the request
/// still declares `json`.
pub(crate) fn formats(data: &DataArgs) -> (Option<DataFormat>, TransformOptions) {
    let input = data.input_format.map(DataFormat::from);
    let options = TransformOptions {
        input_format: input.unwrap_or_default(),
        output_format: data.format.into(),
    };
    (input, options)
}

/// Load the data and transform it; returns the outcome and the size of the
/// data as serialised JSON.
pub(crate) fn run(
    service: &TemplateService,
    source: &TemplateSource,
    data_args: &DataArgs,
    spinner: &Spinner,
) -> LoroResult<(TransformOutcome, usize)> {
    let (input_format, options) = formats(data_args);

    if data_args.data.is_some() {
        spinner.set_message("Loading data file...");
    }
    let data = service.load_data_or_default(data_args.data.as_deref(), input_format)?;
    let data_size = data.to_string().len();

    spinner.set_message(match source {
        TemplateSource::Guid(_) => "Transforming with remote template...",
        TemplateSource::TemplateId(_) => "Fetching template from Loro service...",
        TemplateSource::LocalFile(_) => "Transforming template...",
    });
    let outcome = service.transform(source, data, options)?;

    Ok((outcome, data_size))
}

/// Write the output to `path`, or print it to stdout.
pub(crate) fn emit(
    service: &TemplateService,
    outcome: &TransformOutcome,
    path: Option<&Path>,
    output: &OutputManager,
    with_header: bool,
) -> CliResult<()> {
    match path {
        Some(path) => {
            service.write_output(path, &outcome.output)?;
            output.success(&format!("Output written to: {}", path.display()))?;
        }
        None => {
            if with_header {
                output.print("")?;
                output.muted("--- Output ---")?;
            }
            output.data(&outcome.output)?;
        }
    }
    Ok(())
}
