//! Reading data files for transformations and template tests.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{DataFormat, detect_format, parse_data},
    error::{LoroError, LoroResult},
};

/// Read `path` and parse it, detecting the format unless one is given.
///
/// A missing file is reported as `DataFileNotFound`.
pub(crate) fn load_data(
    filesystem: &dyn Filesystem,
    path: &Path,
    format: Option<DataFormat>,
) -> LoroResult<Value> {
    let content = filesystem.read_to_string(path).map_err(|e| match e {
        LoroError::Application(ApplicationError::FileNotFound { path }) => {
            ApplicationError::DataFileNotFound { path }.into()
        }
        other => other,
    })?;

    let format = format.unwrap_or_else(|| detect_format(path, &content));
    debug!(%format, bytes = content.len(), "Parsing data file");

    Ok(parse_data(&content, format)?)
}
