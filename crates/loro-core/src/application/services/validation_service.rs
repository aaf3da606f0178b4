//! Validation Service - local template syntax checks.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use super::data_loader;
use crate::{
    application::ports::Filesystem,
    domain::{Diagnostic, TemplateStats, syntax},
    error::LoroResult,
};

/// Outcome of checking one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
    pub stats: TemplateStats,
}

impl ValidationReport {
    /// Check template text that is already in memory.
    pub fn of(template: &str) -> Self {
        Self {
            diagnostics: syntax::check(template),
            stats: TemplateStats::of(template),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Service that reads template files and runs the syntax heuristics.
pub struct ValidationService {
    filesystem: Box<dyn Filesystem>,
}

impl ValidationService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Read and check a template file, returning its text with the report.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn validate_file(&self, path: &Path) -> LoroResult<(String, ValidationReport)> {
        let template = self.filesystem.read_to_string(path)?;
        let report = ValidationReport::of(&template);
        debug!(
            diagnostics = report.diagnostics.len(),
            lines = report.stats.lines,
            "Template checked"
        );
        Ok((template, report))
    }

    /// Check that a sample data file loads, detecting its format.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_sample_data(&self, path: &Path) -> LoroResult<Value> {
        data_loader::load_data(self.filesystem.as_ref(), path, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockFilesystem};
    use crate::domain::DiagnosticKind;

    #[test]
    fn report_collects_diagnostics_and_stats() {
        let report = ValidationReport::of("{{if ready}}\n{{ name }}");
        assert!(!report.is_valid());
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::at_line(1, DiagnosticKind::UnclosedIf)]
        );
        assert_eq!(report.stats.conditions, 1);
        assert_eq!(report.stats.variables, 1);
    }

    #[test]
    fn file_is_read_through_the_port() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok("Hello {{ name }}".into()));

        let (text, report) = ValidationService::new(Box::new(fs))
            .validate_file(Path::new("greeting.sbn"))
            .unwrap();
        assert_eq!(text, "Hello {{ name }}");
        assert!(report.is_valid());
    }

    #[test]
    fn unreadable_file_propagates() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string().returning(|p| {
            Err(ApplicationError::FileNotFound {
                path: p.to_path_buf(),
            }
            .into())
        });

        let err = ValidationService::new(Box::new(fs))
            .validate_file(Path::new("missing.sbn"))
            .unwrap_err();
        assert_eq!(err.to_string(), "File not found: missing.sbn");
    }

    #[test]
    fn broken_sample_data_is_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok("{\"name\": ".into()));

        let err = ValidationService::new(Box::new(fs))
            .load_sample_data(Path::new("sample.json"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON in data file"));
    }
}
