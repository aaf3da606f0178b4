//! Integration tests for loro-core.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use loro_core::{
    application::ApplicationError,
    domain::{Received, RemoteValidation, TransformRequest, syntax},
    prelude::*,
};

#[derive(Clone, Default)]
struct FakeFs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl FakeFs {
    fn with(files: &[(&str, &str)]) -> Self {
        let fs = Self::default();
        for (path, content) in files {
            fs.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), content.to_string());
        }
        fs
    }

    fn read(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }
}

impl Filesystem for FakeFs {
    fn read_to_string(&self, path: &Path) -> LoroResult<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::FileNotFound {
                    path: path.to_path_buf(),
                }
                .into()
            })
    }

    fn write_file(&self, path: &Path, content: &str) -> LoroResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, _path: &Path) -> LoroResult<()> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

/// Echoes the request back so tests can see what was sent.
#[derive(Clone, Default)]
struct EchoApi {
    requests: Arc<Mutex<Vec<TransformRequest>>>,
}

impl TemplateApi for EchoApi {
    fn transform(&self, request: &TransformRequest) -> LoroResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(json!({"template": request.template, "data": request.data}))
    }

    fn get_template(&self, id: &str) -> LoroResult<String> {
        Err(ApplicationError::NotFound {
            message: format!("Template not found: {id}"),
        }
        .into())
    }

    fn list_templates(&self, _query: &ListQuery) -> LoroResult<Received<Vec<TemplateSummary>>> {
        Ok(Received::local(Vec::new()))
    }

    fn validate_template(&self, _template: &str) -> LoroResult<RemoteValidation> {
        Ok(RemoteValidation::default())
    }

    fn render_by_guid(&self, _guid: &str, data: &Value) -> LoroResult<Value> {
        Ok(data.clone())
    }

    fn usage_stats(&self) -> LoroResult<Received<UsageStats>> {
        Ok(Received::local(UsageStats::default()))
    }
}

#[test]
fn test_transform_local_file_with_json_data() {
    let fs = FakeFs::with(&[
        ("invoice.sbn", "Total: {{ total }}"),
        ("data.json", "{\"total\": 42}"),
    ]);
    let api = EchoApi::default();
    let service = TemplateService::new(Box::new(api.clone()), Box::new(fs.clone()));

    let data = service
        .load_data(Path::new("data.json"), None)
        .expect("data loads");
    let outcome = service
        .transform(
            &TemplateSource::LocalFile("invoice.sbn".into()),
            data,
            TransformOptions::default(),
        )
        .expect("transform succeeds");

    let sent = api.requests.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].template, "Total: {{ total }}");
    assert_eq!(sent[0].data, json!({"total": 42}));
    assert!(outcome.output.contains("\"total\": 42"));

    service
        .write_output(Path::new("out.json"), &outcome.output)
        .unwrap();
    assert_eq!(fs.read("out.json").as_deref(), Some(outcome.output.as_str()));
}

#[test]
fn test_missing_template_file_is_not_found() {
    let service = TemplateService::new(Box::new(EchoApi::default()), Box::new(FakeFs::default()));
    let err = service
        .transform(
            &TemplateSource::LocalFile("nope.sbn".into()),
            json!({}),
            TransformOptions::default(),
        )
        .unwrap_err();
    assert_eq!(err.category(), loro_core::error::ErrorCategory::NotFound);
}

#[test]
fn test_unknown_template_id_surfaces_service_message() {
    let service = TemplateService::new(Box::new(EchoApi::default()), Box::new(FakeFs::default()));
    let err = service
        .transform(
            &TemplateSource::TemplateId("t-404".into()),
            json!({}),
            TransformOptions::default(),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "Template not found: t-404");
}

#[test]
fn test_validate_file_end_to_end() {
    let fs = FakeFs::with(&[("loop.sbn", "{{for item in items}}\n{{ item.name }}")]);
    let (_, report) = ValidationService::new(Box::new(fs))
        .validate_file(Path::new("loop.sbn"))
        .unwrap();

    let messages: Vec<String> = report.diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["Line 1: Possible unclosed for loop"]);
    assert_eq!(report.stats.loops, 1);
    assert_eq!(report.stats.variables, 1);
}

#[test]
fn test_checker_is_stateless_across_threads() {
    let template = "{{if a}}\n{{{{ b }}}}";
    let expected = syntax::check(template);
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || syntax::check(template)))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
