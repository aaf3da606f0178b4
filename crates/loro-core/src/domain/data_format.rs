//! Data payload formats: detection, parsing and output rendering.
//!
//! The service accepts JSON, XML or plain text data. Only JSON is parsed
//! locally; XML and text are forwarded verbatim as a JSON string and the
//! server does the rest.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::DomainError;

/// Format of a data file or of the transformation output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Json,
    Xml,
    Text,
}

impl DataFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "text" | "txt" => Ok(Self::Text),
            other => Err(DomainError::UnknownFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Guess the format of a data file.
///
/// The extension wins when it is one of `.json`, `.xml` or `.txt`;
/// otherwise the first non-blank character decides.
pub fn detect_format(path: &Path, content: &str) -> DataFormat {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => return DataFormat::Json,
        Some("xml") => return DataFormat::Xml,
        Some("txt") => return DataFormat::Text,
        _ => {}
    }

    let trimmed = content.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        DataFormat::Json
    } else if trimmed.starts_with('<') {
        DataFormat::Xml
    } else {
        DataFormat::Text
    }
}

/// Turn raw file content into the payload sent to the service.
pub fn parse_data(content: &str, format: DataFormat) -> Result<Value, DomainError> {
    match format {
        DataFormat::Json => {
            serde_json::from_str(content).map_err(|e| DomainError::InvalidJson {
                reason: e.to_string(),
            })
        }
        DataFormat::Xml | DataFormat::Text => Ok(Value::String(content.to_string())),
    }
}

/// Render a transformation result for display or for writing to a file.
pub fn format_output(value: &Value, format: DataFormat) -> String {
    match (format, value) {
        (DataFormat::Json, Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => pretty(&parsed),
            Err(_) => raw.clone(),
        },
        (DataFormat::Json, other) => pretty(other),
        (_, Value::String(raw)) => raw.clone(),
        (_, structured @ (Value::Object(_) | Value::Array(_))) => pretty(structured),
        (_, scalar) => scalar.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<DataFormat>().unwrap(), DataFormat::Json);
        assert_eq!("xml".parse::<DataFormat>().unwrap(), DataFormat::Xml);
        assert_eq!("txt".parse::<DataFormat>().unwrap(), DataFormat::Text);
        assert!(matches!(
            "yaml".parse::<DataFormat>(),
            Err(DomainError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn extension_wins_over_content() {
        assert_eq!(
            detect_format(Path::new("data.txt"), "{\"a\": 1}"),
            DataFormat::Text
        );
        assert_eq!(detect_format(Path::new("DATA.XML"), "plain"), DataFormat::Xml);
    }

    #[test]
    fn content_sniffing_without_known_extension() {
        assert_eq!(detect_format(Path::new("data"), "  [1, 2]"), DataFormat::Json);
        assert_eq!(
            detect_format(Path::new("feed.rss"), "<?xml version=\"1.0\"?><a/>"),
            DataFormat::Xml
        );
        assert_eq!(detect_format(Path::new("notes"), "hello"), DataFormat::Text);
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = parse_data("{not json", DataFormat::Json).unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON in data file:"));
    }

    #[test]
    fn xml_is_passed_through_as_string() {
        let value = parse_data("<a>1</a>", DataFormat::Xml).unwrap();
        assert_eq!(value, json!("<a>1</a>"));
    }

    #[test]
    fn json_output_reformats_embedded_json() {
        let out = format_output(&json!("{\"a\":1}"), DataFormat::Json);
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn json_output_keeps_non_json_strings() {
        assert_eq!(format_output(&json!("Hello, Ada"), DataFormat::Json), "Hello, Ada");
    }

    #[test]
    fn text_output_pretty_prints_objects_only() {
        assert_eq!(format_output(&json!("<b/>"), DataFormat::Xml), "<b/>");
        assert_eq!(format_output(&json!([1]), DataFormat::Text), "[\n  1\n]");
        assert_eq!(format_output(&json!(42), DataFormat::Text), "42");
    }
}
