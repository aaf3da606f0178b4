//! Helpers for the loosely shaped bodies the service returns.
//!
//! Several endpoints wrap their payload in one of a few field names and
//! fall back to the bare body, so fields are picked the way a JavaScript
//! `a || b || body` chain would.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// JavaScript truthiness of a JSON value.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First truthy field among `keys`, otherwise the whole body.
pub(crate) fn pick_field(body: Value, keys: &[&str]) -> Value {
    if let Value::Object(map) = &body {
        if let Some(found) = keys
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|value| is_truthy(value))
        {
            return found.clone();
        }
    }
    body
}

/// Template text out of a picked value. Non-string payloads are kept as JSON.
pub(crate) fn into_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Decode a body as JSON, keeping anything else as a plain string.
pub(crate) fn parse_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

/// The `error` field of a failure body, or the status reason.
pub(crate) fn error_message(body: &Value, reason: &str) -> String {
    serde_json::from_value::<ErrorBody>(body.clone())
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn picks_first_truthy_field() {
        let body = json!({"output": "", "result": "rendered"});
        assert_eq!(pick_field(body, &["output", "result"]), json!("rendered"));
    }

    #[test]
    fn falls_back_to_whole_body() {
        let body = json!({"total": 0});
        assert_eq!(pick_field(body.clone(), &["result"]), body);
        assert_eq!(pick_field(json!("plain"), &["result"]), json!("plain"));
    }

    #[test]
    fn zero_and_null_are_falsy() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&Value::Null));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!(0.5)));
    }

    #[test]
    fn non_json_body_becomes_string() {
        assert_eq!(parse_body("Hello Ada".into()), json!("Hello Ada"));
        assert_eq!(parse_body("{\"a\":1}".into()), json!({"a": 1}));
    }

    #[test]
    fn error_message_prefers_body_field() {
        assert_eq!(error_message(&json!({"error": "bad data"}), "Bad Request"), "bad data");
        assert_eq!(error_message(&json!("oops"), "Bad Request"), "Bad Request");
        assert_eq!(into_text(json!({"a": 1})), "{\"a\":1}");
    }
}
