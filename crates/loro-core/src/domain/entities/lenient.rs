//! Forgiving field decoders for service payloads.
//!
//! The service is loosely typed: IDs and timestamps arrive as strings or
//! numbers, counters occasionally as strings, and any field may be absent
//! or `null`. These decoders never fail on a shape mismatch; a value they
//! cannot use becomes `None` (or an empty list). Pair each with
//! `#[serde(default)]` so a missing field takes the same path.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings, numbers and booleans as text.
pub(crate) fn string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(de)?.and_then(scalar_text))
}

/// Non-negative integers, floats (truncated) and numeric strings.
pub(crate) fn count<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u64>, D::Error> {
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Any JSON number, or a string holding one.
pub(crate) fn number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// An array of scalars as text; anything else is an empty list.
pub(crate) fn strings<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    })
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "super::string")]
        text: Option<String>,
        #[serde(deserialize_with = "super::count")]
        total: Option<u64>,
        #[serde(deserialize_with = "super::number")]
        ratio: Option<f64>,
        #[serde(deserialize_with = "super::strings")]
        tags: Vec<String>,
    }

    fn decode(value: serde_json::Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numbers_become_text() {
        assert_eq!(decode(json!({"text": 7})).text.as_deref(), Some("7"));
        assert_eq!(decode(json!({"text": "abc"})).text.as_deref(), Some("abc"));
    }

    #[test]
    fn missing_null_and_objects_are_none() {
        assert!(decode(json!({})).text.is_none());
        assert!(decode(json!({"text": null})).text.is_none());
        assert!(decode(json!({"text": {"nested": 1}})).text.is_none());
    }

    #[test]
    fn counts_accept_strings_and_floats() {
        assert_eq!(decode(json!({"total": "42"})).total, Some(42));
        assert_eq!(decode(json!({"total": 12.9})).total, Some(12));
        assert_eq!(decode(json!({"total": -3})).total, None);
        assert_eq!(decode(json!({"total": "many"})).total, None);
    }

    #[test]
    fn numbers_accept_strings() {
        assert_eq!(decode(json!({"ratio": "245.5"})).ratio, Some(245.5));
        assert_eq!(decode(json!({"ratio": 3})).ratio, Some(3.0));
    }

    #[test]
    fn tag_lists_keep_scalars_only() {
        assert_eq!(
            decode(json!({"tags": ["a", 2, null, {"x": 1}]})).tags,
            vec!["a", "2"]
        );
        assert!(decode(json!({"tags": "a,b"})).tags.is_empty());
    }
}
