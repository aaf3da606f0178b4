//! Decoded payloads that keep their original JSON.

use serde::Serialize;
use serde_json::Value;

/// A service payload decoded into `T`, next to the JSON it came from.
///
/// Decoding is lossy on purpose (unknown fields are skipped, odd shapes
/// become `None`), so `--json` output prints `raw` instead of
/// re-serialising `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Received<T> {
    pub value: T,
    pub raw: Value,
}

impl<T> Received<T> {
    pub fn new(value: T, raw: Value) -> Self {
        Self { value, raw }
    }
}

impl<T: Serialize> Received<T> {
    /// For values built locally; `raw` is their own serialisation.
    pub fn local(value: T) -> Self {
        let raw = serde_json::to_value(&value).unwrap_or(Value::Null);
        Self { value, raw }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn local_values_serialise_themselves() {
        let received = Received::local(vec!["a", "b"]);
        assert_eq!(received.raw, json!(["a", "b"]));
        assert_eq!(received.value.len(), 2);
    }
}
