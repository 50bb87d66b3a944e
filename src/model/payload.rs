//! Normalization of the opaque `config` and `connections` payloads.
//!
//! Exporters hand these over either as structured JSON or as a string holding
//! serialized JSON. Everything past this module works on the structured form.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Normalizes a payload to a JSON object.
///
/// Strings are parsed. Anything that is not (or does not parse to) an object
/// yields an empty map instead of an error.
pub fn to_object(raw: &Value) -> Map<String, Value> {
    match raw {
        Value::Object(map) => map.clone(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        },
        _ => Map::new(),
    }
}

/// The payload as the string it would be compared by: the raw text when it
/// arrived as a string, the serialized JSON otherwise.
pub fn payload_string(raw: &Value) -> Cow<'_, str> {
    match raw {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// A serialization that is equal for structurally equal payloads, regardless
/// of key order or whether the payload arrived as a string.
pub fn canonical_string(raw: &Value) -> String {
    let parsed;
    let value = match raw {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(v) => {
                parsed = v;
                &parsed
            }
            Err(_) => return s.clone(),
        },
        other => other,
    };
    canonicalize(value).to_string()
}

/// Rebuilds every object with its keys in sorted order.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// True when a payload is present but cannot be read as an object: a
/// non-blank string that does not parse to one, or a non-object JSON value.
/// `null` counts as absent, not malformed.
pub fn is_malformed(raw: &Value) -> bool {
    match raw {
        Value::Null | Value::Object(_) => false,
        Value::String(s) => {
            !s.trim().is_empty()
                && !matches!(serde_json::from_str::<Value>(s), Ok(Value::Object(_)))
        }
        _ => true,
    }
}
