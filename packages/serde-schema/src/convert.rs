//! Conversions between Value and serde_json.

use base64::Engine;
use chrono::Datelike;
use remoteapi_core::{KeyedStore, Value};

/// Convert our Value to serde_json::Value.
///
/// Typed variants have no JSON counterpart and become strings: bytes are
/// base64, dates `YYYY-MM-DD`, intervals `HH:MM:SS`, timestamps
/// `YYYY-MM-DDTHH:MM:SS` and weeks `YYYY-Www`.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(b) => {
            serde_json::Value::String(base64::engine::general_purpose::STANDARD.encode(b))
        }
        Value::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
        Value::Time(t) => {
            let total = t.num_seconds();
            let sign = if total < 0 { "-" } else { "" };
            let total = total.abs();
            serde_json::Value::String(format!(
                "{}{:02}:{:02}:{:02}",
                sign,
                total / 3600,
                (total % 3600) / 60,
                total % 60
            ))
        }
        Value::Timestamp(ts) => {
            serde_json::Value::String(ts.format("%Y-%m-%dT%H:%M:%S").to_string())
        }
        Value::Week(monday) => {
            let week = monday.iso_week();
            serde_json::Value::String(format!("{:04}-W{:02}", week.year(), week.week()))
        }
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(value_to_json).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // Fallback for very large numbers
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}

/// Convert a KeyedStore to a JSON object, keeping insertion order.
pub fn keyed_to_json(store: &KeyedStore) -> serde_json::Value {
    serde_json::Value::Object(
        store
            .iter()
            .map(|(k, v)| (k.to_string(), value_to_json(v)))
            .collect(),
    )
}
