//! The Value type - raw wire data and cast results.
//!
//! A remote system hands back loosely typed records, mostly strings. Casting
//! through a schema turns those into the richer variants here (dates,
//! intervals, binary). Both sides of the cast use the same tree.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// A record: field name to value.
pub type Record = BTreeMap<String, Value>;

/// A tree-shaped value flowing through a remote call.
///
/// # Design Notes
///
/// - Uses `BTreeMap` for deterministic ordering (comparison, stable output)
/// - `Time` is an elapsed interval, not a wall-clock time
/// - `Week` holds the Monday of the ISO week it names
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value (e.g. the all-zero "no date" sentinel).
    #[default]
    Null,
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Binary data decoded from a hex wire value.
    Bytes(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Elapsed-time interval.
    Time(Duration),
    /// Date and time without zone.
    Timestamp(NaiveDateTime),
    /// ISO week, represented by its Monday.
    Week(NaiveDate),
    /// Ordered sequence of values (table rows, schema members).
    Array(Vec<Value>),
    /// Key-value map with string keys (a record).
    Map(Record),
}

/// The runtime kind of a [`Value`], used by key whitelists and errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Bytes,
    Date,
    Time,
    Timestamp,
    Week,
    Array,
    Map,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::Date => "date",
            ValueKind::Time => "time",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Week => "week",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Date(_) => ValueKind::Date,
            Value::Time(_) => ValueKind::Time,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::Week(_) => ValueKind::Week,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Record> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Look up a direct child of a map.
    ///
    /// Returns `None` for non-map values and missing keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Short human-readable rendering for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => format!("{:?}", s),
            other => other.kind().to_string(),
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Time(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(1i64).kind(), ValueKind::Integer);
        assert_eq!(Value::from(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::from("x").kind(), ValueKind::String);
        assert_eq!(Value::from(vec![0xABu8]).kind(), ValueKind::Bytes);
        assert_eq!(Value::array().kind(), ValueKind::Array);
        assert_eq!(Value::map().kind(), ValueKind::Map);
    }

    #[test]
    fn get_looks_into_maps_only() {
        let record = Value::Map(btree! {
            "AMT".to_string() => Value::from("12.5"),
        });
        assert_eq!(record.get("AMT"), Some(&Value::from("12.5")));
        assert_eq!(record.get("OK"), None);
        assert_eq!(Value::from("AMT").get("AMT"), None);
    }

    #[test]
    fn option_converts_to_null() {
        let none: Option<i64> = None;
        assert_eq!(Value::from(none), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Integer(3));
    }

    #[test]
    fn describe_quotes_strings() {
        assert_eq!(Value::from("abc").describe(), "\"abc\"");
        assert_eq!(Value::from(7i64).describe(), "7");
        assert_eq!(Value::array().describe(), "array");
    }
}
