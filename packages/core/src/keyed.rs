//! KeyedStore - an order-preserving, whitelisted key/value bag.
//!
//! Every schema node is written to (and read back from) a `KeyedStore` whose
//! [`KeyRules`] describe which keys and which value kinds it may hold. The
//! rules are immutable constants attached to each node variant.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::value::{Value, ValueKind};

lazy_static! {
    static ref VALID_KEY: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// The keys and value kinds a [`KeyedStore`] accepts.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyRules {
    /// Name of the node kind, used in error messages.
    pub name: &'static str,
    pub keys: &'static [&'static str],
    pub kinds: &'static [ValueKind],
}

impl KeyRules {
    pub fn allows_key(&self, key: &str) -> bool {
        self.keys.contains(&key)
    }

    pub fn allows_kind(&self, kind: ValueKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Ordered mapping from validated keys to values.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyedStore {
    rules: &'static KeyRules,
    entries: Vec<(String, Value)>,
}

impl KeyedStore {
    pub fn new(rules: &'static KeyRules) -> Self {
        Self {
            rules,
            entries: Vec::new(),
        }
    }

    pub fn rules(&self) -> &'static KeyRules {
        self.rules
    }

    pub fn has(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Set `key` to `value`.
    ///
    /// A `Null` value removes the key. An existing key keeps its position.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if the key has characters outside `[A-Za-z0-9_-]`
    /// - `UnknownKey` if the rules do not list the key
    /// - `InvalidValueType` if the rules do not permit the value's kind
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<&mut Self> {
        if !VALID_KEY.is_match(key) {
            return Err(Error::InvalidKey {
                key: key.to_string(),
            });
        }
        if !self.rules.allows_key(key) {
            return Err(Error::UnknownKey {
                key: key.to_string(),
                node: self.rules.name,
            });
        }

        let value = value.into();
        if value.is_null() {
            self.remove(key);
            return Ok(self);
        }
        if !self.rules.allows_kind(value.kind()) {
            return Err(Error::InvalidValueType {
                key: key.to_string(),
                kind: value.kind(),
                node: self.rules.name,
            });
        }

        match self.position(key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
        Ok(self)
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Iterate over present entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The present entries in insertion order.
    pub fn to_map(&self) -> Vec<(String, Value)> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load every entry of a map, validating each key and value.
    pub fn from_entries<I>(rules: &'static KeyRules, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut store = Self::new(rules);
        for (key, value) in entries {
            store.set(&key, value)?;
        }
        Ok(store)
    }

    /// The string at `key`, or `MissingField` when absent.
    pub fn require_str(&self, key: &'static str) -> Result<&str> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(Error::invalid_argument(format!(
                "{} field '{}' must be a string, got {}",
                self.rules.name,
                key,
                other.kind()
            ))),
            None => Err(Error::MissingField {
                field: key,
                node: self.rules.name,
            }),
        }
    }

    /// The bool at `key`, or `MissingField` when absent.
    pub fn require_bool(&self, key: &'static str) -> Result<bool> {
        match self.get(key) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(Error::invalid_argument(format!(
                "{} field '{}' must be a bool, got {}",
                self.rules.name,
                key,
                other.kind()
            ))),
            None => Err(Error::MissingField {
                field: key,
                node: self.rules.name,
            }),
        }
    }

    /// The array at `key`, or `MissingField` when absent.
    pub fn require_array(&self, key: &'static str) -> Result<&[Value]> {
        match self.get(key) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(Error::invalid_argument(format!(
                "{} field '{}' must be an array, got {}",
                self.rules.name,
                key,
                other.kind()
            ))),
            None => Err(Error::MissingField {
                field: key,
                node: self.rules.name,
            }),
        }
    }

    /// Append an entry whose key and kind are known to satisfy the rules.
    ///
    /// Used when a node writes its own fields.
    pub(crate) fn insert_trusted(&mut self, key: &'static str, value: impl Into<Value>) {
        let value = value.into();
        debug_assert!(self.rules.allows_key(key), "{} does not allow '{}'", self.rules.name, key);
        debug_assert!(self.rules.allows_kind(value.kind()));
        self.entries.push((key.to_string(), value));
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static RULES: KeyRules = KeyRules {
        name: "test node",
        keys: &["type", "name", "optional", "members"],
        kinds: &[ValueKind::String, ValueKind::Bool, ValueKind::Array],
    };

    #[test]
    fn set_and_get() {
        let mut store = KeyedStore::new(&RULES);
        store.set("name", "N").unwrap().set("optional", true).unwrap();

        assert!(store.has("name"));
        assert_eq!(store.get("name"), Some(&Value::from("N")));
        assert_eq!(store.get("optional"), Some(&Value::Bool(true)));
        assert_eq!(store.get("type"), None);
    }

    #[test]
    fn preserves_insertion_order() {
        let mut store = KeyedStore::new(&RULES);
        store.set("type", "int").unwrap();
        store.set("name", "N").unwrap();
        store.set("optional", false).unwrap();
        store.set("type", "float").unwrap();

        let keys: Vec<&str> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["type", "name", "optional"]);
        assert_eq!(store.get("type"), Some(&Value::from("float")));
    }

    #[test]
    fn rejects_malformed_key() {
        let mut store = KeyedStore::new(&RULES);
        let err = store.set("na me", "N").unwrap_err();
        assert!(matches!(err, Error::InvalidKey { .. }));

        let err = store.set("", "N").unwrap_err();
        assert!(matches!(err, Error::InvalidKey { .. }));
    }

    #[test]
    fn rejects_unknown_key() {
        let mut store = KeyedStore::new(&RULES);
        let err = store.set("direction", "input").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownKey {
                key: "direction".to_string(),
                node: "test node",
            }
        );
    }

    #[test]
    fn rejects_unlisted_kind() {
        let mut store = KeyedStore::new(&RULES);
        let err = store.set("name", 42i64).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidValueType {
                kind: ValueKind::Integer,
                ..
            }
        ));
    }

    #[test]
    fn null_removes() {
        let mut store = KeyedStore::new(&RULES);
        store.set("name", "N").unwrap();
        store.set("name", Value::Null).unwrap();
        assert!(!store.has("name"));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_returns_old_value() {
        let mut store = KeyedStore::new(&RULES);
        store.set("name", "N").unwrap();
        assert_eq!(store.remove("name"), Some(Value::from("N")));
        assert_eq!(store.remove("name"), None);
    }

    #[test]
    fn to_map_emits_present_keys_only() {
        let mut store = KeyedStore::new(&RULES);
        store.set("name", "N").unwrap();
        store.set("optional", true).unwrap();
        store.remove("name");

        assert_eq!(
            store.to_map(),
            vec![("optional".to_string(), Value::Bool(true))]
        );
    }

    #[test]
    fn require_helpers_report_missing_fields() {
        let store = KeyedStore::new(&RULES);
        assert_eq!(
            store.require_str("name").unwrap_err(),
            Error::MissingField {
                field: "name",
                node: "test node",
            }
        );
        assert!(matches!(
            store.require_bool("optional"),
            Err(Error::MissingField {
                field: "optional",
                ..
            })
        ));
    }

    #[test]
    fn require_helpers_check_kind() {
        let mut store = KeyedStore::new(&RULES);
        store.set("optional", "yes").unwrap();
        assert!(matches!(
            store.require_bool("optional"),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
