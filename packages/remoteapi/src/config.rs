//! Connection properties handed to a transport.

use std::fmt;

use remoteapi_core::{Error as SchemaError, KeyRules, KeyedStore, Value, ValueKind};
use remoteapi_serde::{json_to_value, keyed_to_json};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Result;

static CONFIG_RULES: KeyRules = KeyRules {
    name: "connection config",
    keys: &[
        "host",
        "instance",
        "client",
        "user",
        "password",
        "language",
        "router",
        "trace",
        "message_server",
        "group",
        "system_id",
        "gateway_host",
        "gateway_service",
        "destination",
    ],
    kinds: &[ValueKind::String, ValueKind::Integer, ValueKind::Bool],
};

const REDACTED: &str = "<redacted>";

/// Validated connection properties.
///
/// The library only checks keys and value kinds; the meaning of each
/// property belongs to the transport.
///
/// ```rust
/// use remoteapi::ConnectionConfig;
///
/// let mut config = ConnectionConfig::new();
/// config.set("host", "erp.example.com").unwrap().set("client", "100").unwrap();
///
/// assert_eq!(config.get_str("host"), Some("erp.example.com"));
/// assert!(config.set("port", "3300").is_err());
/// ```
#[derive(Clone, PartialEq)]
pub struct ConnectionConfig {
    store: KeyedStore,
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self {
            store: KeyedStore::new(&CONFIG_RULES),
        }
    }

    /// Set a property. `Null` removes it.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<&mut Self> {
        self.store.set(key, value)?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.store.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.store.get(key).and_then(Value::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.store.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.store.iter()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The properties as a JSON object, in insertion order.
    pub fn to_json(&self) -> serde_json::Value {
        keyed_to_json(&self.store)
    }

    /// Load properties from a JSON object, validating every key.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(object) = json else {
            return Err(SchemaError::invalid_json("connection config must be a JSON object").into());
        };
        let store = KeyedStore::from_entries(
            &CONFIG_RULES,
            object.into_iter().map(|(k, v)| (k, json_to_value(v))),
        )?;
        Ok(Self { store })
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(s)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json())?)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.store.iter() {
            if key == "password" {
                map.entry(&key, &REDACTED);
            } else {
                map.entry(&key, value);
            }
        }
        map.finish()
    }
}

impl Serialize for ConnectionConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConnectionConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(json).map_err(serde::de::Error::custom)
    }
}
