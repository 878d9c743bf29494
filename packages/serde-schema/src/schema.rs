//! JSON wire format for remote-call schemas.
//!
//! A schema is a JSON array of entry objects, each carrying a `type`
//! discriminator:
//!
//! ```json
//! [
//!   {"type": "int", "name": "N", "direction": "input", "optional": false},
//!   {"type": "struct", "name": "RESULT", "direction": "output", "optional": false,
//!    "members": [{"type": "float", "name": "AMT"}, {"type": "bool", "name": "OK"}]},
//!   {"type": "table", "name": "ITEMS", "direction": "table", "optional": true,
//!    "members": [{"type": "date", "name": "BUDAT"}]}
//! ]
//! ```

use log::debug;
use remoteapi_core::{Error, RemoteApi, SchemaNode};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::convert::{json_to_value, keyed_to_json};

/// Parse a schema from JSON text.
///
/// # Errors
///
/// `InvalidJson` for malformed text or a non-array document; otherwise the
/// first entry error, wrapped with the entry's index.
pub fn from_json_str(s: &str) -> Result<RemoteApi, Error> {
    let json: serde_json::Value =
        serde_json::from_str(s).map_err(|e| Error::invalid_json(e.to_string()))?;
    from_json(json)
}

/// Parse a schema from JSON bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<RemoteApi, Error> {
    let json: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| Error::invalid_json(e.to_string()))?;
    from_json(json)
}

/// Decode a schema from an already-parsed JSON document.
pub fn from_json(json: serde_json::Value) -> Result<RemoteApi, Error> {
    if !json.is_array() {
        return Err(Error::invalid_json("schema document must be a JSON array"));
    }
    RemoteApi::from_value(&json_to_value(json))
}

/// Encode a schema as a JSON array, one object per entry, in insertion order.
pub fn to_json(api: &RemoteApi) -> serde_json::Value {
    serde_json::Value::Array(api.iter().map(node_to_json).collect())
}

pub fn to_json_string(api: &RemoteApi) -> Result<String, Error> {
    serde_json::to_string(&Schema(api)).map_err(|e| Error::invalid_json(e.to_string()))
}

pub fn to_json_string_pretty(api: &RemoteApi) -> Result<String, Error> {
    serde_json::to_string_pretty(&Schema(api)).map_err(|e| Error::invalid_json(e.to_string()))
}

/// One entry's JSON object.
///
/// Member objects are written `{type, name}`, the same order as entries.
pub fn node_to_json(node: &SchemaNode) -> serde_json::Value {
    let mut json = keyed_to_json(&node.to_keyed());
    let members = match node {
        SchemaNode::Struct(s) => Some(s.members()),
        SchemaNode::Table(t) => Some(t.members()),
        SchemaNode::Parameter(_) => None,
    };
    if let (Some(members), Some(object)) = (members, json.as_object_mut()) {
        let members = members.iter().map(|m| keyed_to_json(&m.to_keyed())).collect();
        object.insert("members".to_string(), serde_json::Value::Array(members));
    }
    json
}

/// Serialize adapter, for embedding a schema in other serde structures.
///
/// ```rust
/// use remoteapi_core::{ElementType, Parameter, RemoteApi};
/// use remoteapi_serde::Schema;
///
/// let api = RemoteApi::new().with(Parameter::input(ElementType::Int, "N", false).unwrap());
/// let json = serde_json::to_string(&Schema(&api)).unwrap();
/// assert!(json.starts_with(r#"[{"type":"int""#));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Schema<'a>(pub &'a RemoteApi);

impl Serialize for Schema<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        debug!("serializing remote api with {} entries", self.0.len());
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for node in self.0 {
            seq.serialize_element(&node_to_json(node))?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remoteapi_core::{Direction, Element, ElementType, Parameter, Struct, Table};
    use serde_json::json;

    fn sample() -> RemoteApi {
        RemoteApi::new()
            .with(Parameter::input(ElementType::Int, "N", false).unwrap())
            .with(
                Struct::new(
                    "RESULT",
                    Direction::Output,
                    false,
                    vec![
                        Element::new(ElementType::Float, "AMT").unwrap(),
                        Element::new(ElementType::Bool, "OK").unwrap(),
                    ],
                )
                .unwrap(),
            )
            .with(
                Table::with_members(
                    "ITEMS",
                    true,
                    vec![Element::new(ElementType::Date, "BUDAT").unwrap()],
                )
                .unwrap(),
            )
    }

    #[test]
    fn encodes_every_variant() {
        assert_eq!(
            to_json(&sample()),
            json!([
                {"type": "int", "name": "N", "direction": "input", "optional": false},
                {"type": "struct", "name": "RESULT", "direction": "output", "optional": false,
                 "members": [{"type": "float", "name": "AMT"}, {"type": "bool", "name": "OK"}]},
                {"type": "table", "name": "ITEMS", "direction": "table", "optional": true,
                 "members": [{"type": "date", "name": "BUDAT"}]}
            ])
        );
    }

    #[test]
    fn string_output_keeps_field_order() {
        let api = RemoteApi::new().with(
            Struct::new(
                "S",
                Direction::Input,
                true,
                vec![Element::new(ElementType::Week, "KW").unwrap()],
            )
            .unwrap(),
        );
        assert_eq!(
            to_json_string(&api).unwrap(),
            r#"[{"type":"struct","name":"S","direction":"input","optional":true,"members":[{"type":"week","name":"KW"}]}]"#
        );
    }

    #[test]
    fn round_trips_through_text() {
        let api = sample();
        let text = to_json_string_pretty(&api).unwrap();
        assert_eq!(from_json_str(&text).unwrap(), api);
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(matches!(
            from_json_str("[{"),
            Err(Error::InvalidJson { .. })
        ));
    }

    #[test]
    fn rejects_non_array_document() {
        assert!(matches!(
            from_json_str(r#"{"type": "int"}"#),
            Err(Error::InvalidJson { .. })
        ));
    }

    #[test]
    fn empty_array_is_an_empty_schema() {
        assert!(from_json_str("[]").unwrap().is_empty());
    }
}
