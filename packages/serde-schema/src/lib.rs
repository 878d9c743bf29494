//! Serde integration for remote-call schemas.
//!
//! This layer moves schemas and typed values in and out of JSON:
//! - `from_json_str` / `to_json_string`: the schema wire format
//! - `JsonCodec`: a `SchemaCodec` over that format
//! - `Value` <-> `serde_json::Value` conversions
//!
//! # Example
//!
//! ```rust
//! use remoteapi_serde::{from_json_str, to_json_string};
//!
//! let text = r#"[{"type":"int","name":"N","direction":"input","optional":false}]"#;
//! let api = from_json_str(text).unwrap();
//!
//! assert_eq!(api.input_values().len(), 1);
//! assert_eq!(to_json_string(&api).unwrap(), text);
//! ```

mod codec;
mod convert;
mod schema;

pub use codec::JsonCodec;
pub use convert::{json_to_value, keyed_to_json, value_to_json};
pub use schema::{
    from_json, from_json_slice, from_json_str, node_to_json, to_json, to_json_string,
    to_json_string_pretty, Schema,
};

// Re-export core types for convenience
pub use remoteapi_core::{
    Direction, Element, ElementType, Error, Parameter, Record, RemoteApi, SchemaCodec,
    SchemaNode, Struct, Table, Value,
};
