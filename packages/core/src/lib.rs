//! Remote-call schema and typed marshaling.
//!
//! This crate describes the parameter surface of a remote procedure and uses
//! that description to cast loosely typed wire data into typed values:
//! - `Value`: the data tree flowing through a call, raw or typed
//! - `KeyedStore`: whitelisted, ordered key/value storage for schema nodes
//! - `Element`, `Parameter`, `Struct`, `Table`: the schema node kinds
//! - `RemoteApi`: every entry of one call, with bulk casting
//! - `SchemaCodec`: a storage format for schemas
//!
//! # Example
//!
//! ```rust
//! use remoteapi_core::{Direction, Element, ElementType, Parameter, RemoteApi, Struct, Value};
//!
//! let api = RemoteApi::new()
//!     .with(Parameter::input(ElementType::Int, "N", false).unwrap())
//!     .with(
//!         Struct::new(
//!             "RESULT",
//!             Direction::Output,
//!             false,
//!             vec![
//!                 Element::new(ElementType::Float, "AMT").unwrap(),
//!                 Element::new(ElementType::Bool, "OK").unwrap(),
//!             ],
//!         )
//!         .unwrap(),
//!     );
//!
//! assert_eq!(api.input_values().len(), 1);
//! assert!(api.cast_output_values(&Value::map()).is_err());
//! ```

pub use bytes::Bytes;

mod api;
mod cast;
mod codec;
mod error;
mod keyed;
pub mod schema;
mod value;

pub use api::RemoteApi;
pub use cast::{cast_value, to_wire_value};
pub use codec::SchemaCodec;
pub use error::{Error, Result};
pub use keyed::{KeyRules, KeyedStore};
pub use schema::{Direction, Element, ElementType, Parameter, SchemaNode, Struct, Table};
pub use value::{Record, Value, ValueKind};
