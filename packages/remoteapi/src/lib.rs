//! Typed remote function calls.
//!
//! A [`Call`] pairs a transport's prepared function with its [`RemoteApi`]
//! schema. Inputs are cast and converted to wire form on the way out, and the
//! raw result is cast back to typed values on the way in.
//!
//! # Example
//!
//! ```rust,ignore
//! use remoteapi::{Call, ConnectionConfig, JsonCodec};
//!
//! let conn = my_transport::connect(&config)?;
//! let mut call = Call::discover(&conn, "BAPI_COMPANYCODE_GETDETAIL")?;
//! std::fs::write("getdetail.json", call.cache(&JsonCodec)?)?;
//!
//! let result = call.invoke(&params)?;
//! ```

mod call;
mod config;
mod error;
mod transport;

pub use call::Call;
pub use config::ConnectionConfig;
pub use error::{Error, Result};
pub use transport::{Connection, RemoteFunction};

// Re-export the schema layers for convenience
pub use remoteapi_core::{
    Direction, Element, ElementType, Parameter, Record, RemoteApi, SchemaCodec, SchemaNode,
    Struct, Table, Value,
};
pub use remoteapi_serde::{from_json_str, to_json_string, JsonCodec};
