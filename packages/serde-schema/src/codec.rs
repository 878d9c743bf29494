//! JSON schema codec.

use bytes::Bytes;
use remoteapi_core::{Error, RemoteApi, SchemaCodec};

use crate::schema::{from_json_slice, to_json};

/// A codec that stores schemas as JSON arrays.
///
/// # Example
///
/// ```rust
/// use remoteapi_core::{Element, ElementType, Parameter, RemoteApi, SchemaCodec, Table};
/// use remoteapi_serde::JsonCodec;
///
/// let api = RemoteApi::new()
///     .with(Parameter::input(ElementType::Int, "N", false).unwrap())
///     .with(
///         Table::with_members(
///             "ITEMS",
///             true,
///             vec![Element::new(ElementType::Date, "BUDAT").unwrap()],
///         )
///         .unwrap(),
///     );
///
/// let bytes = JsonCodec.encode(&api).unwrap();
/// let decoded = JsonCodec.decode(&bytes).unwrap();
///
/// assert_eq!(decoded, api);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl SchemaCodec for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<RemoteApi, Error> {
        from_json_slice(bytes)
    }

    fn encode(&self, api: &RemoteApi) -> Result<Bytes, Error> {
        let bytes = serde_json::to_vec(&to_json(api)).map_err(|e| Error::InvalidJson {
            message: e.to_string(),
        })?;
        Ok(Bytes::from(bytes))
    }

    fn media_type(&self) -> &'static str {
        "application/json"
    }
}
