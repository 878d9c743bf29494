//! Schema codecs.

use bytes::Bytes;

use crate::{Error, RemoteApi};

/// Codec for converting a [`RemoteApi`] to and from a wire format.
///
/// A schema is typically produced once by a transport that can describe a
/// remote call, then stored alongside the call definition and decoded again
/// on later runs. The codec is the storage format for that round trip.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn SchemaCodec>`.
pub trait SchemaCodec: Send + Sync {
    /// Decode raw bytes into a schema.
    fn decode(&self, bytes: &[u8]) -> Result<RemoteApi, Error>;

    /// Encode a schema into raw bytes.
    fn encode(&self, api: &RemoteApi) -> Result<Bytes, Error>;

    /// MIME type of the encoded form.
    fn media_type(&self) -> &'static str;
}

impl<T: SchemaCodec + ?Sized> SchemaCodec for &T {
    fn decode(&self, bytes: &[u8]) -> Result<RemoteApi, Error> {
        (**self).decode(bytes)
    }

    fn encode(&self, api: &RemoteApi) -> Result<Bytes, Error> {
        (**self).encode(api)
    }

    fn media_type(&self) -> &'static str {
        (**self).media_type()
    }
}

impl<T: SchemaCodec + ?Sized> SchemaCodec for Box<T> {
    fn decode(&self, bytes: &[u8]) -> Result<RemoteApi, Error> {
        (**self).decode(bytes)
    }

    fn encode(&self, api: &RemoteApi) -> Result<Bytes, Error> {
        (**self).encode(api)
    }

    fn media_type(&self) -> &'static str {
        (**self).media_type()
    }
}
