//! The call driver: schema-directed marshaling around one remote function.

use bytes::Bytes;
use log::{debug, trace};
use remoteapi_core::{RemoteApi, SchemaCodec, Value};

use crate::transport::{Connection, RemoteFunction};
use crate::{Error, Result};

/// A prepared remote function together with its parameter schema.
///
/// Each invocation casts the caller's inputs, hands them to the transport
/// in wire form, and casts the transport's raw result back. Failures are
/// returned immediately; nothing is retried.
pub struct Call {
    function: Box<dyn RemoteFunction>,
    api: RemoteApi,
}

impl Call {
    /// Prepare `name` and ask the transport for its schema.
    pub fn discover(conn: &dyn Connection, name: &str) -> Result<Self> {
        let function = conn.prepare(name)?;
        let api = function.describe()?;
        debug!("discovered {} with {} schema entries", name, api.len());
        Ok(Self { function, api })
    }

    /// Prepare `name` with a known schema, skipping discovery.
    pub fn with_api(conn: &dyn Connection, name: &str, api: RemoteApi) -> Result<Self> {
        let mut function = conn.prepare(name)?;
        function.set_api(api.clone())?;
        Ok(Self { function, api })
    }

    /// Prepare `name` with a schema previously written by [`Call::cache`].
    pub fn from_cache(
        conn: &dyn Connection,
        name: &str,
        codec: &dyn SchemaCodec,
        bytes: &[u8],
    ) -> Result<Self> {
        let api = codec.decode(bytes)?;
        debug!("loaded cached {} schema for {}", codec.media_type(), name);
        Self::with_api(conn, name, api)
    }

    /// Encode this call's schema for later use with [`Call::from_cache`].
    pub fn cache(&self, codec: &dyn SchemaCodec) -> Result<Bytes> {
        Ok(codec.encode(&self.api)?)
    }

    pub fn name(&self) -> &str {
        self.function.name()
    }

    pub fn api(&self) -> &RemoteApi {
        &self.api
    }

    /// Run the function once.
    ///
    /// `params` is a record of input values and input tables, raw or typed.
    /// Returns the result record with outputs and tables cast to their
    /// declared types.
    ///
    /// # Errors
    ///
    /// - `Schema` for a missing mandatory input, output or table, or any
    ///   cast failure
    /// - whatever the transport reports
    pub fn invoke(&mut self, params: &Value) -> Result<Value> {
        let typed = self.api.cast_input_values(params)?;
        let wire = self.api.to_wire_input_values(&typed)?;

        let mut staged = 0usize;
        for entry in self.api.input_values() {
            if let Some(value) = wire.get(entry.name()) {
                self.function.set_param(entry.name(), value.clone())?;
                staged += 1;
            }
        }
        for table in self.api.tables() {
            if let Some(rows) = params.get(table.name()) {
                let rows = table.to_wire(&table.cast(rows)?)?;
                self.function.set_param(table.name(), rows)?;
                staged += 1;
            } else {
                trace!("no rows supplied for table '{}'", table.name());
            }
        }

        debug!("invoking {} with {} parameters", self.function.name(), staged);
        let raw = self.function.invoke()?;
        if !raw.is_map() {
            return Err(Error::transport(format!(
                "{} returned {}, expected a record",
                self.function.name(),
                raw.kind()
            )));
        }

        let outputs = self.api.cast_output_values(&raw)?;
        Ok(self.api.cast_tables(&outputs)?)
    }
}

impl std::fmt::Debug for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Call")
            .field("name", &self.function.name())
            .field("api", &self.api)
            .finish()
    }
}
