//! Transport seams: the remote system behind a [`Call`](crate::Call).
//!
//! The library never talks to a remote system itself. A transport adapter
//! implements these traits, and everything it exchanges is untyped wire
//! data: strings, numbers and nested records.

use remoteapi_core::{RemoteApi, Value};

use crate::Result;

/// One prepared remote function.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn RemoteFunction>`.
pub trait RemoteFunction: Send + Sync {
    /// The remote function's name.
    fn name(&self) -> &str;

    /// Ask the remote system for the function's parameter schema.
    fn describe(&self) -> Result<RemoteApi>;

    /// Push a previously stored schema instead of discovering it.
    fn set_api(&mut self, api: RemoteApi) -> Result<()>;

    /// Stage one parameter, in wire form, for the next invocation.
    fn set_param(&mut self, name: &str, value: Value) -> Result<()>;

    /// Execute with the staged parameters.
    ///
    /// Returns the raw result record: output values and tables keyed by name.
    fn invoke(&mut self) -> Result<Value>;
}

/// A connection able to prepare remote functions.
pub trait Connection: Send + Sync {
    fn prepare(&self, name: &str) -> Result<Box<dyn RemoteFunction>>;
}

impl<T: Connection + ?Sized> Connection for &T {
    fn prepare(&self, name: &str) -> Result<Box<dyn RemoteFunction>> {
        (**self).prepare(name)
    }
}

impl<T: Connection + ?Sized> Connection for Box<T> {
    fn prepare(&self, name: &str) -> Result<Box<dyn RemoteFunction>> {
        (**self).prepare(name)
    }
}
