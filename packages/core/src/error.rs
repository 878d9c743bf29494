//! Error types for the schema layer.

use crate::value::{Value, ValueKind};

/// Result alias used throughout the schema layer.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while building, decoding or casting through a schema.
///
/// Every error is surfaced to the caller immediately. Nothing in this crate
/// retries, and a failed cast aborts the whole batch.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A key contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid key '{key}': only letters, digits, '_' and '-' are allowed")]
    InvalidKey { key: String },

    /// A key is syntactically valid but not permitted for this node.
    #[error("unknown key '{key}' for {node}")]
    UnknownKey { key: String, node: &'static str },

    /// The value's kind is not in the node's permitted kinds.
    #[error("{kind} value is not permitted for key '{key}' of {node}")]
    InvalidValueType {
        key: String,
        kind: ValueKind,
        node: &'static str,
    },

    /// A constructor or setter received a value violating a static invariant.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A decoded node lacks a field its variant requires.
    #[error("missing field '{field}' in {node} definition")]
    MissingField {
        field: &'static str,
        node: &'static str,
    },

    /// A schema entry has no `type` discriminator.
    #[error("schema entry has no 'type' discriminator")]
    MissingType,

    /// A mandatory member or value had no key in the data being cast.
    #[error("element '{element}' is missing from {container}")]
    ArrayElementMissing { element: String, container: String },

    /// A wire value could not be parsed into its declared type.
    #[error("cannot cast '{element}': expected {expected}, got {found}")]
    Cast {
        element: String,
        expected: &'static str,
        found: String,
    },

    /// Input is not valid JSON or has the wrong top-level shape.
    #[error("invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Decoding the schema entry at `index` failed.
    #[error("schema entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn missing_element(element: impl Into<String>, container: impl Into<String>) -> Self {
        Error::ArrayElementMissing {
            element: element.into(),
            container: container.into(),
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        Error::InvalidJson {
            message: message.into(),
        }
    }

    pub(crate) fn cast(element: &str, expected: &'static str, found: &Value) -> Self {
        Error::Cast {
            element: element.to_string(),
            expected,
            found: found.describe(),
        }
    }

    /// Wrap an error with the index of the schema entry that produced it.
    pub fn in_entry(self, index: usize) -> Self {
        Error::Entry {
            index,
            source: Box::new(self),
        }
    }

    /// The innermost error, with all `Entry` context removed.
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::Entry { source, .. } = current {
            current = source;
        }
        current
    }
}
