use remoteapi_core::Error as SchemaError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transport error: {message}")]
    Transport { message: String },
}

impl Error {
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            message: message.into(),
        }
    }

    /// The schema error behind this one, if any.
    pub fn as_schema(&self) -> Option<&SchemaError> {
        match self {
            Error::Schema(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_schema_errors() {
        let err: Error = SchemaError::missing_element("RESULT", "output").into();
        assert_eq!(
            err.to_string(),
            "schema error: element 'RESULT' is missing from output"
        );
        assert_eq!(
            err.as_schema(),
            Some(&SchemaError::missing_element("RESULT", "output"))
        );
    }

    #[test]
    fn transport_display() {
        let err = Error::transport("connection reset");
        assert_eq!(err.to_string(), "transport error: connection reset");
        assert!(err.as_schema().is_none());
    }
}
