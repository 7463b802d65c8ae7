//! Error types for shape conversion
//!
//! Converters themselves never fail on plausible input. Errors only arise at
//! the edge, when a raw JSON document cannot be read as one of the typed
//! shapes or a caller asks for a conversion that does not exist.

/// Result alias for shape operations
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Shape conversion error
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// Input could not be read as the requested shape
    #[error("malformed {shape} input: {source}")]
    Malformed {
        /// Shape that was being read
        shape: &'static str,
        /// Underlying deserialization failure
        #[source]
        source: serde_json::Error,
    },

    /// Input was valid JSON but not an object
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// Unknown conversion selector
    #[error("unknown conversion type: {0}")]
    UnknownConversion(String),

    /// Output could not be serialized
    #[error("failed to serialize {shape} output: {source}")]
    Serialization {
        /// Shape that was being written
        shape: &'static str,
        /// Underlying serialization failure
        #[source]
        source: serde_json::Error,
    },
}

impl ShapeError {
    /// Create malformed-input error for a shape
    #[inline]
    #[must_use]
    pub fn malformed(shape: &'static str, source: serde_json::Error) -> Self {
        Self::Malformed { shape, source }
    }

    /// Check if the error was caused by the caller's input
    ///
    /// Everything except an output serialization failure is a client error.
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Serialization { .. })
    }
}
