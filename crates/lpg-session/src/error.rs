//! Error types for session overrides

/// Session error
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Session cookie value is not a session ID
    #[error("invalid session id {value:?}: {source}")]
    InvalidId {
        /// Raw cookie value
        value: String,
        /// Parse failure
        #[source]
        source: uuid::Error,
    },
}
