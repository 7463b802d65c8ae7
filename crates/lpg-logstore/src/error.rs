//! Error types for the log store

/// Log store error
#[derive(Debug, thiserror::Error)]
pub enum LogStoreError {
    /// Collector task has stopped; the entry was not stored
    #[error("log collector is no longer running")]
    CollectorClosed,
}
