//! LPG Logstore - capped request/response log
//!
//! Keeps the most recent outbound calls newest first, with credentials
//! redacted and, optionally, long arrays in responses truncated.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lpg_logstore::{ChannelSink, LogSink, LogStore, NewLogEntry};
//!
//! # async fn example() {
//! let store = Arc::new(LogStore::new(200));
//! let (sink, _collector) = ChannelSink::spawn(Arc::clone(&store));
//!
//! sink.record(NewLogEntry::new("/api/convert", "POST").with_status(200));
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod entry;
pub mod error;
pub mod redact;
pub mod sink;
pub mod store;

pub use entry::{LogEntry, NewLogEntry};
pub use error::LogStoreError;
pub use redact::{is_sensitive_key, redact_headers, redact_sensitive, truncate_response, REDACTED};
pub use sink::{ChannelSink, LogSink};
pub use store::{LogStore, DEFAULT_CAPACITY};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with LPG Logstore
    pub use crate::{ChannelSink, LogEntry, LogSink, LogStore, NewLogEntry};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
