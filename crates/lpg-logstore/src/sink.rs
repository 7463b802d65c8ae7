//! Log sinks
//!
//! Request handlers record through a [`LogSink`] and never wait on the
//! store. [`ChannelSink`] forwards entries over an unbounded channel to a
//! single collector task that owns the writes.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::entry::NewLogEntry;
use crate::error::LogStoreError;
use crate::store::LogStore;

/// Fire-and-forget receiver of log entries
pub trait LogSink: Send + Sync {
    /// Record an entry; never blocks and never fails the caller
    fn record(&self, entry: NewLogEntry);
}

impl LogSink for LogStore {
    fn record(&self, entry: NewLogEntry) {
        self.push(entry);
    }
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn record(&self, entry: NewLogEntry) {
        (**self).record(entry);
    }
}

/// Sink that hands entries to a collector task
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<NewLogEntry>,
}

impl ChannelSink {
    /// Spawn a collector writing into `store`
    ///
    /// The collector exits once every sink clone is dropped. Must be called
    /// inside a tokio runtime.
    #[must_use]
    pub fn spawn(store: Arc<LogStore>) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<NewLogEntry>();
        let handle = tokio::spawn(async move {
            while let Some(entry) = receiver.recv().await {
                store.push(entry);
            }
            debug!("log collector stopped");
        });
        (Self { sender }, handle)
    }

    /// Send an entry to the collector
    ///
    /// # Errors
    ///
    /// Returns [`LogStoreError::CollectorClosed`] when the collector task has
    /// stopped.
    pub fn try_record(&self, entry: NewLogEntry) -> Result<(), LogStoreError> {
        self.sender
            .send(entry)
            .map_err(|_| LogStoreError::CollectorClosed)
    }

    /// Check if the collector is gone
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl LogSink for ChannelSink {
    fn record(&self, entry: NewLogEntry) {
        if let Err(err) = self.try_record(entry) {
            error!(error = %err, "dropping log entry");
        }
    }
}
