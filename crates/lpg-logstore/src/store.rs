//! In-memory log store
//!
//! Entries are kept newest first in a bounded deque; storing past capacity
//! evicts the oldest. Request and response bodies are redacted on store and
//! responses are truncated while the truncate flag is on.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::entry::{LogEntry, NewLogEntry};
use crate::redact::{redact_sensitive, truncate_response};

/// Default number of retained entries
pub const DEFAULT_CAPACITY: usize = 200;

/// Capped, newest-first log store
#[derive(Debug)]
pub struct LogStore {
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
    truncate: AtomicBool,
}

impl LogStore {
    /// Create store with the given capacity (at least one entry)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            truncate: AtomicBool::new(false),
        }
    }

    /// Builder: set the initial truncate flag
    #[must_use]
    pub fn with_truncate(self, enabled: bool) -> Self {
        self.truncate.store(enabled, Ordering::Relaxed);
        self
    }

    /// Store an entry and return the stored form
    pub fn push(&self, entry: NewLogEntry) -> LogEntry {
        let truncate = self.truncate_enabled();
        let response = entry.response.as_ref().map(|body| {
            let clean = redact_sensitive(body);
            if truncate {
                truncate_response(&clean)
            } else {
                clean
            }
        });

        let stored = LogEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            endpoint: entry.endpoint,
            method: entry.method,
            status: entry.status,
            duration_ms: entry
                .duration
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            request: entry.request.as_ref().map(redact_sensitive),
            response,
            error: entry.error,
        };

        let mut entries = self.entries.lock();
        entries.push_front(stored.clone());
        while entries.len() > self.capacity {
            entries.pop_back();
        }
        debug!(endpoint = %stored.endpoint, retained = entries.len(), "log entry stored");
        stored
    }

    /// Snapshot of all entries, newest first
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of retained entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if no entries are retained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Maximum retained entries
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if responses are truncated on store
    #[must_use]
    pub fn truncate_enabled(&self) -> bool {
        self.truncate.load(Ordering::Relaxed)
    }

    /// Set the truncate flag for subsequently stored entries
    pub fn set_truncate_enabled(&self, enabled: bool) {
        self.truncate.store(enabled, Ordering::Relaxed);
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn newest_first_and_capped() {
        let store = LogStore::new(3);
        for i in 0..5 {
            store.push(NewLogEntry::new(format!("/call/{i}"), "GET"));
        }
        let endpoints: Vec<_> = store.entries().into_iter().map(|e| e.endpoint).collect();
        assert_eq!(endpoints, vec!["/call/4", "/call/3", "/call/2"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let store = LogStore::new(0);
        store.push(NewLogEntry::new("/a", "GET"));
        store.push(NewLogEntry::new("/b", "GET"));
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.entries()[0].endpoint, "/b");
    }

    #[test]
    fn bodies_are_redacted() {
        let store = LogStore::default();
        let stored = store.push(
            NewLogEntry::new("/token", "POST")
                .with_request(json!({"client_id": "abc", "grant_type": "password"}))
                .with_response(json!({"access_token": "xyz", "expires_in": 3600}))
                .with_status(200)
                .with_duration(Duration::from_millis(42)),
        );
        assert_eq!(stored.request, Some(json!({"client_id": "[REDACTED]", "grant_type": "password"})));
        assert_eq!(stored.response, Some(json!({"access_token": "[REDACTED]", "expires_in": 3600})));
        assert_eq!(stored.duration_ms, Some(42));
    }

    #[test]
    fn truncation_follows_the_flag() {
        let store = LogStore::default();
        let body = json!({"rows": [1, 2, 3]});

        let full = store.push(NewLogEntry::new("/a", "GET").with_response(body.clone()));
        assert_eq!(full.response, Some(body.clone()));

        store.set_truncate_enabled(true);
        let short = store.push(NewLogEntry::new("/a", "GET").with_response(body));
        assert_eq!(short.response, Some(json!({"rows": [1, "[TRUNCATED - 2 more items]"]})));
    }

    #[test]
    fn clear_empties_the_store() {
        let store = LogStore::default().with_truncate(true);
        store.push(NewLogEntry::new("/a", "GET"));
        store.clear();
        assert!(store.is_empty());
        assert!(store.truncate_enabled());
    }

    #[test]
    fn serialized_entry_uses_wire_names() {
        let store = LogStore::default();
        let stored = store.push(NewLogEntry::new("/a", "GET").with_duration(Duration::from_millis(7)));
        let out = serde_json::to_value(&stored).unwrap();
        assert_eq!(out["duration"], json!(7));
        assert!(out.get("status").is_none());
        assert!(out["id"].is_string());
        assert!(out["timestamp"].is_string());
    }
}
