use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Stored log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Unique entry ID
    pub id: Uuid,
    /// When the entry was stored
    pub timestamp: DateTime<Utc>,
    /// Endpoint or URL that was called
    pub endpoint: String,
    /// HTTP method
    pub method: String,
    /// Response status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Elapsed time in milliseconds
    #[serde(rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Redacted request body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Value>,
    /// Redacted, possibly truncated, response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Entry submitted to a [`crate::LogSink`]; ID and timestamp are assigned
/// on store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewLogEntry {
    /// Endpoint or URL that was called
    pub endpoint: String,
    /// HTTP method
    pub method: String,
    /// Response status
    pub status: Option<u16>,
    /// Elapsed time
    pub duration: Option<Duration>,
    /// Request body
    pub request: Option<Value>,
    /// Response body
    pub response: Option<Value>,
    /// Failure message
    pub error: Option<String>,
}

impl NewLogEntry {
    /// Create entry for an endpoint and method
    #[must_use]
    pub fn new(endpoint: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            ..Self::default()
        }
    }

    /// Builder: set status
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Builder: set elapsed time
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Builder: set request body
    #[must_use]
    pub fn with_request(mut self, request: Value) -> Self {
        self.request = Some(request);
        self
    }

    /// Builder: set response body
    #[must_use]
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }

    /// Builder: set failure message
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
