//! Session override store
//!
//! Overrides live in a moka cache keyed by session ID and expire after the
//! configured TTL (24 hours by default). Applying replaces the whole set for
//! a session.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::SessionError;

/// Cookie carrying the session ID
pub const SESSION_COOKIE: &str = "lpg-session";

/// Default override lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60 * 24);

const MAX_SESSIONS: u64 = 10_000;

/// Override values for one session, in submission order
pub type Overrides = IndexMap<String, String>;

/// Opaque session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|source| SessionError::InvalidId {
                value: s.to_string(),
                source,
            })
    }
}

/// Drop entries whose value is empty or whitespace
#[must_use]
pub fn clean_overrides<I, K, V>(values: I) -> Overrides
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    values
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .filter(|(_, v)| !v.trim().is_empty())
        .collect()
}

/// TTL-bounded override store shared across requests
#[derive(Clone)]
pub struct SessionStore {
    inner: Cache<SessionId, Arc<Overrides>>,
}

impl SessionStore {
    /// Create store whose entries expire after `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(MAX_SESSIONS)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Replace a session's overrides, returning the session used
    ///
    /// Blank values are dropped first. A new session is minted when `session`
    /// is `None`.
    pub fn apply<I, K, V>(&self, session: Option<SessionId>, values: I) -> SessionId
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let id = session.unwrap_or_default();
        let clean = clean_overrides(values);
        debug!(session = %id, keys = clean.len(), "overrides applied");
        self.inner.insert(id, Arc::new(clean));
        id
    }

    /// Snapshot of a session's overrides
    #[must_use]
    pub fn get(&self, session: &SessionId) -> Option<Arc<Overrides>> {
        self.inner.get(session)
    }

    /// Remove a session's overrides
    pub fn clear(&self, session: &SessionId) {
        self.inner.invalidate(session);
        debug!(session = %session, "overrides cleared");
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_values_are_dropped() {
        let clean = clean_overrides([
            ("POLLY_BASE_URL", "https://sandbox.example"),
            ("ORG_TICKER", ""),
            ("POLLY_USERNAME", "   "),
            ("POLLY_PASSWORD", "hunter2"),
        ]);
        let keys: Vec<_> = clean.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["POLLY_BASE_URL", "POLLY_PASSWORD"]);
    }

    #[test]
    fn apply_replaces_previous_set() {
        let store = SessionStore::default();
        let id = store.apply(None, [("ORG_TICKER", "ACME"), ("POLLY_USERNAME", "dev")]);
        let same = store.apply(Some(id), [("ORG_TICKER", "BETA")]);
        assert_eq!(same, id);

        let current = store.get(&id).unwrap();
        assert_eq!(current.get("ORG_TICKER").map(String::as_str), Some("BETA"));
        assert!(current.get("POLLY_USERNAME").is_none());
    }

    #[test]
    fn clear_forgets_the_session() {
        let store = SessionStore::default();
        let id = store.apply(None, [("ORG_TICKER", "ACME")]);
        store.clear(&id);
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn session_id_parses_from_cookie_text() {
        let id = SessionId::new();
        let parsed: SessionId = format!(" {id} ").parse().unwrap();
        assert_eq!(parsed, id);
        assert!(matches!(
            "not-a-session".parse::<SessionId>(),
            Err(SessionError::InvalidId { .. })
        ));
    }

    #[test]
    fn entries_expire_after_ttl() {
        let store = SessionStore::new(Duration::from_millis(20));
        let id = store.apply(None, [("ORG_TICKER", "ACME")]);
        std::thread::sleep(Duration::from_millis(60));
        assert!(store.get(&id).is_none());
    }
}
