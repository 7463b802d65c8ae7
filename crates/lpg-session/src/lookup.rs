//! Config lookup: session override first, process default second

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::store::Overrides;

/// Provider settings a session may override
pub const OVERRIDE_KEYS: [&str; 6] = [
    "POLLY_BASE_URL",
    "ORG_TICKER",
    "POLLY_USERNAME",
    "POLLY_PASSWORD",
    "POLLY_CLIENT_ID",
    "POLLY_CLIENT_SECRET",
];

/// Process-wide default values for the override keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessDefaults {
    values: IndexMap<String, String>,
}

impl ProcessDefaults {
    /// Defaults from an explicit map; blank values are ignored
    #[must_use]
    pub fn from_map<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: crate::store::clean_overrides(values),
        }
    }

    /// Read every known override key from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_map(
            OVERRIDE_KEYS
                .iter()
                .filter_map(|key| std::env::var(key).ok().map(|v| (*key, v))),
        )
    }

    /// Layer `other` on top; its values win
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.values.extend(other.values);
        self
    }

    /// Default value for a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of keys with a default
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no defaults are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    /// Session override
    Session,
    /// Process default
    Default,
    /// Not set anywhere
    Unset,
}

/// Per-request view over a session's overrides and the process defaults
///
/// Built fresh for each request; nothing resolved here is cached.
#[derive(Debug, Clone)]
pub struct ConfigLookup {
    overrides: Option<Arc<Overrides>>,
    defaults: Arc<ProcessDefaults>,
}

impl ConfigLookup {
    /// Create lookup for one request
    #[must_use]
    pub fn new(overrides: Option<Arc<Overrides>>, defaults: Arc<ProcessDefaults>) -> Self {
        Self {
            overrides,
            defaults,
        }
    }

    /// Session override if present, else process default
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<String> {
        self.override_for(key)
            .or_else(|| self.defaults.get(key))
            .map(str::to_string)
    }

    /// Where `key` would be resolved from
    #[must_use]
    pub fn source(&self, key: &str) -> ValueSource {
        if self.override_for(key).is_some() {
            ValueSource::Session
        } else if self.defaults.get(key).is_some() {
            ValueSource::Default
        } else {
            ValueSource::Unset
        }
    }

    /// Source of every known override key, in declaration order
    #[must_use]
    pub fn sources(&self) -> IndexMap<&'static str, ValueSource> {
        OVERRIDE_KEYS.iter().map(|key| (*key, self.source(key))).collect()
    }

    fn override_for(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_deref()
            .and_then(|o| o.get(key))
            .map(String::as_str)
    }
}
