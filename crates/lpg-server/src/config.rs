//! Server configuration
//!
//! Built-in defaults, then an optional TOML file, then the environment
//! (`LPG_BIND`, `LPG_LOG_CAPACITY`, `LPG_DEV`).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexMap;
use lpg_logstore::DEFAULT_CAPACITY;
use lpg_session::DEFAULT_TTL;
use serde::{Deserialize, Serialize};

/// Bind address variable
pub const ENV_BIND: &str = "LPG_BIND";
/// Log capacity variable
pub const ENV_LOG_CAPACITY: &str = "LPG_LOG_CAPACITY";
/// Dev mode variable
pub const ENV_DEV: &str = "LPG_DEV";

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Environment variable has an unusable value
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Retained log entries
    pub log_capacity: usize,
    /// Truncate stored responses from the start
    pub truncate_responses: bool,
    /// Include error chains in failure bodies
    pub dev: bool,
    /// Session override lifetime in seconds
    pub session_ttl_secs: u64,
    /// Provider defaults for the override keys
    pub defaults: IndexMap<String, String>,
}

impl ServerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from an optional TOML file, then the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or an
    /// environment override is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml(&text)?
            }
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Parse a TOML document; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid TOML.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply environment overrides read through `var`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for an unparseable value.
    pub fn with_env<F>(mut self, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = var(ENV_BIND) {
            self.bind = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_BIND,
                value,
            })?;
        }
        if let Some(value) = var(ENV_LOG_CAPACITY) {
            self.log_capacity = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_LOG_CAPACITY,
                value,
            })?;
        }
        if let Some(value) = var(ENV_DEV) {
            self.dev = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => return Err(ConfigError::InvalidEnv { key: ENV_DEV, value }),
            };
        }
        Ok(self)
    }

    /// With listen address
    #[inline]
    #[must_use]
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// With dev mode
    #[inline]
    #[must_use]
    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    /// With log capacity
    #[inline]
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// With initial truncate flag
    #[inline]
    #[must_use]
    pub fn with_truncate_responses(mut self, enabled: bool) -> Self {
        self.truncate_responses = enabled;
        self
    }

    /// Session override lifetime
    #[inline]
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_capacity: DEFAULT_CAPACITY,
            truncate_responses: false,
            dev: false,
            session_ttl_secs: DEFAULT_TTL.as_secs(),
            defaults: IndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.log_capacity, 200);
        assert_eq!(config.session_ttl(), Duration::from_secs(86_400));
        assert!(!config.dev);
    }

    #[test]
    fn toml_keeps_unset_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            bind = "0.0.0.0:8080"
            truncate_responses = true

            [defaults]
            POLLY_BASE_URL = "https://api.example"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080".parse().unwrap());
        assert!(config.truncate_responses);
        assert_eq!(config.log_capacity, 200);
        assert_eq!(config.defaults["POLLY_BASE_URL"], "https://api.example");
    }

    #[test]
    fn environment_wins_over_file() {
        let config = ServerConfig::from_toml("log_capacity = 50")
            .unwrap()
            .with_env(env(&[(ENV_LOG_CAPACITY, "75"), (ENV_DEV, "true")]))
            .unwrap();
        assert_eq!(config.log_capacity, 75);
        assert!(config.dev);
    }

    #[test]
    fn bad_environment_values_are_reported() {
        let err = ServerConfig::default()
            .with_env(env(&[(ENV_BIND, "not-an-address")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: ENV_BIND, .. }));

        let err = ServerConfig::default()
            .with_env(env(&[(ENV_DEV, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: ENV_DEV, .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        assert!(matches!(
            ServerConfig::from_toml("log_capacity = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
