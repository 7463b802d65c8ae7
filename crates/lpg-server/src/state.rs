//! Shared request state

use std::sync::Arc;
use std::time::Duration;

use lpg_logstore::{LogSink, LogStore};
use lpg_session::{ConfigLookup, ProcessDefaults, SessionId, SessionStore};

use crate::config::ServerConfig;

/// State cloned into every route
#[derive(Clone)]
pub struct AppState {
    logs: Arc<LogStore>,
    sink: Arc<dyn LogSink>,
    sessions: SessionStore,
    defaults: Arc<ProcessDefaults>,
    session_ttl: Duration,
    dev: bool,
}

impl AppState {
    /// Build state from configuration
    ///
    /// Log entries are written straight into the store until a sink is
    /// installed with [`AppState::with_sink`]. Provider defaults come from
    /// the config file, overlaid by the process environment.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let logs = Arc::new(
            LogStore::new(config.log_capacity).with_truncate(config.truncate_responses),
        );
        let defaults = ProcessDefaults::from_map(config.defaults.clone())
            .merged(ProcessDefaults::from_env());
        Self {
            sink: logs.clone(),
            logs,
            sessions: SessionStore::new(config.session_ttl()),
            defaults: Arc::new(defaults),
            session_ttl: config.session_ttl(),
            dev: config.dev,
        }
    }

    /// Builder: route log entries through `sink`
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Builder: replace the provider defaults
    #[must_use]
    pub fn with_defaults(mut self, defaults: ProcessDefaults) -> Self {
        self.defaults = Arc::new(defaults);
        self
    }

    /// Log store
    #[must_use]
    pub fn logs(&self) -> &Arc<LogStore> {
        &self.logs
    }

    /// Log sink used by the routes
    #[must_use]
    pub fn sink(&self) -> &dyn LogSink {
        self.sink.as_ref()
    }

    /// Session override store
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Fresh lookup for one request
    #[must_use]
    pub fn lookup(&self, session: Option<&SessionId>) -> ConfigLookup {
        let overrides = session.and_then(|id| self.sessions.get(id));
        ConfigLookup::new(overrides, Arc::clone(&self.defaults))
    }

    /// Session cookie lifetime
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Dev mode
    #[must_use]
    pub fn is_dev(&self) -> bool {
        self.dev
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("logs", &self.logs.len())
            .field("sessions", &self.sessions)
            .field("dev", &self.dev)
            .finish_non_exhaustive()
    }
}
