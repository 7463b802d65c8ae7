//! LPG Session - session-scoped provider overrides
//!
//! A browser session may override provider credentials for a day. Lookups
//! resolve a key from the session's overrides first and the process
//! defaults second.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lpg_session::{ConfigLookup, ProcessDefaults, SessionStore};
//!
//! let store = SessionStore::default();
//! let defaults = Arc::new(ProcessDefaults::from_env());
//!
//! let session = store.apply(None, [("ORG_TICKER", "ACME"), ("POLLY_PASSWORD", "")]);
//! let lookup = ConfigLookup::new(store.get(&session), defaults);
//!
//! assert_eq!(lookup.get_value("ORG_TICKER").as_deref(), Some("ACME"));
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod lookup;
pub mod store;

pub use error::SessionError;
pub use lookup::{ConfigLookup, ProcessDefaults, ValueSource, OVERRIDE_KEYS};
pub use store::{
    clean_overrides, Overrides, SessionId, SessionStore, DEFAULT_TTL, SESSION_COOKIE,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
