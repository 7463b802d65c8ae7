//! LPG Server - HTTP surface for the loan pricing playground
//!
//! Serves the shape converters, the request log, session overrides and the
//! loan-form helpers over warp.
//!
//! # Example
//!
//! ```rust,ignore
//! use lpg_server::{routes, AppState, ServerConfig};
//!
//! # async fn example() {
//! let config = ServerConfig::new().with_dev(true);
//! let state = AppState::from_config(&config);
//! warp::serve(routes(state)).run(config.bind).await;
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::{ConfigError, ServerConfig};
pub use error::{handle_rejection, ApiError, ErrorBody};
pub use routes::{routes, MAX_BODY_BYTES};
pub use state::AppState;
pub use telemetry::init_tracing;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
