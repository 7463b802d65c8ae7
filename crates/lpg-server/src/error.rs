//! API errors and the rejection handler
//!
//! Handlers reject with [`ApiError`]; [`handle_rejection`] turns every
//! rejection into a `{success: false, error}` body with a matching status.

use std::convert::Infallible;
use std::error::Error as _;

use lpg_session::SessionError;
use lpg_shape::ShapeError;
use serde::Serialize;
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::reject::Reject;
use warp::Rejection;

/// Route-level error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body is not valid JSON
    #[error("Invalid JSON in request body")]
    InvalidJson(#[source] serde_json::Error),

    /// Body is JSON but not the expected structure
    #[error("invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// Conversion failed
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Session cookie is unusable
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Response could not be serialized
    #[error("failed to serialize response: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) | Self::InvalidBody(_) | Self::Session(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Shape(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Shape(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if the caller caused the error
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Message plus every underlying cause, one per line
    #[must_use]
    pub fn chain(&self) -> String {
        let mut out = format!("{self:?}");
        let mut source = self.source();
        while let Some(cause) = source {
            out.push_str("\ncaused by: ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}

impl Reject for ApiError {}

/// Failure body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `false`
    pub success: bool,
    /// Error message
    pub error: String,
    /// Error chain, dev mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            stack: None,
        }
    }
}

/// Map any rejection to a JSON failure response
///
/// `dev` adds the error chain as `stack`.
#[allow(clippy::unused_async)]
pub async fn handle_rejection(
    err: Rejection,
    dev: bool,
) -> Result<warp::reply::WithStatus<warp::reply::Json>, Infallible> {
    let (status, body) = if let Some(api) = err.find::<ApiError>() {
        let status = api.status_code();
        if status.is_server_error() {
            error!(error = %api, "request failed");
        } else {
            warn!(error = %api, "request rejected");
        }
        let mut body = ErrorBody::new(api.to_string());
        if dev {
            body.stack = Some(api.chain());
        }
        (status, body)
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, ErrorBody::new("Not found"))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, ErrorBody::new("Method not allowed"))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, ErrorBody::new("Request body too large"))
    } else {
        error!(rejection = ?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new("Internal server error"))
    };

    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn statuses() {
        assert_eq!(ApiError::InvalidJson(json_error()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(ShapeError::UnknownConversion("x".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Serialization(json_error()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn chain_includes_causes() {
        let err = ApiError::InvalidJson(json_error());
        let chain = err.chain();
        assert!(chain.starts_with("InvalidJson"));
        assert!(chain.contains("caused by: EOF"));
    }

    #[test]
    fn invalid_json_message() {
        assert_eq!(ApiError::InvalidJson(json_error()).to_string(), "Invalid JSON in request body");
    }
}
