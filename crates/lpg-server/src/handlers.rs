//! Route handlers

use std::time::Instant;

use indexmap::IndexMap;
use lpg_logstore::{redact_headers, NewLogEntry};
use lpg_session::{SessionId, ValueSource, SESSION_COOKIE};
use lpg_shape::{
    build_payload_from_form, convert_json, derive_field_definitions, initial_form_state,
    Conversion, EnumMetadata, FieldDefinition, FlatMap, ShapeError,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{info, warn};
use warp::http::HeaderMap;
use warp::hyper::body::Bytes;
use warp::{Rejection, Reply};

use crate::error::ApiError;
use crate::state::AppState;

type HandlerResult = Result<warp::reply::Response, Rejection>;

fn parse_json(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::InvalidJson)
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_value(parse_json(body)?).map_err(ApiError::InvalidBody)
}

/// JavaScript-style truthiness of a JSON value
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn flag_from(body: &[u8], key: &str) -> Result<bool, ApiError> {
    Ok(parse_json(body)?.get(key).is_some_and(truthy))
}

/// Session from the cookie; an unreadable cookie counts as no session
fn session_from_cookie(cookie: Option<String>) -> Option<SessionId> {
    let raw = cookie?;
    match raw.parse::<SessionId>() {
        Ok(id) => Some(id),
        Err(err) => {
            warn!(error = %err, "ignoring session cookie");
            None
        }
    }
}

/// Logged form of a request: the body's fields plus its redacted headers
///
/// A body that is not an object is kept under `body`.
fn logged_request(input: Option<&Value>, headers: &HeaderMap) -> Value {
    let mut logged = match input {
        Some(Value::Object(fields)) => fields.clone(),
        Some(other) => Map::from_iter([("body".to_string(), other.clone())]),
        None => Map::new(),
    };
    let headers = redact_headers(
        headers
            .iter()
            .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?))),
    );
    logged.insert("headers".to_string(), Value::Object(headers));
    Value::Object(logged)
}

fn session_cookie(value: &str, max_age_secs: u64, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}{secure}")
}

/// `GET /health`
pub async fn health() -> HandlerResult {
    Ok(warp::reply::json(&json!({"status": "ok", "version": crate::VERSION})).into_response())
}

/// `GET /api/convert`
pub async fn list_conversions() -> HandlerResult {
    let conversions: Vec<_> = Conversion::ALL.iter().map(Conversion::as_str).collect();
    Ok(warp::reply::json(&json!({
        "success": true,
        "message": "Converter API is running",
        "conversions": conversions,
    }))
    .into_response())
}

/// `POST /api/convert/{type}`
///
/// Every call is recorded through the state's log sink, request headers
/// included.
pub async fn convert(kind: String, headers: HeaderMap, body: Bytes, state: AppState) -> HandlerResult {
    let started = Instant::now();
    let endpoint = format!("/api/convert/{kind}");
    let mut entry = NewLogEntry::new(endpoint, "POST").with_request(logged_request(None, &headers));

    let outcome = parse_json(&body).and_then(|input| {
        entry.request = Some(logged_request(Some(&input), &headers));
        let conversion: Conversion = kind.parse()?;
        Ok(convert_json(conversion, input)?)
    });
    entry.duration = Some(started.elapsed());

    match outcome {
        Ok(data) => {
            info!(conversion = %kind, elapsed_ms = started.elapsed().as_millis(), "converted");
            state
                .sink()
                .record(entry.with_status(200).with_response(data.clone()));
            Ok(warp::reply::json(&json!({"success": true, "data": data})).into_response())
        }
        Err(err) => {
            state.sink().record(
                entry
                    .with_status(err.status_code().as_u16())
                    .with_error(err.to_string()),
            );
            Err(err.into())
        }
    }
}

/// `GET /api/logs`
pub async fn list_logs(state: AppState) -> HandlerResult {
    Ok(warp::reply::json(&state.logs().entries()).into_response())
}

/// `DELETE /api/logs`
pub async fn clear_logs(state: AppState) -> HandlerResult {
    state.logs().clear();
    info!("logs cleared");
    Ok(warp::reply::json(&json!({"message": "Logs cleared"})).into_response())
}

/// `GET /api/log-settings`
pub async fn get_log_settings(state: AppState) -> HandlerResult {
    let enabled = state.logs().truncate_enabled();
    Ok(warp::reply::json(&json!({"truncateEnabled": enabled})).into_response())
}

/// `PUT /api/log-settings`
pub async fn put_log_settings(body: Bytes, state: AppState) -> HandlerResult {
    let enabled = flag_from(&body, "truncateEnabled")?;
    state.logs().set_truncate_enabled(enabled);
    Ok(warp::reply::json(&json!({"truncateEnabled": enabled})).into_response())
}

/// `GET /api/settings/truncate`
pub async fn get_truncate(state: AppState) -> HandlerResult {
    let enabled = state.logs().truncate_enabled();
    Ok(warp::reply::json(&json!({"enabled": enabled})).into_response())
}

/// `POST /api/settings/truncate`
pub async fn post_truncate(body: Bytes, state: AppState) -> HandlerResult {
    let enabled = flag_from(&body, "enabled")?;
    state.logs().set_truncate_enabled(enabled);
    Ok(warp::reply::json(&json!({"ok": true, "enabled": enabled})).into_response())
}

/// Ticker used for portal links when neither the session nor the process sets one
const DEFAULT_ORG_TICKER: &str = "RMS";

/// Override status: which keys resolve, and from where
///
/// Credential values are never echoed; only the organization ticker is.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OverrideStatus {
    session: bool,
    sources: IndexMap<&'static str, ValueSource>,
    org_ticker: String,
}

/// `GET /api/overrides`
pub async fn get_overrides(cookie: Option<String>, state: AppState) -> HandlerResult {
    let session = session_from_cookie(cookie);
    let active = session.is_some_and(|id| state.sessions().get(&id).is_some());
    let lookup = state.lookup(session.as_ref());
    Ok(warp::reply::json(&OverrideStatus {
        session: active,
        sources: lookup.sources(),
        org_ticker: lookup
            .get_value("ORG_TICKER")
            .unwrap_or_else(|| DEFAULT_ORG_TICKER.to_string()),
    })
    .into_response())
}

/// `POST /api/overrides`
pub async fn apply_overrides(cookie: Option<String>, body: Bytes, state: AppState) -> HandlerResult {
    let values: IndexMap<String, Value> = parse_body(&body)?;
    let values = values
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            _ => None,
        });

    let session = state.sessions().apply(session_from_cookie(cookie), values);
    let cookie = session_cookie(
        &session.to_string(),
        state.session_ttl().as_secs(),
        !state.is_dev(),
    );
    info!("session overrides applied");
    Ok(warp::reply::with_header(
        warp::reply::json(&json!({"ok": true})),
        "set-cookie",
        cookie,
    )
    .into_response())
}

/// `DELETE /api/overrides`
pub async fn clear_overrides(cookie: Option<String>, state: AppState) -> HandlerResult {
    if let Some(id) = session_from_cookie(cookie) {
        state.sessions().clear(&id);
    }
    Ok(warp::reply::with_header(
        warp::reply::json(&json!({"ok": true})),
        "set-cookie",
        session_cookie("", 0, !state.is_dev()),
    )
    .into_response())
}

#[derive(Debug, Deserialize)]
struct FieldsRequest {
    sample: Value,
    #[serde(default)]
    enums: Value,
}

/// `POST /api/loan-form/fields`
///
/// Body: `{sample, enums?}`. Responds with the field definitions and the
/// initial form state.
pub async fn loan_form_fields(body: Bytes) -> HandlerResult {
    let request: FieldsRequest = parse_body(&body)?;
    if !request.sample.is_object() {
        return Err(ApiError::from(ShapeError::NotAnObject).into());
    }
    let enums = EnumMetadata::from_json(&request.enums);
    let fields = derive_field_definitions(&request.sample, &enums);
    let form = initial_form_state(&fields, &request.sample);
    Ok(warp::reply::json(&json!({"success": true, "fields": fields, "form": form})).into_response())
}

#[derive(Debug, Deserialize)]
struct PayloadRequest {
    fields: Vec<FieldDefinition>,
    form: FlatMap,
}

/// `POST /api/loan-form/payload`
///
/// Body: `{fields, form}`. Responds with the nested loan payload.
pub async fn loan_form_payload(body: Bytes) -> HandlerResult {
    let request: PayloadRequest = parse_body(&body)?;
    let payload = build_payload_from_form(&request.fields, &request.form);
    Ok(warp::reply::json(&json!({"success": true, "data": payload})).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("false")));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!({})));
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie("abc", 86_400, true);
        assert_eq!(
            cookie,
            "lpg-session=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=86400; Secure"
        );
        assert!(!session_cookie("", 0, false).contains("Secure"));
    }

    #[test]
    fn bad_cookie_is_ignored() {
        assert!(session_from_cookie(Some("garbage".into())).is_none());
        assert!(session_from_cookie(None).is_none());
        let id = SessionId::new();
        assert_eq!(session_from_cookie(Some(id.to_string())), Some(id));
    }

    #[test]
    fn logged_request_carries_redacted_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer abc".parse().unwrap());
        headers.insert("content-type", "application/json".parse().unwrap());

        let logged = logged_request(Some(&json!({"amount": 1})), &headers);
        assert_eq!(logged["amount"], json!(1));
        assert_eq!(logged["headers"]["authorization"], json!("[REDACTED]"));
        assert_eq!(logged["headers"]["content-type"], json!("application/json"));

        let wrapped = logged_request(Some(&json!([1, 2])), &headers);
        assert_eq!(wrapped["body"], json!([1, 2]));
        assert!(logged_request(None, &HeaderMap::new())["headers"].is_object());
    }
}
