//! HTTP route behavior through `warp::test`.

use std::sync::Arc;

use lpg_logstore::ChannelSink;
use lpg_server::{routes, AppState, ServerConfig};
use lpg_session::ProcessDefaults;
use lpg_test_utils::{sample_external, sample_loan};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use warp::http::StatusCode;

fn state() -> AppState {
    AppState::from_config(&ServerConfig::new().with_log_capacity(10))
        .with_defaults(ProcessDefaults::from_map([("POLLY_BASE_URL", "https://api.example")]))
}

fn body(res: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

async fn post(state: &AppState, path: &str, payload: &str) -> warp::http::Response<warp::hyper::body::Bytes> {
    warp::test::request()
        .method("POST")
        .path(path)
        .body(payload.to_string())
        .reply(&routes(state.clone()))
        .await
}

async fn get(state: &AppState, path: &str) -> warp::http::Response<warp::hyper::body::Bytes> {
    warp::test::request()
        .method("GET")
        .path(path)
        .reply(&routes(state.clone()))
        .await
}

#[tokio::test]
async fn health_reports_ok() {
    let res = get(&state(), "/health").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body(&res)["status"], json!("ok"));
}

#[tokio::test]
async fn conversion_listing() {
    let res = get(&state(), "/api/convert").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body(&res)["conversions"],
        json!(["ui-to-external", "getloan-to-external", "external-to-getloan"])
    );
}

#[tokio::test]
async fn loan_converts_to_pricing() {
    let state = state();
    let res = post(&state, "/api/convert/getloan-to-external", &sample_loan().to_string()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let out = body(&res);
    assert_eq!(out["success"], json!(true));
    assert_eq!(out["data"]["audienceId"], json!("Retail"));
    assert_eq!(out["data"]["property"]["state"], json!("TX"));

    let logs = state.logs().entries();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].endpoint, "/api/convert/getloan-to-external");
    assert_eq!(logs[0].status, Some(200));
}

#[tokio::test]
async fn conversion_log_hides_credential_headers() {
    let state = state();
    let res = warp::test::request()
        .method("POST")
        .path("/api/convert/ui-to-external")
        .header("authorization", "Bearer secret-token")
        .header("x-trace", "abc")
        .body("{}")
        .reply(&routes(state.clone()))
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let logs = state.logs().entries();
    let headers = &logs[0].request.as_ref().unwrap()["headers"];
    assert_eq!(headers["authorization"], json!("[REDACTED]"));
    assert_eq!(headers["x-trace"], json!("abc"));
}

#[tokio::test]
async fn queued_entries_drain_once_routes_are_dropped() {
    let base = AppState::from_config(&ServerConfig::new());
    let logs = Arc::clone(base.logs());
    let (sink, collector) = ChannelSink::spawn(Arc::clone(&logs));
    let filter = routes(base.with_sink(Arc::new(sink)));

    for _ in 0..3 {
        warp::test::request()
            .method("POST")
            .path("/api/convert/ui-to-external")
            .body("{}")
            .reply(&filter)
            .await;
    }
    drop(filter);
    collector.await.unwrap();

    assert_eq!(logs.len(), 3);
}

#[tokio::test]
async fn pricing_converts_to_loan() {
    let res = post(&state(), "/api/convert/external-to-getloan", &sample_external().to_string()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body(&res)["data"]["purpose"], json!("PURCHASE"));
}

#[tokio::test]
async fn invalid_json_is_a_bad_request() {
    let state = state();
    let res = post(&state, "/api/convert/ui-to-external", "{not json").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let out = body(&res);
    assert_eq!(out["success"], json!(false));
    assert_eq!(out["error"], json!("Invalid JSON in request body"));
    assert!(out.get("stack").is_none());

    let logs = state.logs().entries();
    assert_eq!(logs[0].status, Some(400));
    assert!(logs[0].error.is_some());
}

#[tokio::test]
async fn non_object_body_is_a_bad_request() {
    let res = post(&state(), "/api/convert/ui-to-external", "[1, 2]").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&res)["error"], json!("request body must be a JSON object"));
}

#[tokio::test]
async fn unknown_conversion_is_a_bad_request() {
    let res = post(&state(), "/api/convert/sideways", "{}").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&res)["error"], json!("unknown conversion type: sideways"));
}

#[tokio::test]
async fn dev_mode_adds_stack() {
    let state = AppState::from_config(&ServerConfig::new().with_dev(true));
    let res = post(&state, "/api/convert/getloan-to-external", r#"{"borrower": "x"}"#).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body(&res)["stack"].is_string());
}

#[tokio::test]
async fn logs_list_and_clear() {
    let state = state();
    post(&state, "/api/convert/ui-to-external", "{}").await;
    post(&state, "/api/convert/ui-to-external", r#"{"password": "hunter2"}"#).await;

    let res = get(&state, "/api/logs").await;
    let logs = body(&res);
    assert_eq!(logs.as_array().map(Vec::len), Some(2));
    assert_eq!(logs[0]["request"]["password"], json!("[REDACTED]"));

    let res = warp::test::request()
        .method("DELETE")
        .path("/api/logs")
        .reply(&routes(state.clone()))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body(&res)["message"], json!("Logs cleared"));
    assert!(state.logs().is_empty());
}

#[tokio::test]
async fn truncate_flag_through_both_routes() {
    let state = state();
    assert_eq!(body(&get(&state, "/api/log-settings").await)["truncateEnabled"], json!(false));

    let res = warp::test::request()
        .method("PUT")
        .path("/api/log-settings")
        .body(r#"{"truncateEnabled": true}"#)
        .reply(&routes(state.clone()))
        .await;
    assert_eq!(body(&res)["truncateEnabled"], json!(true));
    assert_eq!(body(&get(&state, "/api/settings/truncate").await)["enabled"], json!(true));

    let res = post(&state, "/api/settings/truncate", r#"{"enabled": false}"#).await;
    assert_eq!(body(&res), json!({"ok": true, "enabled": false}));
    assert!(!state.logs().truncate_enabled());
}

#[tokio::test]
async fn overrides_apply_and_clear() {
    let state = state();
    let res = post(
        &state,
        "/api/overrides",
        r#"{"ORG_TICKER": "ACME", "POLLY_CLIENT_SECRET": "s3cret", "POLLY_PASSWORD": "  "}"#,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res.headers()["set-cookie"].to_str().unwrap().to_string();
    assert!(cookie.starts_with("lpg-session="));
    let pair = cookie.split(';').next().unwrap().to_string();

    let res = warp::test::request()
        .method("GET")
        .path("/api/overrides")
        .header("cookie", &pair)
        .reply(&routes(state.clone()))
        .await;
    let status = body(&res);
    assert_eq!(status["session"], json!(true));
    assert_eq!(status["sources"]["ORG_TICKER"], json!("session"));
    assert_eq!(status["sources"]["POLLY_PASSWORD"], json!("unset"));
    assert_eq!(status["sources"]["POLLY_BASE_URL"], json!("default"));
    assert_eq!(status["sources"]["POLLY_CLIENT_SECRET"], json!("session"));
    assert_eq!(status["orgTicker"], json!("ACME"));
    let text = String::from_utf8_lossy(res.body());
    assert!(!text.contains("s3cret"));
    assert!(!text.contains("api.example"));

    let res = warp::test::request()
        .method("DELETE")
        .path("/api/overrides")
        .header("cookie", &pair)
        .reply(&routes(state.clone()))
        .await;
    assert!(res.headers()["set-cookie"].to_str().unwrap().contains("Max-Age=0"));

    let res = warp::test::request()
        .method("GET")
        .path("/api/overrides")
        .header("cookie", &pair)
        .reply(&routes(state.clone()))
        .await;
    let status = body(&res);
    assert_eq!(status["session"], json!(false));
    assert_eq!(status["orgTicker"], json!("RMS"));
}

#[tokio::test]
async fn loan_form_fields_and_payload() {
    let state = state();
    let request = json!({"sample": sample_loan()});
    let res = post(&state, "/api/loan-form/fields", &request.to_string()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let out = body(&res);
    let fields = out["fields"].clone();
    assert!(fields
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f["key"] == json!("amount") && f["isRequired"] == json!(true)));
    assert_eq!(out["form"]["customValues"], json!({}));

    let request = json!({"fields": fields, "form": {"amount": "1000.00", "borrower.firstName": "Ann"}});
    let res = post(&state, "/api/loan-form/payload", &request.to_string()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let data = body(&res)["data"].clone();
    assert_eq!(data["amount"], json!("1000.00"));
    assert_eq!(data["borrower"]["firstName"], json!("Ann"));
    assert_eq!(data["customValues"], json!({}));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let res = get(&state(), "/api/nothing-here").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(&res)["success"], json!(false));
}
