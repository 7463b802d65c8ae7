//! Warp filter tree

use std::convert::Infallible;

use lpg_session::SESSION_COOKIE;
use warp::{Filter, Reply};

use crate::error::handle_rejection;
use crate::handlers;
use crate::state::AppState;

/// Largest accepted request body
pub const MAX_BODY_BYTES: u64 = 4 * 1024 * 1024;

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn body() -> impl Filter<Extract = (warp::hyper::body::Bytes,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::bytes())
}

fn session_cookie() -> impl Filter<Extract = (Option<String>,), Error = Infallible> + Copy {
    warp::cookie::optional::<String>(SESSION_COOKIE)
}

/// Every route, with rejection handling and request tracing
pub fn routes(state: AppState) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let dev = state.is_dev();

    let health = warp::path!("health")
        .and(warp::get())
        .and_then(handlers::health);

    let list_conversions = warp::path!("api" / "convert")
        .and(warp::get())
        .and_then(handlers::list_conversions);
    let convert = warp::path!("api" / "convert" / String)
        .and(warp::post())
        .and(warp::header::headers_cloned())
        .and(body())
        .and(with_state(state.clone()))
        .and_then(handlers::convert);

    let list_logs = warp::path!("api" / "logs")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::list_logs);
    let clear_logs = warp::path!("api" / "logs")
        .and(warp::delete())
        .and(with_state(state.clone()))
        .and_then(handlers::clear_logs);

    let get_log_settings = warp::path!("api" / "log-settings")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_log_settings);
    let put_log_settings = warp::path!("api" / "log-settings")
        .and(warp::put())
        .and(body())
        .and(with_state(state.clone()))
        .and_then(handlers::put_log_settings);

    let get_truncate = warp::path!("api" / "settings" / "truncate")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_truncate);
    let post_truncate = warp::path!("api" / "settings" / "truncate")
        .and(warp::post())
        .and(body())
        .and(with_state(state.clone()))
        .and_then(handlers::post_truncate);

    let get_overrides = warp::path!("api" / "overrides")
        .and(warp::get())
        .and(session_cookie())
        .and(with_state(state.clone()))
        .and_then(handlers::get_overrides);
    let apply_overrides = warp::path!("api" / "overrides")
        .and(warp::post())
        .and(session_cookie())
        .and(body())
        .and(with_state(state.clone()))
        .and_then(handlers::apply_overrides);
    let clear_overrides = warp::path!("api" / "overrides")
        .and(warp::delete())
        .and(session_cookie())
        .and(with_state(state))
        .and_then(handlers::clear_overrides);

    let loan_form_fields = warp::path!("api" / "loan-form" / "fields")
        .and(warp::post())
        .and(body())
        .and_then(handlers::loan_form_fields);
    let loan_form_payload = warp::path!("api" / "loan-form" / "payload")
        .and(warp::post())
        .and(body())
        .and_then(handlers::loan_form_payload);

    health
        .or(list_conversions)
        .or(convert)
        .or(list_logs)
        .or(clear_logs)
        .or(get_log_settings)
        .or(put_log_settings)
        .or(get_truncate)
        .or(post_truncate)
        .or(get_overrides)
        .or(apply_overrides)
        .or(clear_overrides)
        .or(loan_form_fields)
        .or(loan_form_payload)
        .recover(move |err: warp::Rejection| handle_rejection(err, dev))
        .with(warp::trace::request())
}
