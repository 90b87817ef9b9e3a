#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use vidhost_api::config::DriveConfig;
use vidhost_api::drive::DriveClient;
use vidhost_api::routes;
use vidhost_api::state::AppState;

/// Drive origin that nothing listens on. Tests that never reach Drive use it.
pub const UNREACHABLE_DRIVE: &str = "http://127.0.0.1:9";

/// Build a test `DriveConfig` pointing at `drive_base_url`.
pub fn test_drive_config(drive_base_url: &str, drive_timeout_secs: u64) -> DriveConfig {
    DriveConfig {
        base_url: drive_base_url.to_string(),
        timeout_secs: drive_timeout_secs,
        scratch_dir: std::env::temp_dir(),
    }
}

/// Build shared state with an optional pool and the given Drive origin.
pub fn test_state(
    pool: Option<PgPool>,
    drive_base_url: &str,
    drive_timeout_secs: u64,
) -> AppState {
    let drive_config = test_drive_config(drive_base_url, drive_timeout_secs);
    let drive = DriveClient::new(&drive_config).unwrap();
    AppState {
        pool,
        drive: Arc::new(drive),
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_app(state: AppState) -> Router {
    build_app_with_timeout(state, Duration::from_secs(30))
}

/// Like [`build_app`], with an explicit whole-request timeout.
pub fn build_app_with_timeout(state: AppState, request_timeout: Duration) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::app_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state)
}

/// Router backed by `pool` (or no database) with an unreachable Drive.
pub fn build_test_app(pool: Option<PgPool>) -> Router {
    build_app(test_state(pool, UNREACHABLE_DRIVE, 5))
}

/// Send a request with an optional JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn options(app: Router, uri: &str) -> Response {
    send(app, Method::OPTIONS, uri, None).await
}

/// Read the full response body as bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Read the full response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
