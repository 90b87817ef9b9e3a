//! Integration tests for `download-from-drive` against an in-process fake
//! of the Google Drive download endpoint.

mod common;

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::Query;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use common::{body_json, post_json};
use serde_json::json;

const SMALL_FILE: &[u8] = b"\x00\x00\x00\x18ftypmp42 small video";
const LARGE_FILE: &[u8] = b"\x00\x00\x00\x18ftypisom confirmed large video";
const CONFIRM_TOKEN: &str = "t0k3n";

/// Delay of each `SLOW_CONFIRM` round trip. Under the 2 s deadline on its
/// own, over it once the confirmation retry is added.
const SLOW_STEP: Duration = Duration::from_millis(1500);

/// Fake `/uc` endpoint keyed on the `id` query parameter.
async fn fake_uc(Query(params): Query<HashMap<String, String>>) -> Response {
    let id = params.get("id").map(String::as_str).unwrap_or_default();
    let confirm = params.get("confirm").map(String::as_str);

    match (id, confirm) {
        ("SMALL", _) => (
            [
                (CONTENT_TYPE, "video/mp4"),
                (CONTENT_DISPOSITION, "attachment; filename=\"holiday.mp4\""),
            ],
            SMALL_FILE,
        )
            .into_response(),
        ("LARGE", Some(CONFIRM_TOKEN)) => {
            ([(CONTENT_TYPE, "video/mp4")], LARGE_FILE).into_response()
        }
        ("LARGE", _) => confirmation_page(id),
        ("SLOW_CONFIRM", Some(CONFIRM_TOKEN)) => {
            tokio::time::sleep(SLOW_STEP).await;
            ([(CONTENT_TYPE, "video/mp4")], LARGE_FILE).into_response()
        }
        ("SLOW_CONFIRM", _) => {
            tokio::time::sleep(SLOW_STEP).await;
            confirmation_page(id)
        }
        ("SLOW", _) => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            ([(CONTENT_TYPE, "video/mp4")], SMALL_FILE).into_response()
        }
        _ => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// Drive's "can't scan this file for viruses" page with its confirm cookie.
fn confirmation_page(id: &str) -> Response {
    (
        [
            (CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                SET_COOKIE,
                format!("download_warning_123456={CONFIRM_TOKEN}; Path=/uc"),
            ),
        ],
        format!(
            "<html><a href=\"/uc?export=download&amp;confirm={CONFIRM_TOKEN}&amp;id={id}\">\
             Download anyway</a></html>"
        ),
    )
        .into_response()
}

/// Start the fake Drive on an ephemeral port and return its origin.
async fn spawn_fake_drive() -> String {
    let app = Router::new().route("/uc", get(fake_uc));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn app_with_fake_drive(timeout_secs: u64) -> Router {
    let origin = spawn_fake_drive().await;
    common::build_app(common::test_state(None, &origin, timeout_secs))
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_drive_url_returns_400() {
    let app = common::build_test_app(None);
    let response = post_json(app, "/download-from-drive", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "driveUrl is required");
}

#[tokio::test]
async fn url_without_file_id_returns_400() {
    let app = common::build_test_app(None);
    let response = post_json(
        app,
        "/download-from-drive",
        json!({"driveUrl": "https://example.com/video.mp4"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid Google Drive URL");
}

// ---------------------------------------------------------------------------
// Downloads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn downloads_small_file_by_path_link() {
    let app = app_with_fake_drive(5).await;
    let response = post_json(
        app,
        "/download-from-drive",
        json!({"driveUrl": "https://drive.google.com/file/d/SMALL/view?usp=sharing"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["filename"], "holiday.mp4");
    assert_eq!(json["size"], SMALL_FILE.len());

    let decoded = STANDARD.decode(json["videoBase64"].as_str().unwrap()).unwrap();
    assert_eq!(decoded, SMALL_FILE);
}

#[tokio::test]
async fn follows_confirmation_for_large_file() {
    let app = app_with_fake_drive(5).await;
    let response = post_json(
        app,
        "/download-from-drive",
        json!({"driveUrl": "https://drive.google.com/open?id=LARGE&authuser=0"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // No Content-Disposition on the confirmed response.
    assert_eq!(json["filename"], "video.mp4");
    assert_eq!(json["size"], LARGE_FILE.len());

    let decoded = STANDARD.decode(json["videoBase64"].as_str().unwrap()).unwrap();
    assert_eq!(decoded, LARGE_FILE);
}

// ---------------------------------------------------------------------------
// Upstream failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upstream_not_found_returns_400_with_status() {
    let app = app_with_fake_drive(5).await;
    let response = post_json(
        app,
        "/download-from-drive",
        json!({"driveUrl": "https://drive.google.com/file/d/MISSING/view"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Failed to download from Google Drive. Status: 404"
    );
}

#[tokio::test]
async fn slow_upstream_returns_408() {
    let app = app_with_fake_drive(1).await;
    let response = post_json(
        app,
        "/download-from-drive",
        json!({"driveUrl": "https://drive.google.com/file/d/SLOW/view"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Download timeout. File might be too large.");
}

#[tokio::test]
async fn deadline_covers_the_confirmation_round_trip() {
    let origin = spawn_fake_drive().await;
    let state = common::test_state(None, &origin, 2);
    let app = common::build_app_with_timeout(state, Duration::from_secs(3));

    let response = post_json(
        app,
        "/download-from-drive",
        json!({"driveUrl": "https://drive.google.com/file/d/SLOW_CONFIRM/view"}),
    )
    .await;

    // Answered by the function itself, not by the gateway timeout.
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(response.headers()["content-type"], "application/json");
    let json = body_json(response).await;
    assert_eq!(json["error"], "Download timeout. File might be too large.");
}

#[tokio::test]
async fn unreachable_upstream_returns_500_with_context() {
    let app = common::build_test_app(None);
    let response = post_json(
        app,
        "/download-from-drive",
        json!({"driveUrl": "https://drive.google.com/file/d/ANY/view"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Server error: "));
}
