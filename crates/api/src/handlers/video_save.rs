//! `video-save`: read or replace the video every visitor is shown.
//!
//! ```text
//! GET                                        -> { current_video_url, message }
//! POST { video_url, filename?, file_size? }  -> { success, video_id, video_url, message }
//! ```
//!
//! A POST registers the video and moves the `current_video_url` pointer to
//! it in a single transaction. Concurrent writers are not ordered; the last
//! commit wins.

use serde::{Deserialize, Serialize};
use vidhost_core::error::CoreError;
use vidhost_core::types::DbId;
use vidhost_db::models::site_setting::CURRENT_VIDEO_URL_KEY;
use vidhost_db::models::video::CreateVideoRecord;
use vidhost_db::repositories::{SiteSettingRepo, VideoRepo};
use vidhost_db::DbPool;

use crate::cors::{CorsPolicy, JSON_HEADERS};
use crate::error::{FunctionError, FunctionResult};
use crate::event::{FunctionEvent, FunctionResponse};
use crate::state::AppState;

const CORS: CorsPolicy = CorsPolicy {
    methods: &["GET", "POST"],
    allow_headers: JSON_HEADERS,
};

const ERROR_CONTEXT: &str = "Database error";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SaveVideoRequest {
    video_url: Option<String>,
    filename: Option<String>,
    file_size: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CurrentVideoResponse {
    current_video_url: String,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct SaveVideoResponse {
    success: bool,
    video_id: DbId,
    video_url: String,
    message: &'static str,
}

pub async fn handle(state: &AppState, event: FunctionEvent) -> FunctionResponse {
    if let Some(preflight) = CORS.preflight(&event) {
        return preflight;
    }
    run(state, &event)
        .await
        .unwrap_or_else(|e| e.into_function_response(ERROR_CONTEXT))
}

async fn run(state: &AppState, event: &FunctionEvent) -> FunctionResult<FunctionResponse> {
    let method = CORS.check_method(event)?;
    let pool = state.require_pool()?;

    match method.as_str() {
        "GET" => current_video(pool).await,
        "POST" => save_video(pool, event).await,
        _ => Err(FunctionError::MethodNotAllowed),
    }
}

async fn current_video(pool: &DbPool) -> FunctionResult<FunctionResponse> {
    let current_video_url = SiteSettingRepo::get(pool, CURRENT_VIDEO_URL_KEY)
        .await?
        .map(|setting| setting.setting_value)
        .unwrap_or_default();

    FunctionResponse::ok(&CurrentVideoResponse {
        current_video_url,
        message: "Current video URL retrieved",
    })
}

async fn save_video(pool: &DbPool, event: &FunctionEvent) -> FunctionResult<FunctionResponse> {
    let input: SaveVideoRequest = event.json_body()?;
    let video_url = input
        .video_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| CoreError::Validation("video_url is required".into()))?;
    let filename = input
        .filename
        .unwrap_or_else(|| "uploaded_video.mp4".to_string());

    let video = VideoRepo::create_as_current(
        pool,
        &CreateVideoRecord {
            original_name: filename.clone(),
            filename,
            file_size: Some(input.file_size.unwrap_or(0)),
            video_url,
        },
    )
    .await?;

    tracing::info!(video_id = video.id, video_url = %video.video_url, "Current video replaced");

    FunctionResponse::ok(&SaveVideoResponse {
        success: true,
        video_id: video.id,
        video_url: video.video_url,
        message: "Video URL saved successfully. All users will now see this video.",
    })
}
