//! `upload-video`: register a video by URL under a hash-derived filename.
//!
//! The storage filename is `sha256(videoUrl).ext`, so the same URL always
//! gets the same name. Rows are not deduplicated: registering a URL twice
//! inserts two rows.

use serde::{Deserialize, Serialize};
use vidhost_core::error::CoreError;
use vidhost_core::naming::hashed_storage_filename;
use vidhost_core::types::DbId;
use vidhost_db::models::video::CreateVideoRecord;
use vidhost_db::repositories::VideoRepo;

use crate::cors::{CorsPolicy, JSON_HEADERS};
use crate::error::FunctionResult;
use crate::event::{FunctionEvent, FunctionResponse};
use crate::state::AppState;

const CORS: CorsPolicy = CorsPolicy {
    methods: &["POST"],
    allow_headers: JSON_HEADERS,
};

const ERROR_CONTEXT: &str = "Upload failed";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UploadVideoRequest {
    video_url: Option<String>,
    video_type: Option<String>,
    filename: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadVideoResponse {
    success: bool,
    video_id: DbId,
    video_url: String,
    filename: String,
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
    CORS.check_method(event)?;

    let input: UploadVideoRequest = event.json_body()?;
    let video_url = input
        .video_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| CoreError::Validation("No video URL provided".into()))?;
    let original_name = input.filename.unwrap_or_else(|| "video.mp4".to_string());
    let video_type = input.video_type.unwrap_or_else(|| "file".to_string());

    let pool = state.require_pool()?;

    let filename = hashed_storage_filename(&video_url, &original_name);
    let video = VideoRepo::create(
        pool,
        &CreateVideoRecord {
            filename: filename.clone(),
            original_name,
            file_size: None,
            video_url,
        },
    )
    .await?;

    tracing::info!(video_id = video.id, %filename, %video_type, "Video registered by URL");

    FunctionResponse::ok(&UploadVideoResponse {
        success: true,
        video_id: video.id,
        video_url: video.video_url,
        filename,
        message: "Video saved successfully",
    })
}
