//! `download-from-drive`: proxy a publicly shared Google Drive file.
//!
//! ```text
//! POST { "driveUrl": "https://drive.google.com/file/d/<id>/view" }
//!   -> { success, filename, size, videoBase64, message }
//! ```
//!
//! The file is returned inline; the client is responsible for keeping it.

use serde::{Deserialize, Serialize};
use vidhost_core::drive::extract_file_id;
use vidhost_core::error::CoreError;

use crate::cors::CorsPolicy;
use crate::error::FunctionResult;
use crate::event::{FunctionEvent, FunctionResponse};
use crate::state::AppState;

const CORS: CorsPolicy = CorsPolicy {
    methods: &["POST"],
    allow_headers: "Content-Type, X-User-Id",
};

const ERROR_CONTEXT: &str = "Server error";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DownloadRequest {
    drive_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DownloadResponse {
    success: bool,
    filename: String,
    size: u64,
    video_base64: String,
    message: String,
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

    let input: DownloadRequest = event.json_body()?;
    let drive_url = input
        .drive_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("driveUrl is required".into()))?;

    let file_id = extract_file_id(&drive_url)?;
    let download = state.drive.download(file_id).await?;

    FunctionResponse::ok(&DownloadResponse {
        success: true,
        message: format!("Video downloaded successfully. Size: {} bytes", download.size),
        filename: download.filename,
        size: download.size,
        video_base64: download.content_base64,
    })
}
