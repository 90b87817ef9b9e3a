//! `video-upload`: accept a base64 video and hand it back as a data URL.
//!
//! Nothing is stored server-side. The response carries a fresh storage
//! filename, the decoded size, and a `data:` URL the client keeps itself.

use serde::{Deserialize, Serialize};
use vidhost_core::data_url::{
    build_data_url, compact_base64, decode_base64, strip_data_url_header, DEFAULT_MIME_TYPE,
};
use vidhost_core::error::CoreError;
use vidhost_core::naming::unique_storage_filename;

use crate::cors::{CorsPolicy, JSON_HEADERS};
use crate::error::FunctionResult;
use crate::event::{FunctionEvent, FunctionResponse};
use crate::state::AppState;

const CORS: CorsPolicy = CorsPolicy {
    methods: &["POST"],
    allow_headers: JSON_HEADERS,
};

const ERROR_CONTEXT: &str = "Server error";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InlineUploadRequest {
    video_data: Option<String>,
    filename: Option<String>,
    mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineUploadResponse {
    success: bool,
    filename: String,
    size: usize,
    data_url: String,
    message: String,
}

pub async fn handle(_state: &AppState, event: FunctionEvent) -> FunctionResponse {
    if let Some(preflight) = CORS.preflight(&event) {
        return preflight;
    }
    run(&event).unwrap_or_else(|e| e.into_function_response(ERROR_CONTEXT))
}

fn run(event: &FunctionEvent) -> FunctionResult<FunctionResponse> {
    CORS.check_method(event)?;

    let input: InlineUploadRequest = event.json_body()?;
    let video_data = input
        .video_data
        .filter(|data| !data.is_empty())
        .ok_or_else(|| CoreError::Validation("No video data provided".into()))?;
    let original_name = input.filename.unwrap_or_else(|| "video.mp4".to_string());
    let mime_type = input
        .mime_type
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

    // The echoed data URL must carry exactly the bytes that were decoded.
    let payload = compact_base64(strip_data_url_header(&video_data));
    let size = decode_base64(&payload)?.len();

    let filename = unique_storage_filename(&original_name);
    tracing::info!(%filename, size, %mime_type, "Inline video accepted");

    FunctionResponse::ok(&InlineUploadResponse {
        success: true,
        filename,
        size,
        data_url: build_data_url(&mime_type, &payload),
        message: format!(
            "Video processed successfully. Size: {size} bytes. Store in localStorage for persistence."
        ),
    })
}
