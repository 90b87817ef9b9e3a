//! `cloud-upload`: placeholder upload endpoint with canned responses.
//!
//! GET reports a fixed catalogue (or a single video when `video_id` is
//! given); POST acknowledges an upload without storing anything.

use serde::{Deserialize, Serialize};

use crate::cors::{CorsPolicy, JSON_HEADERS};
use crate::error::{FunctionError, FunctionResult};
use crate::event::{FunctionEvent, FunctionResponse};
use crate::state::AppState;

const CORS: CorsPolicy = CorsPolicy {
    methods: &["GET", "POST"],
    allow_headers: JSON_HEADERS,
};

const ERROR_CONTEXT: &str = "Server error";

const STREAM_URL: &str = "/cloud-upload/stream";
const UPLOAD_URL: &str = "/cloud-upload";

#[derive(Debug, Serialize)]
struct VideoStatusResponse<'a> {
    video_id: &'a str,
    status: &'static str,
    stream_url: &'static str,
    upload_url: &'static str,
}

#[derive(Debug, Serialize)]
struct CatalogueItem {
    id: &'static str,
    title: &'static str,
    status: &'static str,
    stream_url: &'static str,
}

#[derive(Debug, Serialize)]
struct CatalogueResponse {
    videos: Vec<CatalogueItem>,
    upload_url: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UploadRequest {
    filename: Option<String>,
}

#[derive(Debug, Serialize)]
struct UploadAcceptedResponse {
    success: bool,
    video_id: String,
    filename: String,
    status: &'static str,
    upload_url: &'static str,
    message: &'static str,
}

pub async fn handle(_state: &AppState, event: FunctionEvent) -> FunctionResponse {
    if let Some(preflight) = CORS.preflight(&event) {
        return preflight;
    }
    run(&event).unwrap_or_else(|e| e.into_function_response(ERROR_CONTEXT))
}

fn run(event: &FunctionEvent) -> FunctionResult<FunctionResponse> {
    match CORS.check_method(event)?.as_str() {
        "GET" => match event.query_param("video_id") {
            Some(video_id) => FunctionResponse::ok(&VideoStatusResponse {
                video_id,
                status: "available",
                stream_url: STREAM_URL,
                upload_url: UPLOAD_URL,
            }),
            None => FunctionResponse::ok(&CatalogueResponse {
                videos: vec![CatalogueItem {
                    id: "demo",
                    title: "Demo video",
                    status: "available",
                    stream_url: STREAM_URL,
                }],
                upload_url: UPLOAD_URL,
            }),
        },
        "POST" => {
            let input: UploadRequest = event.json_body()?;
            let video_id = format!("video_{}", chrono::Utc::now().timestamp());
            let filename = input.filename.unwrap_or_else(|| "video.mp4".to_string());

            tracing::debug!(%video_id, %filename, "Stub upload acknowledged");

            FunctionResponse::ok(&UploadAcceptedResponse {
                success: true,
                video_id,
                filename,
                status: "ready",
                upload_url: UPLOAD_URL,
                message: "Upload endpoint ready",
            })
        }
        _ => Err(FunctionError::MethodNotAllowed),
    }
}
