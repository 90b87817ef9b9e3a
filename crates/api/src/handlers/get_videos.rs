//! `get-videos`: list every active video, newest first.

use serde::Serialize;
use vidhost_db::models::video::VideoListItem;
use vidhost_db::repositories::VideoRepo;

use crate::cors::{CorsPolicy, JSON_HEADERS};
use crate::error::FunctionResult;
use crate::event::{FunctionEvent, FunctionResponse};
use crate::state::AppState;

const CORS: CorsPolicy = CorsPolicy {
    methods: &["GET"],
    allow_headers: JSON_HEADERS,
};

const ERROR_CONTEXT: &str = "Failed to get videos";

#[derive(Debug, Serialize)]
struct VideoListResponse {
    success: bool,
    videos: Vec<VideoListItem>,
    count: usize,
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
    let pool = state.require_pool()?;

    let videos: Vec<VideoListItem> = VideoRepo::list_active(pool)
        .await?
        .into_iter()
        .map(VideoListItem::from)
        .collect();

    tracing::debug!(count = videos.len(), "Listed active videos");

    FunctionResponse::ok(&VideoListResponse {
        success: true,
        count: videos.len(),
        videos,
    })
}
