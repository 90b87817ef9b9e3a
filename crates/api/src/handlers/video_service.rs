//! `video-service`: static readiness probe for the frontend.

use serde_json::json;

use crate::cors::{CorsPolicy, JSON_HEADERS};
use crate::event::{FunctionEvent, FunctionResponse};
use crate::state::AppState;

const CORS: CorsPolicy = CorsPolicy {
    methods: &["GET"],
    allow_headers: JSON_HEADERS,
};

const ERROR_CONTEXT: &str = "Server error";

pub async fn handle(_state: &AppState, event: FunctionEvent) -> FunctionResponse {
    if let Some(preflight) = CORS.preflight(&event) {
        return preflight;
    }
    match CORS.check_method(&event) {
        Ok(_) => FunctionResponse::json(
            axum::http::StatusCode::OK,
            &json!({ "status": "ready", "message": "Video service is working" }),
        ),
        Err(e) => e.into_function_response(ERROR_CONTEXT),
    }
}
