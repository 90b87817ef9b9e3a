//! HTTP gateway in front of the functions.
//!
//! Two ways in:
//!
//! ```text
//! ANY  /{function}          the request is flattened into a FunctionEvent
//! POST /invoke/{function}   the body already is a FunctionEvent (JSON)
//! ```

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, post};
use axum::{Json, Router};
use serde_json::json;

use crate::event::FunctionEvent;
use crate::handlers::{self, FunctionName};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invoke/{function}", post(invoke_raw))
        .route("/{function}", any(invoke_http))
}

/// `ANY /{function}` -- adapt a plain HTTP request.
async fn invoke_http(
    State(state): State<AppState>,
    Path(function): Path<String>,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Response {
    let name = match function.parse::<FunctionName>() {
        Ok(name) => name,
        Err(e) => return unknown_function(e.to_string()),
    };

    let event = FunctionEvent {
        http_method: method.as_str().to_string(),
        headers: flatten_headers(&headers),
        query_string_parameters: (!query.is_empty()).then_some(query),
        body: (!body.is_empty()).then_some(body),
        is_base64_encoded: false,
    };

    handlers::invoke(&state, name, event).await.into_response()
}

/// `POST /invoke/{function}` -- platform-style invocation.
async fn invoke_raw(
    State(state): State<AppState>,
    Path(function): Path<String>,
    Json(event): Json<FunctionEvent>,
) -> Response {
    match function.parse::<FunctionName>() {
        Ok(name) => Json(handlers::invoke(&state, name, event).await).into_response(),
        Err(e) => unknown_function(e.to_string()),
    }
}

fn unknown_function(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

/// Collapse a header map into single string values. Repeated headers are
/// joined with `", "`; non-UTF-8 values are dropped.
fn flatten_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut flat: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        flat.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    flat
}
