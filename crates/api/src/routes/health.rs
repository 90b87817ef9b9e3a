use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether `DATABASE_URL` is set.
    pub db_configured: bool,
    /// Whether the database answered a trivial query.
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
///
/// An unconfigured database is not a degradation: functions that need it
/// answer with their own 500.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db_configured, db_healthy) = match &state.pool {
        Some(pool) => (true, vidhost_db::health_check(pool).await.is_ok()),
        None => (false, false),
    };

    let status = if db_configured && !db_healthy {
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_configured,
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
