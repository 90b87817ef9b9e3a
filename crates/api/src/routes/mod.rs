pub mod functions;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// /health                      service and database health
/// /invoke/{function}     POST  raw invocation: FunctionEvent in, FunctionResponse out
/// /{function}            ANY   HTTP request adapted to a FunctionEvent
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(functions::router())
}
