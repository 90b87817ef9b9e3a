use axum::http::StatusCode;
use serde_json::json;
use vidhost_core::error::CoreError;

use crate::event::FunctionResponse;

/// Function-level error type.
///
/// Wraps [`CoreError`] for domain errors and adds the transport, database
/// and upstream failures a function can hit. Nothing escapes a function as
/// a transport-level failure: every variant is turned into a structured
/// [`FunctionResponse`] by [`FunctionError::into_function_response`].
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    /// A domain-level error from `vidhost_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The HTTP method is not served by this function.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// `DATABASE_URL` is unset.
    #[error("Database not configured")]
    DatabaseNotConfigured,

    /// Google Drive answered with a non-200 status.
    #[error("Upstream returned HTTP {status}")]
    Upstream { status: u16 },

    /// The outbound request exceeded its timeout.
    #[error("Upstream request timed out")]
    Timeout,

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An outbound HTTP failure other than a timeout.
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Scratch file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Response serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for function return values.
pub type FunctionResult<T> = Result<T, FunctionError>;

impl From<reqwest::Error> for FunctionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FunctionError::Timeout
        } else {
            FunctionError::Http(err)
        }
    }
}

impl FunctionError {
    /// Classify the error into a status code and the `error` message.
    ///
    /// `context` prefixes the message of unclassified failures, e.g.
    /// `"Upload failed"` yields `"Upload failed: <cause>"`.
    pub fn classify(&self, context: &str) -> (StatusCode, String) {
        match self {
            FunctionError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::InvalidDriveUrl | CoreError::InvalidBase64(_) => {
                    (StatusCode::BAD_REQUEST, core.to_string())
                }
            },
            FunctionError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            FunctionError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            FunctionError::DatabaseNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database not configured".to_string(),
            ),
            FunctionError::Upstream { status } => (
                StatusCode::BAD_REQUEST,
                format!("Failed to download from Google Drive. Status: {status}"),
            ),
            FunctionError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "Download timeout. File might be too large.".to_string(),
            ),
            FunctionError::Database(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{context}: {err}"))
            }
            FunctionError::Http(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{context}: {err}"))
            }
            FunctionError::Io(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{context}: {err}"))
            }
            FunctionError::Serialization(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{context}: {err}"))
            }
        }
    }

    /// Convert into the `{ "error": ... }` response a function returns.
    pub fn into_function_response(self, context: &str) -> FunctionResponse {
        let (status, message) = self.classify(context);

        if status.is_server_error() {
            tracing::error!(error = %self, context, "Function failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "Function rejected request");
        }

        FunctionResponse::json(status, &json!({ "error": message }))
    }
}
