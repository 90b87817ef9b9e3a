//! The function invocation contract.
//!
//! A function receives a [`FunctionEvent`] (an HTTP request flattened into
//! JSON) and returns a [`FunctionResponse`]. Field names follow the
//! serverless platform convention (`httpMethod`, `queryStringParameters`,
//! `statusCode`, `isBase64Encoded`).

use std::collections::{BTreeMap, HashMap};

use axum::body::Body;
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vidhost_core::data_url::decode_base64;

use crate::cors::ALLOW_ORIGIN_ANY;
use crate::error::{FunctionError, FunctionResult};

fn default_method() -> String {
    "GET".to_string()
}

/// Inbound request representation passed to a function.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    #[serde(default = "default_method")]
    pub http_method: String,
    /// Request headers. Read but not used for authorization.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// Raw request body, JSON-encoded by convention.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl FunctionEvent {
    /// An event with the given method and nothing else.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            headers: HashMap::new(),
            query_string_parameters: None,
            body: None,
            is_base64_encoded: false,
        }
    }

    /// The HTTP method, upper-cased.
    pub fn method(&self) -> String {
        self.http_method.to_ascii_uppercase()
    }

    /// Look up a query string parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    /// Parse the body as JSON. A missing or blank body parses as `{}`.
    pub fn json_body<T: DeserializeOwned>(&self) -> FunctionResult<T> {
        let raw = match &self.body {
            Some(body) if self.is_base64_encoded => {
                let bytes = decode_base64(body)?;
                String::from_utf8(bytes)
                    .map_err(|e| FunctionError::BadRequest(format!("Invalid JSON body: {e}")))?
            }
            Some(body) => body.clone(),
            None => String::new(),
        };

        let raw = if raw.trim().is_empty() { "{}" } else { raw.as_str() };

        serde_json::from_str(raw)
            .map_err(|e| FunctionError::BadRequest(format!("Invalid JSON body: {e}")))
    }
}

/// Outbound response representation returned by a function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded payload; empty for preflight responses.
    pub body: String,
    pub is_base64_encoded: bool,
}

impl FunctionResponse {
    /// A JSON response carrying the wildcard CORS origin.
    pub fn json(status: StatusCode, payload: &serde_json::Value) -> Self {
        Self::with_body(status, payload.to_string())
    }

    /// A 200 response serializing `payload`.
    pub fn ok<T: Serialize>(payload: &T) -> FunctionResult<Self> {
        Ok(Self::with_body(StatusCode::OK, serde_json::to_string(payload)?))
    }

    fn with_body(status: StatusCode, body: String) -> Self {
        let headers = BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), ALLOW_ORIGIN_ANY.to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]);
        Self {
            status_code: status.as_u16(),
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    /// Look up a response header, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Parse the body back into JSON. Intended for tests and clients.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = if self.is_base64_encoded {
            match decode_base64(&self.body) {
                Ok(bytes) => Body::from(bytes),
                Err(e) => {
                    tracing::error!(error = %e, "Function returned an undecodable base64 body");
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            }
        } else {
            Body::from(self.body)
        };

        let mut response = Response::new(body);
        *response.status_mut() = status;

        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }

        response
    }
}
