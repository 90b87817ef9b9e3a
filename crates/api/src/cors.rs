//! Per-function CORS and method dispatch.
//!
//! Each function declares a [`CorsPolicy`]. Preflight `OPTIONS` requests are
//! answered directly from the policy; any other method outside the policy's
//! allow-list is rejected with 405 before the function body runs.

use std::collections::BTreeMap;

use axum::http::StatusCode;

use crate::error::{FunctionError, FunctionResult};
use crate::event::{FunctionEvent, FunctionResponse};

/// Every function is public: any origin may call it.
pub const ALLOW_ORIGIN_ANY: &str = "*";

/// Preflight cache lifetime in seconds.
const MAX_AGE_SECS: &str = "86400";

/// Allowed request headers for functions that take a JSON body.
pub const JSON_HEADERS: &str = "Content-Type, Authorization";

/// Methods and headers a function accepts.
#[derive(Debug, Clone, Copy)]
pub struct CorsPolicy {
    /// Methods served, excluding the implicit `OPTIONS`.
    pub methods: &'static [&'static str],
    /// Value of `Access-Control-Allow-Headers`.
    pub allow_headers: &'static str,
}

impl CorsPolicy {
    /// Value of `Access-Control-Allow-Methods`.
    pub fn allow_methods(&self) -> String {
        let mut methods = self.methods.to_vec();
        methods.push("OPTIONS");
        methods.join(", ")
    }

    /// Answer a preflight request, or `None` if `event` is not one.
    pub fn preflight(&self, event: &FunctionEvent) -> Option<FunctionResponse> {
        if event.method() != "OPTIONS" {
            return None;
        }

        let headers = BTreeMap::from([
            (
                "Access-Control-Allow-Origin".to_string(),
                ALLOW_ORIGIN_ANY.to_string(),
            ),
            ("Access-Control-Allow-Methods".to_string(), self.allow_methods()),
            (
                "Access-Control-Allow-Headers".to_string(),
                self.allow_headers.to_string(),
            ),
            ("Access-Control-Max-Age".to_string(), MAX_AGE_SECS.to_string()),
        ]);

        Some(FunctionResponse {
            status_code: StatusCode::OK.as_u16(),
            headers,
            body: String::new(),
            is_base64_encoded: false,
        })
    }

    /// Return the upper-cased method if the policy serves it.
    pub fn check_method(&self, event: &FunctionEvent) -> FunctionResult<String> {
        let method = event.method();
        if self.methods.iter().any(|allowed| *allowed == method) {
            Ok(method)
        } else {
            Err(FunctionError::MethodNotAllowed)
        }
    }
}
