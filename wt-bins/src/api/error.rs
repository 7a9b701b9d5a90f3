//! API error responses
//!
//! Every error is returned as `{"error": "<message>"}` with a status that
//! tells the caller whether resending the same request can succeed.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// wt-bins API errors
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed schema validation (never reaches the store)
    InvalidPayload(StatusCode, String),
    /// Store unavailable or query failed
    Storage(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidPayload(rejection.status(), rejection.body_text())
    }
}

impl From<wt_common::Error> for ApiError {
    fn from(err: wt_common::Error) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidPayload(status, msg) => (status, msg),
            ApiError::Storage(msg) => {
                error!("Storage failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
