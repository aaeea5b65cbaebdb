//! Uniform response envelope
//!
//! Every dashboard endpoint answers with transport status 200 and
//! `{"status": "SUCCESS" | "ERROR", "message": "...", "data": ...}`.
//! Business failures are signaled only through `status`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome flag carried by every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Success,
    Error,
}

/// Standard API response wrapper
///
/// Built in one step through [`ApiResponse::success`] or [`ApiResponse::error`];
/// an error envelope never carries data.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResultStatus,
    /// Human-readable outcome description
    pub message: String,
    /// Payload, `null` on error
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResultStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
