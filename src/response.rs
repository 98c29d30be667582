use crate::errors::ApiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// The uniform response wrapper every endpoint returns. Success and failure
/// share one shape; clients branch on `success` (or `status`) alone.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: u16,
    pub message: String,
    pub success: bool,
    pub data: Value,
}

impl Envelope {
    pub fn ok(message: &str, data: Value) -> Self {
        Envelope { status: 200, message: message.to_string(), success: true, data }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Envelope { status, message: message.to_string(), success: false, data: Value::Null }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let code = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (code, Json(self)).into_response()
    }
}

impl From<ApiError> for Envelope {
    fn from(err: ApiError) -> Self {
        Envelope::error(err.status_code(), &err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::warn!("request failed: {self}");
        Envelope::from(self).into_response()
    }
}
