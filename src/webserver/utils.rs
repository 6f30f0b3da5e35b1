/// Response helpers for the REST API
///
/// Every endpoint answers with the same JSON envelope:
/// `{ "success": bool, "data": ..., "error": ..., "timestamp": ... }`
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// 200 OK with a data payload
pub fn success_response<T: Serialize>(data: T) -> Response {
    success_response_with_status(StatusCode::OK, data)
}

/// Success envelope with an explicit status (e.g. 202 Accepted)
pub fn success_response_with_status<T: Serialize>(status: StatusCode, data: T) -> Response {
    (
        status,
        Json(ApiEnvelope {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }),
    )
        .into_response()
}

/// Error envelope with the given status
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiEnvelope::<()> {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp: Utc::now(),
        }),
    )
        .into_response()
}
