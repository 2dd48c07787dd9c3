use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::models::ServiceError;

/// Error half of every resource handler's result
pub type ApiError = (StatusCode, Json<Value>);

/// Convert a service error into the wire-level status and error body
pub fn service_error_to_response(err: ServiceError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": err.reason(),
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
