use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{Json, Response},
};
use serde_json::{json, Value};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, warn};

/// Reject POST/PUT requests that are not JSON or that announce a body over `max_request_size`
pub async fn request_validation_middleware(
    State(max_request_size): State<usize>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    validate_content_type(&request)?;
    validate_request_size(&request, max_request_size)?;

    Ok(next.run(request).await)
}

fn rejection(status: StatusCode, error: &str, message: String) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "error": error,
            "message": message,
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

fn validate_content_type(request: &Request<Body>) -> Result<(), (StatusCode, Json<Value>)> {
    let method = request.method();
    if *method != Method::POST && *method != Method::PUT {
        return Ok(());
    }

    match request.headers().get(header::CONTENT_TYPE) {
        Some(content_type) => {
            let content_type_str = content_type.to_str().unwrap_or("");
            if !content_type_str.starts_with("application/json") {
                warn!("Invalid content type: {}", content_type_str);
                return Err(rejection(
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "Unsupported media type",
                    "Content-Type must be application/json".to_string(),
                ));
            }
            Ok(())
        }
        None => {
            warn!("Missing content type header");
            Err(rejection(
                StatusCode::BAD_REQUEST,
                "Missing content type",
                "Content-Type header is required for requests with body".to_string(),
            ))
        }
    }
}

fn validate_request_size(
    request: &Request<Body>,
    max_request_size: usize,
) -> Result<(), (StatusCode, Json<Value>)> {
    let length = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    if let Some(length) = length {
        if length > max_request_size {
            error!("Request too large: {} bytes", length);
            return Err(rejection(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request too large",
                format!(
                    "Request size {} bytes exceeds maximum of {} bytes",
                    length, max_request_size
                ),
            ));
        }
    }

    Ok(())
}

/// Permissive CORS for the public API
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(86400))
}
