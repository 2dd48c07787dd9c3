use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::instrument;

/// Name and version reported by the health endpoint
#[derive(Clone)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
}

/// Health check endpoint handler
#[instrument(name = "health_check", skip(info))]
pub async fn health_check(State(info): State<ServiceInfo>) -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "service": info.name,
        "version": info.version,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let info = ServiceInfo {
            name: "outlet-food-rs".to_string(),
            version: "1.2.3".to_string(),
        };

        let Json(body) = health_check(State(info)).await.unwrap();

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "outlet-food-rs");
        assert_eq!(body["version"], "1.2.3");
    }
}
