use axum::{
    extract::{MatchedPath, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::{Status, TraceContextExt};
use std::{sync::Arc, time::Instant};
use tracing::{error, info, Instrument, Span};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use super::Metrics;

/// First hop of `X-Forwarded-For`, falling back to `X-Real-IP`
fn client_address(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|value| value.to_str().ok()))
        .unwrap_or("unknown")
        .trim()
        .to_string()
}

/// Route template when one matched, so `/api/foods/:food_id` is one series
fn route_of(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

/// Wrap every request in a server span and record the HTTP metrics
pub async fn observability_middleware(
    metrics: Arc<Metrics>,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let endpoint = route_of(&request);
    let client_ip = client_address(request.headers());
    let span_name = format!("{} {}", method, endpoint);

    let span = tracing::info_span!(
        target: "outlet_food_rs::http",
        "{}", span_name,
        otel.name = %span_name,
        otel.kind = "server",
        http.method = %method,
        http.route = %endpoint,
        http.url = %request.uri(),
        client.address = %client_ip,
        http.response.status_code = tracing::field::Empty,
        http.response_time_ms = tracing::field::Empty,
    );

    async move {
        metrics.increment_in_flight(&method, &endpoint);

        let trace_id = Span::current()
            .context()
            .span()
            .span_context()
            .trace_id()
            .to_string();
        info!(trace_id = %trace_id, method = %method, path = %endpoint, client_ip = %client_ip, "Processing request");

        let response = next.run(request).await;

        let duration = start_time.elapsed();
        let status_code = response.status().as_u16();

        let current = Span::current();
        current.record("http.response.status_code", status_code);
        current.record("http.response_time_ms", duration.as_millis() as u64);
        current.context().span().set_status(if status_code >= 500 {
            Status::error("HTTP server error")
        } else {
            Status::Ok
        });

        metrics.record_http_request(&method, &endpoint, status_code, duration.as_secs_f64());
        metrics.decrement_in_flight(&method, &endpoint);

        if status_code >= 400 {
            error!(
                trace_id = %trace_id,
                method = %method,
                path = %endpoint,
                status_code = status_code,
                duration_ms = duration.as_millis() as u64,
                "Request completed with error"
            );
        } else {
            info!(
                trace_id = %trace_id,
                method = %method,
                path = %endpoint,
                status_code = status_code,
                duration_ms = duration.as_millis() as u64,
                "Request completed successfully"
            );
        }

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_address_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.9"));
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        assert_eq!(client_address(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_address_fallbacks() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_address(&headers), "unknown");

        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.9"));
        assert_eq!(client_address(&headers), "10.0.0.9");
    }
}
