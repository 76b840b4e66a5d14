use std::time::Instant;

use axum::{
    body::{Body, HttpBody, to_bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

/// Largest error body buffered for logging; bigger or unsized bodies pass
/// through without being logged.
const MAX_BUFFERED_BODY: usize = 64 * 1024;
const MAX_LOGGED_CHARS: usize = 1024;

/// Wraps each request in a span with a fresh request id, logs the outcome and
/// echoes the id in `x-request-id`. Server error bodies are logged too.
pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "request",
        %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let started = Instant::now();
        let response = next.run(req).await;
        let status = response.status();
        let latency_ms = started.elapsed().as_millis() as u64;

        let mut response = if status.is_server_error() {
            log_server_error(response, status, latency_ms).await
        } else {
            info!(%status, latency_ms, "request completed");
            response
        };

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert("x-request-id", value);
        }
        response
    }
    .instrument(span)
    .await
}

async fn log_server_error(response: Response, status: StatusCode, latency_ms: u64) -> Response {
    let size = response.body().size_hint().upper();
    if !size.is_some_and(|n| n <= MAX_BUFFERED_BODY as u64) {
        error!(%status, latency_ms, body_bytes = ?size, "server error, body not logged");
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_BUFFERED_BODY).await {
        Ok(b) => b,
        Err(e) => {
            error!(%status, latency_ms, "failed to read error response body: {}", e);
            parts.headers.remove(header::CONTENT_LENGTH);
            return Response::from_parts(parts, Body::empty());
        }
    };
    let body_str: String = String::from_utf8_lossy(&bytes)
        .chars()
        .take(MAX_LOGGED_CHARS)
        .collect();

    error!(%status, latency_ms, body = %body_str, "server error");

    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
