//! Request logging middleware

use std::time::{Duration, Instant};

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};

/// Requests slower than this are flagged regardless of status
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(1);

/// Logs one line per completed request with method, path, status and latency.
///
/// 404s stay at info level; bots probing for admin panels would otherwise
/// drown the warn channel.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed();

    let status = response.status();
    let latency_ms = elapsed.as_millis() as u64;

    let noteworthy = status.is_server_error()
        || (status.is_client_error() && status.as_u16() != 404)
        || elapsed >= SLOW_REQUEST_THRESHOLD;

    if noteworthy {
        warn!(%method, path, status = status.as_u16(), latency_ms, "request");
    } else {
        info!(%method, path, status = status.as_u16(), latency_ms, "request");
    }

    response
}
