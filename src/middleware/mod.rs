use axum::{extract::Request, middleware::Next, response::Response};

/// One log line per request, after the handler resolves.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    tracing::info!("{} {} - {}", method, uri, response.status());

    response
}
