//! HTTP Middleware
//!
//! HTTP 状态码错误日志与慢请求日志

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::{Duration, Instant};

/// 超过该时长的请求记录为慢请求（评估请求通常较慢）
const SLOW_REQUEST: Duration = Duration::from_secs(30);

/// HTTP 状态码错误日志中间件
///
/// 状态码为 4xx/5xx 时记录日志；业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        // 请求体无法解析等情况由 axum 直接返回 4xx
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    } else if started.elapsed() >= SLOW_REQUEST {
        tracing::info!(method = %method, uri = %uri, elapsed_ms, "Slow request");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
        Json, Router,
    };
    use tower::util::ServiceExt;

    async fn echo(Json(value): Json<serde_json::Value>) -> Json<serde_json::Value> {
        Json(value)
    }

    async fn failing() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn router() -> Router {
        Router::new()
            .route("/echo", post(echo))
            .route("/fail", post(failing))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    fn post_json(uri: &str, body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_passes_response_through() {
        let response = router().oneshot(post_json("/echo", "{\"a\":1}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_body_is_client_error() {
        let response = router().oneshot(post_json("/echo", "{not json")).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_server_error_passes_through() {
        let response = router().oneshot(post_json("/fail", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
