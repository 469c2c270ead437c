//! HTTP 传输层
//!
//! 重试引擎只关心状态码、Retry-After 和响应体，
//! 具体的 HTTP 客户端通过 [`HttpTransport`] 注入

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::LlmError;

/// 已构造好的请求
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl PreparedRequest {
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }
}

/// 原始响应
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Retry-After 头的原始值
    pub retry_after: Option<String>,
    pub body: String,
}

/// HTTP 传输抽象
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// 发送 JSON POST 请求；网络错误和超时返回 [`LlmError::Transport`]
    async fn post_json(&self, request: &PreparedRequest) -> Result<RawResponse, LlmError>;
}

/// 基于 reqwest 的传输实现
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, request: &PreparedRequest) -> Result<RawResponse, LlmError> {
        let mut builder = self.client.post(&request.url).json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Transport(format!("request timed out: {}", e))
            } else if e.is_connect() {
                LlmError::Transport(format!("cannot connect to {}: {}", request.url, e))
            } else {
                LlmError::Transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(format!("failed to read body: {}", e)))?;

        Ok(RawResponse {
            status,
            retry_after,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_json_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat"))
            .and(header("Authorization", "Bearer k"))
            .and(body_json(json!({"a": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let request =
            PreparedRequest::new(format!("{}/v1/chat", server.uri()), json!({"a": 1})).bearer("k");

        let response = transport.post_json(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "ok");
        assert!(response.retry_after.is_none());
    }

    #[tokio::test]
    async fn test_retry_after_header_is_captured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let response = transport
            .post_json(&PreparedRequest::new(server.uri(), json!({})))
            .await
            .unwrap();

        assert_eq!(response.status, 429);
        assert_eq!(response.retry_after.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_millis(50)).unwrap();
        let err = transport
            .post_json(&PreparedRequest::new(server.uri(), json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Transport(_)));
    }
}
