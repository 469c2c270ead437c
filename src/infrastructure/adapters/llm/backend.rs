//! Provider 协议抽象
//!
//! 每家服务只负责两件事：把消息列表组装成请求，从 200 响应体中取出文本

use crate::application::ports::{ChatMessage, LlmError, ProviderId};

use super::transport::PreparedRequest;

pub trait ProviderBackend: Send + Sync {
    fn provider_id(&self) -> ProviderId;

    /// 组装请求（URL、认证头、请求体）
    fn build_request(&self, messages: &[ChatMessage]) -> PreparedRequest;

    /// 解析 200 响应体
    fn parse_response(&self, body: &str) -> Result<String, LlmError>;
}

/// 解析 JSON 响应体，失败时返回 InvalidResponse
pub(crate) fn parse_body(body: &str) -> Result<serde_json::Value, LlmError> {
    serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("response is not JSON: {}", e)))
}
