//! LLM Provider Port - 大模型调用抽象
//!
//! 各家模型服务只需实现 "接收消息列表，返回生成文本" 这一能力，
//! 具体的 HTTP 协议与重试在 infrastructure/adapters/llm 层

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// LLM 调用错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 缺少凭据或配置无效，发生在任何网络请求之前
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 429 重试次数用尽
    #[error("Rate limit exhausted after {attempts} attempts")]
    RateLimitExhausted { attempts: u32 },

    /// 网络错误或超时
    #[error("Transport error: {0}")]
    Transport(String),

    /// 非 200 / 非 429 响应
    #[error("Upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// 200 响应中取不到文本
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 对话消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// 支持的模型服务
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    ChatGpt,
    Claude,
    Gemini,
    Qwen,
    Phi,
    Deepseek,
}

impl ProviderId {
    pub const ALL: [ProviderId; 6] = [
        ProviderId::ChatGpt,
        ProviderId::Claude,
        ProviderId::Gemini,
        ProviderId::Qwen,
        ProviderId::Phi,
        ProviderId::Deepseek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::ChatGpt => "chatgpt",
            ProviderId::Claude => "claude",
            ProviderId::Gemini => "gemini",
            ProviderId::Qwen => "qwen",
            ProviderId::Phi => "phi",
            ProviderId::Deepseek => "deepseek",
        }
    }

    /// API Key 所在的环境变量
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderId::ChatGpt => "OPENAI_API_KEY",
            ProviderId::Claude => "ANTHROPIC_API_KEY",
            ProviderId::Gemini => "GOOGLE_API_KEY",
            ProviderId::Qwen => "QWEN_API_KEY",
            ProviderId::Phi => "PHI_API_KEY",
            ProviderId::Deepseek => "DEEPSEEK_API_KEY",
        }
    }

    /// 模型名所在的环境变量
    pub fn model_var(&self) -> &'static str {
        match self {
            ProviderId::ChatGpt => "OPENAI_MODEL",
            ProviderId::Claude => "ANTHROPIC_MODEL",
            ProviderId::Gemini => "GEMINI_MODEL",
            ProviderId::Qwen => "QWEN_MODEL",
            ProviderId::Phi => "PHI_MODEL",
            ProviderId::Deepseek => "DEEPSEEK_MODEL",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderId::ChatGpt => "gpt-4o-mini",
            ProviderId::Claude => "claude-3-5-sonnet-20241022",
            ProviderId::Gemini => "gemini-1.5-pro",
            ProviderId::Qwen => "Qwen/Qwen3-235B-A22B-Instruct-2507",
            ProviderId::Phi => "microsoft/phi-4",
            ProviderId::Deepseek => "deepseek-chat",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LlmError::Configuration(format!("unknown provider: {}", s)))
    }
}

/// 单次评估使用的服务配置（每次评估重新解析）
#[derive(Clone)]
pub struct ProviderConfig {
    pub provider_id: ProviderId,
    pub api_key: String,
    pub model_name: String,
    pub endpoint: String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider_id", &self.provider_id)
            .field("api_key", &"***")
            .field("model_name", &self.model_name)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// LLM Provider Port
#[async_trait]
pub trait LlmProviderPort: Send + Sync {
    fn provider_id(&self) -> ProviderId;

    /// 发送消息列表，返回模型生成的文本
    async fn call(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

/// Provider 解析端口
///
/// 从环境读取凭据并构造可调用的 provider；缺少凭据时立即失败
pub trait ProviderResolverPort: Send + Sync {
    fn resolve(&self, provider: ProviderId) -> Result<Arc<dyn LlmProviderPort>, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_parse() {
        assert_eq!("chatgpt".parse::<ProviderId>().unwrap(), ProviderId::ChatGpt);
        assert_eq!(" Claude ".parse::<ProviderId>().unwrap(), ProviderId::Claude);
        assert!(matches!(
            "llama".parse::<ProviderId>(),
            Err(LlmError::Configuration(_))
        ));
    }

    #[test]
    fn test_provider_id_serde_matches_as_str() {
        for id in ProviderId::ALL {
            let json = serde_json::to_value(id).unwrap();
            assert_eq!(json, id.as_str());
        }
    }

    #[test]
    fn test_config_debug_hides_key() {
        let config = ProviderConfig {
            provider_id: ProviderId::Qwen,
            api_key: "secret".to_string(),
            model_name: ProviderId::Qwen.default_model().to_string(),
            endpoint: "http://localhost".to_string(),
        };
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
