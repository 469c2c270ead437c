//! OpenAI 兼容的 chat completions 协议
//!
//! chatgpt / qwen / phi / deepseek 共用，qwen 与 phi 经由 HuggingFace router

use serde_json::{json, Value};

use super::backend::{parse_body, ProviderBackend};
use super::transport::PreparedRequest;
use crate::application::ports::{ChatMessage, LlmError, ProviderConfig, ProviderId};

pub struct OpenAiCompatBackend {
    config: ProviderConfig,
    temperature: Option<f64>,
}

impl OpenAiCompatBackend {
    pub fn new(config: ProviderConfig) -> Self {
        // 只有 OpenAI 显式指定温度
        let temperature = match config.provider_id {
            ProviderId::ChatGpt => Some(0.7),
            _ => None,
        };
        Self {
            config,
            temperature,
        }
    }
}

impl ProviderBackend for OpenAiCompatBackend {
    fn provider_id(&self) -> ProviderId {
        self.config.provider_id
    }

    fn build_request(&self, messages: &[ChatMessage]) -> PreparedRequest {
        let mut body = json!({
            "model": self.config.model_name,
            "messages": messages,
        });
        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        PreparedRequest::new(&self.config.endpoint, body).bearer(&self.config.api_key)
    }

    fn parse_response(&self, body: &str) -> Result<String, LlmError> {
        let value = parse_body(body)?;
        value
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(|s| s.to_string())
            .ok_or_else(|| {
                LlmError::InvalidResponse("missing choices[0].message.content".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider_id: ProviderId) -> ProviderConfig {
        ProviderConfig {
            provider_id,
            api_key: "sk-test".to_string(),
            model_name: provider_id.default_model().to_string(),
            endpoint: "https://router.example/v1/chat/completions".to_string(),
        }
    }

    #[test]
    fn test_openai_request_has_temperature() {
        let backend = OpenAiCompatBackend::new(config(ProviderId::ChatGpt));
        let request = backend.build_request(&[ChatMessage::user("こんにちは")]);

        assert_eq!(request.body["model"], "gpt-4o-mini");
        assert_eq!(request.body["temperature"], 0.7);
        assert_eq!(request.body["messages"][0]["role"], "user");
        assert_eq!(request.body["messages"][0]["content"], "こんにちは");
        assert!(request
            .headers
            .contains(&("Authorization".to_string(), "Bearer sk-test".to_string())));
    }

    #[test]
    fn test_router_request_has_no_temperature() {
        let backend = OpenAiCompatBackend::new(config(ProviderId::Phi));
        let request = backend.build_request(&[ChatMessage::user("x")]);

        assert_eq!(request.body["model"], "microsoft/phi-4");
        assert!(request.body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_response() {
        let backend = OpenAiCompatBackend::new(config(ProviderId::Deepseek));
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"a\":1}"}}]}"#;

        assert_eq!(backend.parse_response(body).unwrap(), "{\"a\":1}");
        assert!(matches!(
            backend.parse_response(r#"{"choices":[]}"#),
            Err(LlmError::InvalidResponse(_))
        ));
        assert!(backend.parse_response("<html>").is_err());
    }
}
