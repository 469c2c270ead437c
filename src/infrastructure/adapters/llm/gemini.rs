//! Google Gemini generateContent API
//!
//! 用户消息拼接成一段文本发送，响应中各 part 的文本以换行连接

use serde_json::{json, Value};

use super::backend::{parse_body, ProviderBackend};
use super::transport::PreparedRequest;
use crate::application::ports::{ChatMessage, LlmError, ProviderConfig, ProviderId};

pub struct GeminiBackend {
    config: ProviderConfig,
}

impl GeminiBackend {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// `{endpoint}/{model}:generateContent`
    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model_name
        )
    }
}

impl ProviderBackend for GeminiBackend {
    fn provider_id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn build_request(&self, messages: &[ChatMessage]) -> PreparedRequest {
        let prompt: String = messages
            .iter()
            .filter(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .collect();

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
        });

        PreparedRequest::new(self.url(), body).header("x-goog-api-key", &self.config.api_key)
    }

    fn parse_response(&self, body: &str) -> Result<String, LlmError> {
        let value = parse_body(body)?;
        let texts: Vec<&str> = value
            .get("candidates")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|candidate| candidate.pointer("/content/parts"))
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .filter(|text| !text.is_empty())
            .collect();

        if texts.is_empty() {
            return Err(LlmError::InvalidResponse(
                "no text in candidates".to_string(),
            ));
        }
        Ok(texts.join("\n"))
    }
}
