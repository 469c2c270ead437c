//! Anthropic Messages API

use serde_json::{json, Value};

use super::backend::{parse_body, ProviderBackend};
use super::transport::PreparedRequest;
use crate::application::ports::{ChatMessage, LlmError, ProviderConfig, ProviderId};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;
const TEMPERATURE: f64 = 0.2;

pub struct AnthropicBackend {
    config: ProviderConfig,
}

impl AnthropicBackend {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

impl ProviderBackend for AnthropicBackend {
    fn provider_id(&self) -> ProviderId {
        ProviderId::Claude
    }

    fn build_request(&self, messages: &[ChatMessage]) -> PreparedRequest {
        // system 消息放在顶层字段
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == "system")
            .map(|m| m.content.as_str())
            .collect();
        let turns: Vec<&ChatMessage> = messages.iter().filter(|m| m.role != "system").collect();

        let mut body = json!({
            "model": self.config.model_name,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "messages": turns,
        });
        if !system.is_empty() {
            body["system"] = json!(system.join("\n"));
        }

        PreparedRequest::new(&self.config.endpoint, body)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
    }

    fn parse_response(&self, body: &str) -> Result<String, LlmError> {
        let value = parse_body(body)?;
        let blocks = value
            .get("content")
            .and_then(Value::as_array)
            .ok_or_else(|| LlmError::InvalidResponse("missing content blocks".to_string()))?;

        let text: String = blocks
            .iter()
            .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .collect();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "no text block in response".to_string(),
            ));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> AnthropicBackend {
        AnthropicBackend::new(ProviderConfig {
            provider_id: ProviderId::Claude,
            api_key: "ak".to_string(),
            model_name: "claude-3-5-sonnet-20241022".to_string(),
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
        })
    }

    #[test]
    fn test_request_shape() {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: "あなたは編集者です".to_string(),
            },
            ChatMessage::user("評価してください"),
        ];

        let request = backend().build_request(&messages);

        assert_eq!(request.body["max_tokens"], 4096);
        assert_eq!(request.body["temperature"], 0.2);
        assert_eq!(request.body["system"], "あなたは編集者です");
        assert_eq!(request.body["messages"].as_array().unwrap().len(), 1);
        assert!(request
            .headers
            .contains(&("x-api-key".to_string(), "ak".to_string())));
    }

    #[test]
    fn test_parse_joins_text_blocks() {
        let body = r#"{"content":[{"type":"text","text":"{\"a\":"},{"type":"tool_use","id":"x"},{"type":"text","text":"1}"}]}"#;
        assert_eq!(backend().parse_response(body).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_parse_without_text_fails() {
        assert!(backend().parse_response(r#"{"content":[]}"#).is_err());
        assert!(backend().parse_response(r#"{"type":"error"}"#).is_err());
    }
}
