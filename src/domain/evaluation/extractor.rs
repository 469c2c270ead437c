//! 从模型输出中提取 JSON 对象
//!
//! 模型经常在 JSON 前后附带说明文字或代码块，按以下顺序尝试：
//! 1. ```json ... ``` 代码块中的 {...}
//! 2. 从第一个 `{` 到最后一个 `}` 的最大片段
//! 3. 整段文本
//!
//! 任一级解析失败都进入下一级，全部失败时返回 [`ExtractError::Parse`]。

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)```(?:json)?\s*(\{[\s\S]*?\})\s*```").expect("valid regex")
});

static BRACE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid regex"));

/// 评估结果：模型返回的 JSON 对象（结构由评估标准决定）
pub type EvaluationResult = Map<String, Value>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("无法从模型输出中解析 JSON: {0}")]
    Parse(String),
}

/// 提取模型输出中的 JSON 对象
pub fn extract_json(text: &str) -> Result<EvaluationResult, ExtractError> {
    let mut last_error = String::from("empty model output");

    let candidates = [
        FENCED_BLOCK
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim()),
        BRACE_SPAN.find(text).map(|m| m.as_str()),
        Some(text.trim()),
    ];

    for candidate in candidates.into_iter().flatten() {
        match parse_object(candidate) {
            Ok(object) => return Ok(object),
            Err(e) => last_error = e,
        }
    }

    tracing::debug!(
        text_len = text.len(),
        error = %last_error,
        "JSON extraction failed on every tier"
    );
    Err(ExtractError::Parse(last_error))
}

fn parse_object(candidate: &str) -> Result<EvaluationResult, String> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(format!("expected a JSON object, got {}", kind_of(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
