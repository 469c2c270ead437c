//! Token 计数器实现

use thiserror::Error;
use tiktoken_rs::CoreBPE;

use crate::application::ports::TokenCounter;

#[derive(Debug, Error)]
#[error("Tokenizer initialization failed: {0}")]
pub struct TokenizerError(String);

/// cl100k_base 编码
pub struct TiktokenCounter {
    bpe: CoreBPE,
}

impl TiktokenCounter {
    pub fn cl100k() -> Result<Self, TokenizerError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| TokenizerError(e.to_string()))?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

/// 按空白切分的近似计数，离线运行与测试用
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenCounter;

impl TokenCounter for WhitespaceTokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

/// 按配置名构造计数器
pub fn build_token_counter(
    name: &str,
) -> Result<std::sync::Arc<dyn TokenCounter>, TokenizerError> {
    match name {
        "tiktoken" => Ok(std::sync::Arc::new(TiktokenCounter::cl100k()?)),
        "whitespace" => Ok(std::sync::Arc::new(WhitespaceTokenCounter)),
        other => Err(TokenizerError(format!("unknown tokenizer: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_counter() {
        assert_eq!(WhitespaceTokenCounter.count_tokens("a b\n c"), 3);
        assert_eq!(WhitespaceTokenCounter.count_tokens(""), 0);
    }

    #[test]
    fn test_tiktoken_counts_tokens() {
        let counter = TiktokenCounter::cl100k().unwrap();
        assert_eq!(counter.count_tokens(""), 0);
        assert!(counter.count_tokens("hello world") >= 2);
        assert!(counter.count_tokens("吾輩は猫である。名前はまだ無い。") > 0);
    }

    #[test]
    fn test_unknown_tokenizer_is_rejected() {
        assert!(build_token_counter("sentencepiece").is_err());
        assert!(build_token_counter("whitespace").is_ok());
    }
}
