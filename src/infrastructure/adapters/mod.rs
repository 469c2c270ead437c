//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod llm;
pub mod sleeper;
pub mod tokenizer;

pub use llm::*;
pub use sleeper::TokioSleeper;
pub use tokenizer::{build_token_counter, TiktokenCounter, TokenizerError, WhitespaceTokenCounter};
