//! Novel Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NovelError {
    #[error("作品不存在: {0}")]
    NotFound(String),

    #[error("请求的话数({requested})超过了总话数({available})")]
    InsufficientInput { requested: usize, available: usize },

    #[error("没有可用的话: {0}")]
    NoEpisodes(String),

    #[error("无效的样板文本规则: {0}")]
    InvalidPattern(String),
}
