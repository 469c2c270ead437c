//! 应用层错误定义
//!
//! 统一的命令/查询错误类型，以及评估用例内部的错误分类

use thiserror::Error;

use crate::application::ports::{LlmError, RepositoryError};
use crate::domain::evaluation::ExtractError;
use crate::domain::novel::NovelError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::not_found("Entity", id),
            RepositoryError::InvalidKey(key) => Self::validation(format!("invalid key: {}", key)),
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

impl From<NovelError> for ApplicationError {
    fn from(err: NovelError) -> Self {
        match err {
            NovelError::NotFound(id) => Self::not_found("Novel", id),
            other => Self::ValidationError(other.to_string()),
        }
    }
}

/// 评估用例错误
///
/// 在 EvaluateNovelHandler 边界统一转换为 `{"error": "..."}`
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("小説データの取得に失敗しました: work id = {0}")]
    NotFound(String),

    #[error("評価段階が見つかりません: stage = {0}")]
    StageNotFound(String),

    #[error(transparent)]
    Novel(#[from] NovelError),

    #[error("Failed to call LLM API: {0}")]
    Llm(#[from] LlmError),

    /// index 从 1 开始
    #[error("Failed to call LLM API on batch {index}/{total}: {source}")]
    Batch {
        index: usize,
        total: usize,
        #[source]
        source: LlmError,
    },

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("Prompt serialization failed: {0}")]
    Prompt(#[from] serde_json::Error),
}
