//! Repository Ports - 出站端口
//!
//! 定义作品、评估结果、阶段设置的持久化抽象接口
//! 具体实现在 infrastructure 层（JSON 文件）

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::llm_provider::ProviderId;
use crate::domain::evaluation::{EvaluationResult, StageSettings};
use crate::domain::novel::NovelDocument;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

// ============================================================================
// Novel Repository
// ============================================================================

/// 作品列表项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NovelSummary {
    pub work_id: String,
    pub title: String,
    pub author: String,
    pub site_name: String,
    pub scraped_episodes: usize,
    pub total_episodes: usize,
}

impl NovelSummary {
    pub fn from_document(work_id: &str, document: &NovelDocument) -> Self {
        Self {
            work_id: work_id.to_string(),
            title: document.title().to_string(),
            author: document.author().to_string(),
            site_name: document.site_name().to_string(),
            scraped_episodes: document.scraped_episodes(),
            total_episodes: document.total_episodes(),
        }
    }
}

/// Novel Repository Port
#[async_trait]
pub trait NovelRepositoryPort: Send + Sync {
    /// 保存作品（覆盖同 ID 的旧文档）
    async fn save(&self, work_id: &str, document: &NovelDocument) -> Result<(), RepositoryError>;

    /// 根据作品 ID 查找
    async fn find_by_id(&self, work_id: &str) -> Result<Option<NovelDocument>, RepositoryError>;

    /// 获取所有作品摘要（按作品 ID 排序）
    async fn find_all(&self) -> Result<Vec<NovelSummary>, RepositoryError>;
}

// ============================================================================
// Evaluation Store
// ============================================================================

/// 已保存的评估结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredEvaluation {
    pub work_id: String,
    pub provider: String,
    pub result: EvaluationResult,
}

/// Evaluation Store Port
///
/// 每个 (work_id, provider) 对应一个结果，重复评估时覆盖
#[async_trait]
pub trait EvaluationStorePort: Send + Sync {
    async fn save(
        &self,
        work_id: &str,
        provider: ProviderId,
        result: &EvaluationResult,
    ) -> Result<(), RepositoryError>;

    /// 某作品的全部评估结果
    async fn find_by_work(&self, work_id: &str) -> Result<Vec<StoredEvaluation>, RepositoryError>;

    /// 全部评估结果
    async fn find_all(&self) -> Result<Vec<StoredEvaluation>, RepositoryError>;
}

// ============================================================================
// Settings Repository
// ============================================================================

/// Settings Repository Port
#[async_trait]
pub trait SettingsRepositoryPort: Send + Sync {
    /// 读取全部阶段设置，文件不存在时返回空列表
    async fn load(&self) -> Result<Vec<StageSettings>, RepositoryError>;

    async fn save(&self, settings: &[StageSettings]) -> Result<(), RepositoryError>;
}
