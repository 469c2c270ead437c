//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{EvaluationMode, EvaluationReport, PrepareNovelResponse};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Novel DTOs
// ============================================================================

/// 作品整理结果
#[derive(Debug, Serialize)]
pub struct NovelPreparedResponse {
    pub work_id: String,
    pub title: String,
    pub scraped_episodes: usize,
    pub total_episodes: usize,
    pub removed_boilerplates: bool,
    pub notes: Vec<String>,
}

impl From<PrepareNovelResponse> for NovelPreparedResponse {
    fn from(r: PrepareNovelResponse) -> Self {
        Self {
            work_id: r.summary.work_id,
            title: r.summary.title,
            scraped_episodes: r.summary.scraped_episodes,
            total_episodes: r.summary.total_episodes,
            removed_boilerplates: r.cleaning.removed_boilerplates,
            notes: r.cleaning.notes,
        }
    }
}

// ============================================================================
// Settings DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SettingsSavedResponse {
    pub stages: usize,
}

// ============================================================================
// Evaluation DTOs
// ============================================================================

/// 评估请求
#[derive(Debug, Deserialize)]
pub struct RunEvaluationRequest {
    pub provider: String,
    pub work_id: String,
    pub stage: String,
    #[serde(default)]
    pub episode_limit: Option<usize>,
    #[serde(default)]
    pub mode: EvaluationMode,
}

/// 评估成功时的返回
#[derive(Debug, Serialize)]
pub struct EvaluationRunResponse {
    pub work_id: String,
    pub provider: String,
    pub batches: usize,
    pub result: Value,
}

impl From<EvaluationReport> for EvaluationRunResponse {
    fn from(report: EvaluationReport) -> Self {
        Self {
            work_id: report.work_id,
            provider: report.provider.to_string(),
            batches: report.batches,
            result: Value::Object(report.result),
        }
    }
}
