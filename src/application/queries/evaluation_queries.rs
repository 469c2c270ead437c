//! Evaluation Queries

/// 获取某作品的全部评估结果
#[derive(Debug, Clone)]
pub struct GetEvaluations {
    pub work_id: String,
}

/// 列出全部评估结果
#[derive(Debug, Clone)]
pub struct ListEvaluations;
