//! Evaluation HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{
    EvaluateNovel, EvaluationOutcome, GetEvaluations, ListEvaluations, StoredEvaluation,
};
use crate::infrastructure::http::dto::{ApiResponse, EvaluationRunResponse, RunEvaluationRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 执行一次评估
///
/// 请求会一直等到所有批次结束（包括 429 退避）
pub async fn run_evaluation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RunEvaluationRequest>,
) -> Result<Json<ApiResponse<EvaluationRunResponse>>, ApiError> {
    let command = EvaluateNovel {
        provider: req.provider,
        work_id: req.work_id,
        stage: req.stage,
        episode_limit: req.episode_limit,
        mode: req.mode,
    };

    match state.evaluate_novel_handler.handle(command).await {
        EvaluationOutcome::Completed(report) => Ok(Json(ApiResponse::success(report.into()))),
        EvaluationOutcome::Failed { error } => Err(ApiError::EvaluationFailed(error)),
    }
}

/// 全部评估结果
pub async fn list_evaluations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<StoredEvaluation>>>, ApiError> {
    let result = state.list_evaluations_handler.handle(ListEvaluations).await?;

    Ok(Json(ApiResponse::success(result)))
}

/// 某作品的评估结果
pub async fn get_evaluations(
    State(state): State<Arc<AppState>>,
    Path(work_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<StoredEvaluation>>>, ApiError> {
    let result = state
        .get_evaluations_handler
        .handle(GetEvaluations { work_id })
        .await?;

    Ok(Json(ApiResponse::success(result)))
}
