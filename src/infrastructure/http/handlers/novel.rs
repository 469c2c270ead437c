//! Novel HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{GetNovel, ListNovels, NovelSummary, PrepareNovel};
use crate::domain::novel::NovelDocument;
use crate::infrastructure::http::dto::{ApiResponse, NovelPreparedResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Handlers
// ============================================================================

/// 清洗、分析并保存抓取好的作品
pub async fn prepare_novel(
    State(state): State<Arc<AppState>>,
    Json(command): Json<PrepareNovel>,
) -> Result<Json<ApiResponse<NovelPreparedResponse>>, ApiError> {
    tracing::debug!(
        work_id = %command.work_id,
        episodes = command.episodes.len(),
        "Prepare novel request"
    );

    let result = state.prepare_novel_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(result.into())))
}

/// 获取作品列表
pub async fn list_novels(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<NovelSummary>>>, ApiError> {
    let result = state.list_novels_handler.handle(ListNovels).await?;

    Ok(Json(ApiResponse::success(result)))
}

/// 获取作品文档
pub async fn get_novel(
    State(state): State<Arc<AppState>>,
    Path(work_id): Path<String>,
) -> Result<Json<ApiResponse<NovelDocument>>, ApiError> {
    let document = state.get_novel_handler.handle(GetNovel { work_id }).await?;

    Ok(Json(ApiResponse::success(document)))
}
