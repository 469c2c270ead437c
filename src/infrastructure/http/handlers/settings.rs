//! Settings HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GetSettings, SaveSettings};
use crate::domain::evaluation::StageSettings;
use crate::infrastructure::http::dto::{ApiResponse, SettingsSavedResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 读取全部阶段设置
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<StageSettings>>>, ApiError> {
    let settings = state.get_settings_handler.handle(GetSettings).await?;

    Ok(Json(ApiResponse::success(settings)))
}

/// 覆盖保存阶段设置
pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<Vec<StageSettings>>,
) -> Result<Json<ApiResponse<SettingsSavedResponse>>, ApiError> {
    let stages = state
        .save_settings_handler
        .handle(SaveSettings { settings })
        .await?;

    Ok(Json(ApiResponse::success(SettingsSavedResponse { stages })))
}
