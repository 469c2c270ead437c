//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping               GET   健康检查
//! - /api/novels             GET   作品列表
//! - /api/novels             POST  整理并保存抓取结果
//! - /api/novels/:work_id    GET   作品文档
//! - /api/settings           GET   阶段设置
//! - /api/settings           POST  覆盖保存阶段设置
//! - /api/evals/run          POST  执行评估
//! - /api/evals              GET   全部评估结果
//! - /api/evals/:work_id     GET   某作品的评估结果

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/novels", novel_routes())
        .route(
            "/settings",
            get(handlers::get_settings).post(handlers::save_settings),
        )
        .nest("/evals", evaluation_routes())
}

/// Novel 路由
fn novel_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_novels).post(handlers::prepare_novel))
        .route("/:work_id", get(handlers::get_novel))
}

/// Evaluation 路由
fn evaluation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_evaluations))
        .route("/run", post(handlers::run_evaluation))
        .route("/:work_id", get(handlers::get_evaluations))
}
