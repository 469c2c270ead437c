//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    EvaluateNovelHandler, EvaluationOptions, PrepareNovelHandler, SaveSettingsHandler,
    // Query handlers
    GetEvaluationsHandler, GetNovelHandler, GetSettingsHandler, ListEvaluationsHandler,
    ListNovelsHandler,
    // Ports
    EvaluationStorePort, NovelRepositoryPort, ProviderResolverPort, SettingsRepositoryPort,
    SleeperPort, TokenCounter,
};
use crate::domain::cleaning::PatternSet;

/// 应用状态依赖的端口
pub struct AppPorts {
    pub novel_repo: Arc<dyn NovelRepositoryPort>,
    pub settings_repo: Arc<dyn SettingsRepositoryPort>,
    pub eval_store: Arc<dyn EvaluationStorePort>,
    pub resolver: Arc<dyn ProviderResolverPort>,
    pub token_counter: Arc<dyn TokenCounter>,
    pub sleeper: Arc<dyn SleeperPort>,
}

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub prepare_novel_handler: PrepareNovelHandler,
    pub save_settings_handler: SaveSettingsHandler,
    pub evaluate_novel_handler: EvaluateNovelHandler,

    // ========== Query Handlers ==========
    pub get_novel_handler: GetNovelHandler,
    pub list_novels_handler: ListNovelsHandler,
    pub get_settings_handler: GetSettingsHandler,
    pub get_evaluations_handler: GetEvaluationsHandler,
    pub list_evaluations_handler: ListEvaluationsHandler,
}

impl AppState {
    /// 创建应用状态
    ///
    /// `patterns` 为配置文件中的样板规则，None 时按站点选择预设
    pub fn new(ports: AppPorts, options: EvaluationOptions, patterns: Option<PatternSet>) -> Self {
        let AppPorts {
            novel_repo,
            settings_repo,
            eval_store,
            resolver,
            token_counter,
            sleeper,
        } = ports;

        Self {
            // Command handlers
            prepare_novel_handler: PrepareNovelHandler::new(novel_repo.clone(), patterns),
            save_settings_handler: SaveSettingsHandler::new(settings_repo.clone()),
            evaluate_novel_handler: EvaluateNovelHandler::new(
                novel_repo.clone(),
                settings_repo.clone(),
                eval_store.clone(),
                resolver,
                token_counter,
                sleeper,
                options,
            ),

            // Query handlers
            get_novel_handler: GetNovelHandler::new(novel_repo.clone()),
            list_novels_handler: ListNovelsHandler::new(novel_repo),
            get_settings_handler: GetSettingsHandler::new(settings_repo),
            get_evaluations_handler: GetEvaluationsHandler::new(eval_store.clone()),
            list_evaluations_handler: ListEvaluationsHandler::new(eval_store),
        }
    }
}
