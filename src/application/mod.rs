//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（LlmProvider、Repository、Sleeper）
//! - commands: CQRS 命令及处理器（整理作品、保存设置、执行评估）
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use commands::{
    EvaluateNovel, EvaluationMode, OverviewInput, PrepareNovel, SaveSettings,
    // Handlers
    handlers::{
        EvaluateNovelHandler, EvaluationOptions, EvaluationOutcome, EvaluationReport,
        PrepareNovelHandler, PrepareNovelResponse, SaveSettingsHandler,
    },
};

pub use error::{ApplicationError, EvaluationError};

pub use ports::{
    ChatMessage, EvaluationStorePort, LlmError, LlmProviderPort, NovelRepositoryPort,
    NovelSummary, ProviderConfig, ProviderId, ProviderResolverPort, RepositoryError,
    SettingsRepositoryPort, SleeperPort, StoredEvaluation, TokenCounter,
};

pub use queries::{
    GetEvaluations, GetNovel, GetSettings, ListEvaluations, ListNovels,
    // Handlers
    handlers::{
        GetEvaluationsHandler, GetNovelHandler, GetSettingsHandler, ListEvaluationsHandler,
        ListNovelsHandler,
    },
};
