//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod llm_provider;
mod repositories;
mod sleeper;

pub use llm_provider::{
    ChatMessage, LlmError, LlmProviderPort, ProviderConfig, ProviderId, ProviderResolverPort,
};
pub use repositories::{
    EvaluationStorePort, NovelRepositoryPort, NovelSummary, RepositoryError,
    SettingsRepositoryPort, StoredEvaluation,
};
pub use sleeper::SleeperPort;

// 分词器是纯计算，定义在领域层
pub use crate::domain::chunking::TokenCounter;
