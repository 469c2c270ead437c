//! Novel Judge - 网络小说评估系统
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Novel: 作品文档、话、切片与指标
//! - Cleaning: 站点样板文本清洗
//! - Analysis: 代表性切片选择与文体指标
//! - Chunking: 按 token 上限分批
//! - Evaluation: 评估标准、提示词与 JSON 提取
//!
//! 应用层 (application/):
//! - Ports: 端口定义（LlmProvider、ProviderResolver、Repositories、Sleeper、TokenCounter）
//! - Commands: 整理作品、保存设置、执行评估
//! - Queries: 作品、设置与评估结果查询
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: LLM provider（429 重试）、分词器、等待
//! - Persistence: JSON 文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
