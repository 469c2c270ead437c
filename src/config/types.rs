//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::EvaluationOptions;
use crate::infrastructure::adapters::RetryPolicy;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM 调用配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// 分批配置
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// 样板文本清洗配置
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 评估用例参数
    pub fn evaluation_options(&self) -> EvaluationOptions {
        EvaluationOptions {
            token_ceiling: self.chunking.token_ceiling,
            batch_pause: Duration::from_secs(self.llm.batch_pause_secs),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// LLM 调用配置
///
/// API Key 与模型名不在这里配置，每次评估时从环境变量读取
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// 单次请求超时（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// 429 时的最大尝试次数
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// 指数退避的基础间隔（毫秒）
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// 单次等待上限（秒）
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,

    /// 分批评估时相邻请求的间隔（秒）
    #[serde(default = "default_batch_pause_secs")]
    pub batch_pause_secs: u64,

    /// provider 名 → 覆盖地址
    #[serde(default)]
    pub endpoints: HashMap<String, String>,
}

fn default_llm_timeout() -> u64 {
    120
}

fn default_max_retries() -> u32 {
    6
}

fn default_base_delay_ms() -> u64 {
    2000
}

fn default_max_delay_secs() -> u64 {
    60
}

fn default_batch_pause_secs() -> u64 {
    3
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_llm_timeout(),
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_secs: default_max_delay_secs(),
            batch_pause_secs: default_batch_pause_secs(),
            endpoints: HashMap::new(),
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// 分批配置
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingConfig {
    /// 单批 token 上限
    #[serde(default = "default_token_ceiling")]
    pub token_ceiling: usize,

    /// 分词器: tiktoken | whitespace
    #[serde(default = "default_tokenizer")]
    pub tokenizer: String,
}

fn default_token_ceiling() -> usize {
    crate::domain::chunking::DEFAULT_TOKEN_CEILING
}

fn default_tokenizer() -> String {
    "tiktoken".to_string()
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            token_ceiling: default_token_ceiling(),
            tokenizer: default_tokenizer(),
        }
    }
}

/// 清洗配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleaningConfig {
    /// 自定义样板规则（TOML），设置后覆盖站点预设
    #[serde(default)]
    pub patterns_file: Option<PathBuf>,
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 作品文档目录
    #[serde(default = "default_works_dir")]
    pub works_dir: PathBuf,

    /// 评估结果目录
    #[serde(default = "default_evals_dir")]
    pub evals_dir: PathBuf,

    /// 阶段设置文件
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,
}

fn default_works_dir() -> PathBuf {
    PathBuf::from("data/works")
}

fn default_evals_dir() -> PathBuf {
    PathBuf::from("data/evals")
}

fn default_settings_file() -> PathBuf {
    PathBuf::from("data/settings.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            works_dir: default_works_dir(),
            evals_dir: default_evals_dir(),
            settings_file: default_settings_file(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr(), "127.0.0.1:8080");
        assert_eq!(config.llm.timeout(), Duration::from_secs(120));
        assert_eq!(config.chunking.token_ceiling, 40_000);
        assert_eq!(config.chunking.tokenizer, "tiktoken");
        assert!(config.cleaning.patterns_file.is_none());
        assert_eq!(config.storage.works_dir, PathBuf::from("data/works"));
    }

    #[test]
    fn test_retry_policy_from_config() {
        let policy = LlmConfig::default().retry_policy();
        assert_eq!(policy.max_retries, 6);
        assert_eq!(policy.base_delay, Duration::from_secs(2));
        assert_eq!(policy.max_delay, Duration::from_secs(60));
    }

    #[test]
    fn test_evaluation_options() {
        let mut config = AppConfig::default();
        config.llm.batch_pause_secs = 0;
        config.chunking.token_ceiling = 1000;

        let options = config.evaluation_options();
        assert_eq!(options.token_ceiling, 1000);
        assert_eq!(options.batch_pause, Duration::ZERO);
    }
}
