//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::application::ProviderId;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "NOVEL_JUDGE";

const TOKENIZERS: &[&str] = &["tiktoken", "whitespace"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `NOVEL_JUDGE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `NOVEL_JUDGE_SERVER__PORT=9000`
/// - `NOVEL_JUDGE_LLM__BATCH_PAUSE_SECS=5`
/// - `NOVEL_JUDGE_LLM__ENDPOINTS__QWEN=http://localhost:8000/v1/chat/completions`
/// - `NOVEL_JUDGE_STORAGE__WORKS_DIR=/data/works`
///
/// API Key 不经过这里，见 `EnvProviderRegistry`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("llm.timeout_secs", 120)?
        .set_default("llm.max_retries", 6)?
        .set_default("llm.base_delay_ms", 2000)?
        .set_default("llm.max_delay_secs", 60)?
        .set_default("llm.batch_pause_secs", 3)?
        .set_default("chunking.token_ceiling", 40_000)?
        .set_default("chunking.tokenizer", "tiktoken")?
        .set_default("storage.works_dir", "data/works")?
        .set_default("storage.evals_dir", "data/evals")?
        .set_default("storage.settings_file", "data/settings.json")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let invalid = |msg: String| Err(ConfigError::ValidationError(msg));

    if config.server.port == 0 {
        return invalid("Server port cannot be 0".to_string());
    }

    if config.llm.max_retries == 0 {
        return invalid("llm.max_retries must be at least 1".to_string());
    }

    if config.llm.timeout_secs == 0 {
        return invalid("llm.timeout_secs cannot be 0".to_string());
    }

    if config.chunking.token_ceiling == 0 {
        return invalid("chunking.token_ceiling cannot be 0".to_string());
    }

    if !TOKENIZERS.contains(&config.chunking.tokenizer.as_str()) {
        return invalid(format!(
            "Unknown tokenizer {:?}, expected one of {:?}",
            config.chunking.tokenizer, TOKENIZERS
        ));
    }

    for name in config.llm.endpoints.keys() {
        if name.parse::<ProviderId>().is_err() {
            return invalid(format!("Unknown provider in llm.endpoints: {}", name));
        }
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("LLM Timeout: {}s", config.llm.timeout_secs);
    tracing::info!(
        "LLM Retry: {} attempts, base {}ms, cap {}s",
        config.llm.max_retries,
        config.llm.base_delay_ms,
        config.llm.max_delay_secs
    );
    tracing::info!("Batch Pause: {}s", config.llm.batch_pause_secs);
    for (provider, endpoint) in &config.llm.endpoints {
        tracing::info!("Endpoint Override: {} -> {}", provider, endpoint);
    }
    tracing::info!(
        "Chunking: {} tokens ({})",
        config.chunking.token_ceiling,
        config.chunking.tokenizer
    );
    match &config.cleaning.patterns_file {
        Some(path) => tracing::info!("Boilerplate Patterns: {:?}", path),
        None => tracing::info!("Boilerplate Patterns: site presets"),
    }
    tracing::info!("Works Directory: {:?}", config.storage.works_dir);
    tracing::info!("Evals Directory: {:?}", config.storage.evals_dir);
    tracing::info!("Settings File: {:?}", config.storage.settings_file);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
