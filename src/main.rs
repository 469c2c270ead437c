//! Novel Judge - 网络小说评估服务
//!
//! 启动顺序: .env → 配置 → 日志 → 存储 → LLM 注册表 → 分词器 → HTTP 服务

use std::sync::Arc;

use novel_judge::config::{load_config, print_config, AppConfig};
use novel_judge::domain::cleaning::PatternSet;
use novel_judge::infrastructure::adapters::{
    build_token_counter, EnvProviderRegistry, ReqwestTransport, TokioSleeper,
};
use novel_judge::infrastructure::http::{AppPorts, AppState, HttpServer, ServerConfig};
use novel_judge::infrastructure::persistence::JsonFileStore;

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},novel_judge={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // API Key 等凭据从 .env 读入进程环境
    let dotenv = dotenvy::dotenv();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Novel Judge - 网络小说评估服务");
    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("No .env file"),
        Err(e) => tracing::warn!(error = %e, "Failed to read .env"),
    }
    print_config(&config);

    // 存储
    let store = Arc::new(
        JsonFileStore::new(
            &config.storage.works_dir,
            &config.storage.evals_dir,
            &config.storage.settings_file,
        )
        .await?,
    );

    // LLM
    let sleeper = Arc::new(TokioSleeper);
    let transport = Arc::new(ReqwestTransport::new(config.llm.timeout())?);
    let registry = Arc::new(EnvProviderRegistry::new(
        transport,
        sleeper.clone(),
        config.llm.retry_policy(),
        config.llm.endpoints.clone(),
    ));

    // 分词器
    let token_counter = build_token_counter(&config.chunking.tokenizer)?;

    // 样板规则
    let patterns = match &config.cleaning.patterns_file {
        Some(path) => Some(PatternSet::from_toml_file(path)?),
        None => None,
    };

    let ports = AppPorts {
        novel_repo: store.clone(),
        settings_repo: store.clone(),
        eval_store: store,
        resolver: registry,
        token_counter,
        sleeper,
    };
    let state = AppState::new(ports, config.evaluation_options(), patterns);

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
