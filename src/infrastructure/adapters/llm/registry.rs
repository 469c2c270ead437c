//! Provider 注册表
//!
//! 每次 resolve 都重新读取环境变量中的凭据与模型名，
//! 缺少 API Key 时在发出任何请求之前返回配置错误

use std::collections::HashMap;
use std::sync::Arc;

use super::anthropic::AnthropicBackend;
use super::backend::ProviderBackend;
use super::gemini::GeminiBackend;
use super::openai_compat::OpenAiCompatBackend;
use super::retry::{RetryPolicy, RetryingProvider};
use super::transport::HttpTransport;
use crate::application::ports::{
    LlmError, LlmProviderPort, ProviderConfig, ProviderId, ProviderResolverPort, SleeperPort,
};

const HUGGINGFACE_ROUTER: &str = "https://router.huggingface.co/v1/chat/completions";

/// 各服务的默认地址
pub fn default_endpoint(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::ChatGpt => "https://api.openai.com/v1/chat/completions",
        ProviderId::Claude => "https://api.anthropic.com/v1/messages",
        ProviderId::Gemini => "https://generativelanguage.googleapis.com/v1beta/models",
        ProviderId::Qwen | ProviderId::Phi => HUGGINGFACE_ROUTER,
        ProviderId::Deepseek => "https://api.deepseek.com/chat/completions",
    }
}

type EnvLookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// 从环境变量解析 provider 的注册表
pub struct EnvProviderRegistry {
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn SleeperPort>,
    policy: RetryPolicy,
    /// provider 名 → 覆盖地址
    endpoints: HashMap<String, String>,
    env: Arc<EnvLookup>,
}

impl EnvProviderRegistry {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        sleeper: Arc<dyn SleeperPort>,
        policy: RetryPolicy,
        endpoints: HashMap<String, String>,
    ) -> Self {
        Self {
            transport,
            sleeper,
            policy,
            endpoints,
            env: Arc::new(|name: &str| std::env::var(name).ok()),
        }
    }

    /// 替换环境变量来源
    pub fn with_env_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env = Arc::new(lookup);
        self
    }

    /// 解析单个 provider 的配置
    pub fn provider_config(&self, provider: ProviderId) -> Result<ProviderConfig, LlmError> {
        let lookup = |name: &str| (self.env)(name).filter(|v| !v.trim().is_empty());

        let api_key = lookup(provider.api_key_var()).ok_or_else(|| {
            LlmError::Configuration(format!("{} is not set", provider.api_key_var()))
        })?;
        let model_name =
            lookup(provider.model_var()).unwrap_or_else(|| provider.default_model().to_string());
        let endpoint = self
            .endpoints
            .get(provider.as_str())
            .cloned()
            .unwrap_or_else(|| default_endpoint(provider).to_string());

        Ok(ProviderConfig {
            provider_id: provider,
            api_key: api_key.trim().to_string(),
            model_name,
            endpoint,
        })
    }
}

fn build_backend(config: ProviderConfig) -> Box<dyn ProviderBackend> {
    match config.provider_id {
        ProviderId::Claude => Box::new(AnthropicBackend::new(config)),
        ProviderId::Gemini => Box::new(GeminiBackend::new(config)),
        ProviderId::ChatGpt | ProviderId::Qwen | ProviderId::Phi | ProviderId::Deepseek => {
            Box::new(OpenAiCompatBackend::new(config))
        }
    }
}

impl ProviderResolverPort for EnvProviderRegistry {
    fn resolve(&self, provider: ProviderId) -> Result<Arc<dyn LlmProviderPort>, LlmError> {
        let config = self.provider_config(provider)?;

        tracing::debug!(
            provider = %provider,
            model = %config.model_name,
            endpoint = %config.endpoint,
            "Provider resolved"
        );

        Ok(Arc::new(RetryingProvider::new(
            build_backend(config),
            self.transport.clone(),
            self.sleeper.clone(),
            self.policy,
        )))
    }
}
