//! 429 重试引擎
//!
//! 状态机: Attempting → Success | RateLimited | Failed
//! - 200：交给 backend 解析
//! - 429：等待后重试，等待时间优先取正数的 Retry-After，否则指数退避，上限 60 秒
//! - 其他状态码与网络错误：立即失败，不重试

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::backend::ProviderBackend;
use super::transport::HttpTransport;
use crate::application::ports::{ChatMessage, LlmError, LlmProviderPort, ProviderId, SleeperPort};

/// 错误信息中保留的响应体长度
const ERROR_BODY_LIMIT: usize = 500;

/// 重试策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最多尝试次数（含第一次）
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 6,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// 第 attempt 次（从 0 开始）收到 429 后的等待时间
    pub fn backoff(&self, attempt: u32, retry_after: Option<&str>) -> Duration {
        let hinted = retry_after
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(|secs| Duration::from_secs_f64(secs.min(self.max_delay.as_secs_f64())));

        let delay = hinted.unwrap_or_else(|| {
            let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
            self.base_delay.saturating_mul(factor)
        });

        delay.min(self.max_delay)
    }
}

/// 带重试的 provider
pub struct RetryingProvider {
    backend: Box<dyn ProviderBackend>,
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn SleeperPort>,
    policy: RetryPolicy,
}

impl RetryingProvider {
    pub fn new(
        backend: Box<dyn ProviderBackend>,
        transport: Arc<dyn HttpTransport>,
        sleeper: Arc<dyn SleeperPort>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            backend,
            transport,
            sleeper,
            policy,
        }
    }
}

#[async_trait]
impl LlmProviderPort for RetryingProvider {
    fn provider_id(&self) -> ProviderId {
        self.backend.provider_id()
    }

    async fn call(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let provider = self.backend.provider_id();
        let request = self.backend.build_request(messages);
        let max_retries = self.policy.max_retries;

        for attempt in 0..max_retries {
            tracing::debug!(
                provider = %provider,
                attempt = attempt + 1,
                max_retries,
                "Calling LLM"
            );

            let response = self.transport.post_json(&request).await?;

            match response.status {
                200 => return self.backend.parse_response(&response.body),
                429 => {
                    if attempt + 1 >= max_retries {
                        break;
                    }
                    let delay = self.policy.backoff(attempt, response.retry_after.as_deref());
                    tracing::warn!(
                        provider = %provider,
                        attempt = attempt + 1,
                        max_retries,
                        delay_secs = delay.as_secs_f64(),
                        "Rate limited (429), retrying"
                    );
                    self.sleeper.sleep(delay).await;
                }
                status => {
                    tracing::error!(provider = %provider, status, "LLM upstream error");
                    return Err(LlmError::Upstream {
                        status,
                        body: response.body.chars().take(ERROR_BODY_LIMIT).collect(),
                    });
                }
            }
        }

        tracing::error!(provider = %provider, max_retries, "Rate limit retries exhausted");
        Err(LlmError::RateLimitExhausted {
            attempts: max_retries,
        })
    }
}
