//! LLM Adapters
//!
//! - transport: HTTP 传输（reqwest）
//! - retry: 共用的 429 重试引擎
//! - openai_compat / anthropic / gemini: 各家请求与响应格式
//! - registry: 从环境变量解析凭据并组装 provider

mod anthropic;
mod backend;
mod gemini;
mod openai_compat;
mod registry;
mod retry;
mod transport;

pub use anthropic::AnthropicBackend;
pub use backend::ProviderBackend;
pub use gemini::GeminiBackend;
pub use openai_compat::OpenAiCompatBackend;
pub use registry::{default_endpoint, EnvProviderRegistry};
pub use retry::{RetryPolicy, RetryingProvider};
pub use transport::{HttpTransport, PreparedRequest, RawResponse, ReqwestTransport};
