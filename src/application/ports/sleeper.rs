//! Sleeper Port - 可替换的等待
//!
//! 重试退避和批次间隔都通过该端口等待，测试中可记录而不真正休眠

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait SleeperPort: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
