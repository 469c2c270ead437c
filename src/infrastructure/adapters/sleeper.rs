//! 基于 tokio 的等待实现

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::SleeperPort;

pub struct TokioSleeper;

#[async_trait]
impl SleeperPort for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
