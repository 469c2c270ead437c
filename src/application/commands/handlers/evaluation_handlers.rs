//! Evaluation Command Handlers
//!
//! 评估流程:
//! 1. 解析 provider，读取作品和阶段设置
//! 2. 按需截取前 N 话（在任何 LLM 调用之前检查）
//! 3. 解析凭据（缺少时立即失败）
//! 4. 全文模式按 token 上限分批；多批时逐批评审再汇总
//! 5. 从模型输出提取 JSON 并保存
//!
//! 任何失败都在本 Handler 边界转换为 `{"error": "..."}`

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::application::commands::{EvaluateNovel, EvaluationMode};
use crate::application::error::EvaluationError;
use crate::application::ports::{
    ChatMessage, EvaluationStorePort, LlmProviderPort, NovelRepositoryPort, ProviderId,
    ProviderResolverPort, SettingsRepositoryPort, SleeperPort, TokenCounter,
};
use crate::domain::chunking::{chunk, DEFAULT_TOKEN_CEILING};
use crate::domain::evaluation::{extract_json, find_stage, EvaluationResult, PromptBuilder};
use crate::domain::novel::NovelDocument;

// ============================================================================
// Options & Outcome
// ============================================================================

/// 评估参数（来自配置）
#[derive(Debug, Clone, Copy)]
pub struct EvaluationOptions {
    pub token_ceiling: usize,
    /// 相邻两次 LLM 调用之间的间隔
    pub batch_pause: Duration,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            token_ceiling: DEFAULT_TOKEN_CEILING,
            batch_pause: Duration::from_secs(3),
        }
    }
}

/// 成功的评估
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub work_id: String,
    pub provider: ProviderId,
    /// 全文模式的批次数，切片模式为 1
    pub batches: usize,
    pub result: EvaluationResult,
}

/// 评估结果或错误信息
#[derive(Debug, Clone)]
pub enum EvaluationOutcome {
    Completed(EvaluationReport),
    Failed { error: String },
}

impl EvaluationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, EvaluationOutcome::Completed(_))
    }

    /// 对外返回的 JSON：评估对象本身，或 `{"error": "..."}`
    pub fn payload(&self) -> Value {
        match self {
            EvaluationOutcome::Completed(report) => Value::Object(report.result.clone()),
            EvaluationOutcome::Failed { error } => json!({ "error": error }),
        }
    }
}

// ============================================================================
// EvaluateNovel
// ============================================================================

/// EvaluateNovel Handler
pub struct EvaluateNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    settings_repo: Arc<dyn SettingsRepositoryPort>,
    eval_store: Arc<dyn EvaluationStorePort>,
    resolver: Arc<dyn ProviderResolverPort>,
    token_counter: Arc<dyn TokenCounter>,
    sleeper: Arc<dyn SleeperPort>,
    options: EvaluationOptions,
}

impl EvaluateNovelHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        settings_repo: Arc<dyn SettingsRepositoryPort>,
        eval_store: Arc<dyn EvaluationStorePort>,
        resolver: Arc<dyn ProviderResolverPort>,
        token_counter: Arc<dyn TokenCounter>,
        sleeper: Arc<dyn SleeperPort>,
        options: EvaluationOptions,
    ) -> Self {
        Self {
            novel_repo,
            settings_repo,
            eval_store,
            resolver,
            token_counter,
            sleeper,
            options,
        }
    }

    pub async fn handle(&self, command: EvaluateNovel) -> EvaluationOutcome {
        let work_id = command.work_id.clone();
        let provider = command.provider.clone();

        match self.evaluate(command).await {
            Ok(report) => {
                tracing::info!(
                    work_id = %report.work_id,
                    provider = %report.provider,
                    batches = report.batches,
                    "Evaluation completed"
                );
                EvaluationOutcome::Completed(report)
            }
            Err(e) => {
                tracing::warn!(
                    work_id = %work_id,
                    provider = %provider,
                    error = %e,
                    "Evaluation failed"
                );
                EvaluationOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn evaluate(&self, command: EvaluateNovel) -> Result<EvaluationReport, EvaluationError> {
        let provider: ProviderId = command.provider.parse()?;

        let mut document = self
            .novel_repo
            .find_by_id(&command.work_id)
            .await?
            .ok_or_else(|| EvaluationError::NotFound(command.work_id.clone()))?;

        let settings = self.settings_repo.load().await?;
        let stage = find_stage(&settings, &command.stage)
            .ok_or_else(|| EvaluationError::StageNotFound(command.stage.clone()))?;

        if let Some(limit) = command.episode_limit {
            document = document.limited_to(limit)?;
        }

        let llm = self.resolver.resolve(provider)?;
        let prompts = PromptBuilder::new(stage);

        tracing::info!(
            work_id = %command.work_id,
            provider = %provider,
            stage = %command.stage,
            mode = ?command.mode,
            episodes = document.episodes().len(),
            "Evaluation started"
        );

        let (text, batches) = match command.mode {
            EvaluationMode::Slices => {
                let prompt = prompts.slices(&document)?;
                (llm.call(&[ChatMessage::user(prompt)]).await?, 1)
            }
            EvaluationMode::Full => self.run_full(llm.as_ref(), &prompts, &document).await?,
        };

        let result = extract_json(&text)?;
        self.eval_store
            .save(&command.work_id, provider, &result)
            .await?;

        Ok(EvaluationReport {
            work_id: command.work_id,
            provider,
            batches,
            result,
        })
    }

    /// 全文评估：单批直接评估，多批逐批评审后汇总
    async fn run_full(
        &self,
        llm: &dyn LlmProviderPort,
        prompts: &PromptBuilder,
        document: &NovelDocument,
    ) -> Result<(String, usize), EvaluationError> {
        let batches = chunk(
            document,
            self.token_counter.as_ref(),
            self.options.token_ceiling,
        );
        let total = batches.len();

        if total <= 1 {
            let prompt = prompts.full_novel(document)?;
            let text = llm.call(&[ChatMessage::user(prompt)]).await?;
            return Ok((text, 1));
        }

        let mut reviews = Vec::with_capacity(total);
        for batch in &batches {
            if batch.index > 0 {
                self.sleeper.sleep(self.options.batch_pause).await;
            }

            tracing::info!(
                provider = %llm.provider_id(),
                batch = batch.index + 1,
                total,
                token_count = batch.token_count,
                "Evaluating batch"
            );

            let prompt = prompts.sub_novel(&batch.document, batch.index + 1, total)?;
            let review = llm
                .call(&[ChatMessage::user(prompt)])
                .await
                .map_err(|source| EvaluationError::Batch {
                    index: batch.index + 1,
                    total,
                    source,
                })?;
            reviews.push(review);
        }

        self.sleeper.sleep(self.options.batch_pause).await;
        let prompt = prompts.synthesis(&reviews);
        let text = llm.call(&[ChatMessage::user(prompt)]).await?;

        Ok((text, total))
    }
}
