//! 用例测试用的内存实现

use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::application::ports::{
    ChatMessage, EvaluationStorePort, LlmError, LlmProviderPort, NovelRepositoryPort,
    NovelSummary, ProviderId, ProviderResolverPort, RepositoryError, SettingsRepositoryPort,
    SleeperPort, StoredEvaluation, TokenCounter,
};
use crate::domain::evaluation::{EvaluationResult, StageSettings};
use crate::domain::novel::NovelDocument;

#[derive(Default)]
pub struct InMemoryNovelRepository {
    pub novels: Mutex<BTreeMap<String, NovelDocument>>,
}

#[async_trait]
impl NovelRepositoryPort for InMemoryNovelRepository {
    async fn save(&self, work_id: &str, document: &NovelDocument) -> Result<(), RepositoryError> {
        self.novels
            .lock()
            .unwrap()
            .insert(work_id.to_string(), document.clone());
        Ok(())
    }

    async fn find_by_id(&self, work_id: &str) -> Result<Option<NovelDocument>, RepositoryError> {
        Ok(self.novels.lock().unwrap().get(work_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<NovelSummary>, RepositoryError> {
        Ok(self
            .novels
            .lock()
            .unwrap()
            .iter()
            .map(|(id, doc)| NovelSummary::from_document(id, doc))
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryEvaluationStore {
    pub results: Mutex<BTreeMap<(String, String), EvaluationResult>>,
}

#[async_trait]
impl EvaluationStorePort for InMemoryEvaluationStore {
    async fn save(
        &self,
        work_id: &str,
        provider: ProviderId,
        result: &EvaluationResult,
    ) -> Result<(), RepositoryError> {
        self.results.lock().unwrap().insert(
            (work_id.to_string(), provider.as_str().to_string()),
            result.clone(),
        );
        Ok(())
    }

    async fn find_by_work(&self, work_id: &str) -> Result<Vec<StoredEvaluation>, RepositoryError> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|e| e.work_id == work_id)
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<StoredEvaluation>, RepositoryError> {
        Ok(self
            .results
            .lock()
            .unwrap()
            .iter()
            .map(|((work_id, provider), result)| StoredEvaluation {
                work_id: work_id.clone(),
                provider: provider.clone(),
                result: result.clone(),
            })
            .collect())
    }
}

#[derive(Default)]
pub struct InMemorySettings {
    pub settings: Mutex<Vec<StageSettings>>,
}

#[async_trait]
impl SettingsRepositoryPort for InMemorySettings {
    async fn load(&self) -> Result<Vec<StageSettings>, RepositoryError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save(&self, settings: &[StageSettings]) -> Result<(), RepositoryError> {
        *self.settings.lock().unwrap() = settings.to_vec();
        Ok(())
    }
}

/// 按脚本依次返回结果并记录收到的消息
pub struct ScriptedProvider {
    pub id: ProviderId,
    pub replies: Mutex<VecDeque<Result<String, LlmError>>>,
    pub received: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedProvider {
    pub fn new(id: ProviderId, replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            id,
            replies: Mutex::new(replies.into()),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|messages| messages[0].content.clone())
            .collect()
    }
}

#[async_trait]
impl LlmProviderPort for ScriptedProvider {
    fn provider_id(&self) -> ProviderId {
        self.id
    }

    async fn call(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.received.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InvalidResponse("script exhausted".to_string())))
    }
}

/// 固定返回同一个 provider；None 时模拟缺少凭据
pub struct FixedResolver {
    pub provider: Option<Arc<ScriptedProvider>>,
}

impl ProviderResolverPort for FixedResolver {
    fn resolve(&self, provider: ProviderId) -> Result<Arc<dyn LlmProviderPort>, LlmError> {
        match &self.provider {
            Some(p) => Ok(p.clone()),
            None => Err(LlmError::Configuration(format!(
                "{} is not set",
                provider.api_key_var()
            ))),
        }
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    pub slept: Mutex<Vec<Duration>>,
}

#[async_trait]
impl SleeperPort for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

/// 按空白分词
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn count_tokens(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}
