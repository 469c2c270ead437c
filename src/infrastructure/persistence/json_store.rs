//! JSON File Store - 文件系统 JSON 存储
//!
//! 实现 NovelRepositoryPort / EvaluationStorePort / SettingsRepositoryPort
//!
//! 目录结构:
//! - `<works_dir>/<work_id>.json`
//! - `<evals_dir>/<work_id>-<provider>.json`
//! - `<settings_file>`
//!
//! 输出为缩进的 UTF-8 JSON，非 ASCII 字符不转义

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{
    EvaluationStorePort, NovelRepositoryPort, NovelSummary, ProviderId, RepositoryError,
    SettingsRepositoryPort, StoredEvaluation,
};
use crate::domain::evaluation::{EvaluationResult, StageSettings};
use crate::domain::novel::NovelDocument;

/// JSON 文件存储
pub struct JsonFileStore {
    works_dir: PathBuf,
    evals_dir: PathBuf,
    settings_file: PathBuf,
}

impl JsonFileStore {
    /// 创建存储并确保目录存在
    pub async fn new(
        works_dir: impl AsRef<Path>,
        evals_dir: impl AsRef<Path>,
        settings_file: impl AsRef<Path>,
    ) -> Result<Self, RepositoryError> {
        let works_dir = works_dir.as_ref().to_path_buf();
        let evals_dir = evals_dir.as_ref().to_path_buf();
        let settings_file = settings_file.as_ref().to_path_buf();

        fs::create_dir_all(&works_dir).await.map_err(io_error)?;
        fs::create_dir_all(&evals_dir).await.map_err(io_error)?;
        if let Some(parent) = settings_file.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        Ok(Self {
            works_dir,
            evals_dir,
            settings_file,
        })
    }

    fn work_path(&self, work_id: &str) -> Result<PathBuf, RepositoryError> {
        check_key(work_id)?;
        Ok(self.works_dir.join(format!("{}.json", work_id)))
    }

    fn eval_path(&self, work_id: &str, provider: ProviderId) -> Result<PathBuf, RepositoryError> {
        check_key(work_id)?;
        Ok(self
            .evals_dir
            .join(format!("{}-{}.json", work_id, provider.as_str())))
    }

    /// 读取目录下全部 .json 文件（按文件名排序）
    async fn json_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, RepositoryError> {
        let mut files = Vec::new();
        let mut entries = fs::read_dir(dir).await.map_err(io_error)?;

        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    files.push((stem.to_string(), path.clone()));
                }
            }
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }
}

/// key 会成为文件名的一部分
fn check_key(key: &str) -> Result<(), RepositoryError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidKey(key.to_string()))
    }
}

fn io_error(e: std::io::Error) -> RepositoryError {
    RepositoryError::IoError(e.to_string())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RepositoryError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(e)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| RepositoryError::SerializationError(format!("{}: {}", path.display(), e)))
}

/// 先写临时文件再重命名，避免读到写了一半的文件
async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), RepositoryError> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content).await.map_err(io_error)?;
    fs::rename(&tmp_path, path).await.map_err(io_error)?;

    tracing::debug!(path = %path.display(), "JSON file written");
    Ok(())
}

/// `<work_id>-<provider>` → (work_id, provider)
fn split_eval_stem(stem: &str) -> Option<(&str, ProviderId)> {
    let (work_id, provider) = stem.rsplit_once('-')?;
    let provider = provider.parse().ok()?;
    (!work_id.is_empty()).then_some((work_id, provider))
}

#[async_trait]
impl NovelRepositoryPort for JsonFileStore {
    async fn save(&self, work_id: &str, document: &NovelDocument) -> Result<(), RepositoryError> {
        let path = self.work_path(work_id)?;
        write_json(&path, document).await
    }

    async fn find_by_id(&self, work_id: &str) -> Result<Option<NovelDocument>, RepositoryError> {
        let path = self.work_path(work_id)?;
        read_json(&path).await
    }

    async fn find_all(&self) -> Result<Vec<NovelSummary>, RepositoryError> {
        let mut summaries = Vec::new();

        for (work_id, path) in Self::json_files(&self.works_dir).await? {
            match read_json::<NovelDocument>(&path).await {
                Ok(Some(document)) => {
                    summaries.push(NovelSummary::from_document(&work_id, &document))
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable work file");
                }
            }
        }

        Ok(summaries)
    }
}

#[async_trait]
impl EvaluationStorePort for JsonFileStore {
    async fn save(
        &self,
        work_id: &str,
        provider: ProviderId,
        result: &EvaluationResult,
    ) -> Result<(), RepositoryError> {
        let path = self.eval_path(work_id, provider)?;
        write_json(&path, result).await?;

        tracing::info!(
            work_id = %work_id,
            provider = %provider,
            path = %path.display(),
            "Evaluation result saved"
        );
        Ok(())
    }

    async fn find_by_work(&self, work_id: &str) -> Result<Vec<StoredEvaluation>, RepositoryError> {
        check_key(work_id)?;
        Ok(EvaluationStorePort::find_all(self)
            .await?
            .into_iter()
            .filter(|e| e.work_id == work_id)
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<StoredEvaluation>, RepositoryError> {
        let mut results = Vec::new();

        for (stem, path) in Self::json_files(&self.evals_dir).await? {
            let Some((work_id, provider)) = split_eval_stem(&stem) else {
                continue;
            };
            match read_json::<EvaluationResult>(&path).await {
                Ok(Some(result)) => results.push(StoredEvaluation {
                    work_id: work_id.to_string(),
                    provider: provider.as_str().to_string(),
                    result,
                }),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable evaluation file");
                }
            }
        }

        Ok(results)
    }
}

#[async_trait]
impl SettingsRepositoryPort for JsonFileStore {
    async fn load(&self) -> Result<Vec<StageSettings>, RepositoryError> {
        Ok(read_json(&self.settings_file).await?.unwrap_or_default())
    }

    async fn save(&self, settings: &[StageSettings]) -> Result<(), RepositoryError> {
        write_json(&self.settings_file, settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::{CleanedEpisode, NovelMeta, RawEpisode};
    use serde_json::json;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    async fn store(root: &Path) -> JsonFileStore {
        JsonFileStore::new(
            root.join("works"),
            root.join("evals"),
            root.join("settings/settings.json"),
        )
        .await
        .unwrap()
    }

    fn document() -> NovelDocument {
        let text = "「おはよう」と彼女は笑った。".to_string();
        let raw = RawEpisode::new(1, "第一話", "https://example.com/1", text.clone());
        let episode = CleanedEpisode::from_raw(raw, text, BTreeSet::new());
        let meta = NovelMeta {
            title: "朝の物語".to_string(),
            author: "作者".to_string(),
            site_name: "kakuyomu".to_string(),
            ..Default::default()
        };
        NovelDocument::assemble(meta, vec![episode], 1).unwrap()
    }

    fn result(score: i64) -> EvaluationResult {
        match json!({"overall_score": score, "comment": "良い"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_save_and_find_novel() {
        let temp_dir = tempdir().unwrap();
        let store = store(temp_dir.path()).await;
        let doc = document();

        NovelRepositoryPort::save(&store, "w-1", &doc).await.unwrap();

        let loaded = NovelRepositoryPort::find_by_id(&store, "w-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.title(), doc.title());
        assert_eq!(
            loaded.episodes()[0].cleaned_text(),
            doc.episodes()[0].cleaned_text()
        );
        assert_eq!(loaded.metrics(), doc.metrics());

        // 非 ASCII 字符不转义
        let raw = std::fs::read_to_string(temp_dir.path().join("works/w-1.json")).unwrap();
        assert!(raw.contains("朝の物語"));
        assert!(raw.contains("\n  \"title\""));

        let all = NovelRepositoryPort::find_all(&store).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].work_id, "w-1");
        assert_eq!(all[0].site_name, "kakuyomu");
    }

    #[tokio::test]
    async fn test_missing_novel_is_none() {
        let temp_dir = tempdir().unwrap();
        let store = store(temp_dir.path()).await;

        assert!(NovelRepositoryPort::find_by_id(&store, "nothing")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let temp_dir = tempdir().unwrap();
        let store = store(temp_dir.path()).await;

        let err = NovelRepositoryPort::find_by_id(&store, "../secret")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_evaluations_are_keyed_by_work_and_provider() {
        let temp_dir = tempdir().unwrap();
        let store = store(temp_dir.path()).await;

        EvaluationStorePort::save(&store, "w-1", ProviderId::ChatGpt, &result(70))
            .await
            .unwrap();
        EvaluationStorePort::save(&store, "w-1", ProviderId::Claude, &result(80))
            .await
            .unwrap();
        EvaluationStorePort::save(&store, "w-2", ProviderId::ChatGpt, &result(60))
            .await
            .unwrap();
        // 重复评估覆盖旧结果
        EvaluationStorePort::save(&store, "w-1", ProviderId::ChatGpt, &result(75))
            .await
            .unwrap();

        assert!(temp_dir.path().join("evals/w-1-chatgpt.json").exists());

        let w1 = store.find_by_work("w-1").await.unwrap();
        assert_eq!(w1.len(), 2);
        let chatgpt = w1.iter().find(|e| e.provider == "chatgpt").unwrap();
        assert_eq!(chatgpt.result["overall_score"], 75);

        let all = EvaluationStorePort::find_all(&store).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_settings_default_to_empty() {
        let temp_dir = tempdir().unwrap();
        let store = store(temp_dir.path()).await;

        assert!(store.load().await.unwrap().is_empty());

        let settings: Vec<StageSettings> = serde_json::from_value(json!([
            {"stage": "first", "label": "第一段階", "criteria": [
                {"id": 1, "name": "構成", "prompt": "構成を評価", "minScore": 1, "maxScore": 10}
            ]}
        ]))
        .unwrap();
        SettingsRepositoryPort::save(&store, &settings).await.unwrap();

        assert_eq!(store.load().await.unwrap(), settings);
    }

    #[test]
    fn test_split_eval_stem() {
        assert_eq!(
            split_eval_stem("16816927-860-claude"),
            Some(("16816927-860", ProviderId::Claude))
        );
        assert_eq!(split_eval_stem("w1-unknown"), None);
        assert_eq!(split_eval_stem("-qwen"), None);
    }
}
