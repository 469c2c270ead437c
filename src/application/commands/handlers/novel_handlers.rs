//! Novel Command Handlers

use std::sync::Arc;

use crate::application::commands::PrepareNovel;
use crate::application::error::ApplicationError;
use crate::application::ports::{NovelRepositoryPort, NovelSummary};
use crate::domain::cleaning::{BoilerplateCleaner, PatternSet};
use crate::domain::novel::{
    CleanedEpisode, CleaningSummary, NovelDocument, NovelError, NovelMeta, Overview,
};

// ============================================================================
// PrepareNovel
// ============================================================================

/// 整理结果
#[derive(Debug, Clone)]
pub struct PrepareNovelResponse {
    pub summary: NovelSummary,
    pub cleaning: CleaningSummary,
}

/// PrepareNovel Handler - 清洗、分析并保存作品
pub struct PrepareNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    /// 配置中指定的样板规则，覆盖站点预设
    patterns: Option<PatternSet>,
}

impl PrepareNovelHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, patterns: Option<PatternSet>) -> Self {
        Self {
            novel_repo,
            patterns,
        }
    }

    pub async fn handle(
        &self,
        command: PrepareNovel,
    ) -> Result<PrepareNovelResponse, ApplicationError> {
        let work_id = command.work_id.trim().to_string();
        validate_work_id(&work_id)?;

        let mut episodes = command.episodes;
        episodes.sort_by_key(|e| e.number);

        if let Some(limit) = command.episode_limit {
            if limit > episodes.len() {
                return Err(NovelError::InsufficientInput {
                    requested: limit,
                    available: episodes.len(),
                }
                .into());
            }
            episodes.truncate(limit);
        }

        let cleaner = match &self.patterns {
            Some(patterns) => BoilerplateCleaner::new(patterns.clone()),
            None => BoilerplateCleaner::for_site(&command.site_name),
        };

        let total_episodes = command.total_episodes.unwrap_or(episodes.len());
        let cleaned: Vec<CleanedEpisode> = episodes
            .into_iter()
            .map(|raw| cleaner.clean_episode(raw))
            .collect();

        let overview_title = if command.overview.title.trim().is_empty() {
            command.title.as_str()
        } else {
            command.overview.title.as_str()
        };
        let meta = NovelMeta {
            overview: Overview::new(overview_title, &command.overview.description),
            title: command.title.trim().to_string(),
            author: command.author.trim().to_string(),
            work_url: command.work_url,
            site_name: command.site_name,
        };

        let document = NovelDocument::assemble(meta, cleaned, total_episodes)?;
        self.novel_repo.save(&work_id, &document).await?;

        tracing::info!(
            work_id = %work_id,
            title = %document.title(),
            episodes = document.scraped_episodes(),
            removed_boilerplates = document.cleaning_summary().removed_boilerplates,
            "Novel prepared"
        );

        Ok(PrepareNovelResponse {
            summary: NovelSummary::from_document(&work_id, &document),
            cleaning: document.cleaning_summary().clone(),
        })
    }
}

/// 作品 ID 会成为文件名，只允许安全字符
pub(crate) fn validate_work_id(work_id: &str) -> Result<(), ApplicationError> {
    let valid = !work_id.is_empty()
        && work_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ApplicationError::validation(format!(
            "invalid work id: {:?}",
            work_id
        )))
    }
}
