//! Novel Context - Aggregate Root

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    AnalysisScope, CleanedEpisode, CleaningSummary, Metrics, NovelError, Overview, SiteInfo,
};
use crate::domain::analysis::{compute_metrics, select_scope};

/// 作品元数据（来自外部抓取器）
#[derive(Debug, Clone, Default)]
pub struct NovelMeta {
    pub title: String,
    pub author: String,
    pub work_url: String,
    pub overview: Overview,
    pub site_name: String,
}

/// NovelDocument 聚合根
///
/// 不变量:
/// - episodes 按 number 升序且稳定，组装后不再增删
/// - assemble / limited_to 得到的文档，analysis_scope / metrics / cleaning 由 episodes 推导
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovelDocument {
    title: String,
    author: String,
    work_url: String,
    overview: Overview,
    total_episodes: usize,
    scraped_episodes: usize,
    episodes: Vec<CleanedEpisode>,
    #[serde(default)]
    analysis_scope: AnalysisScope,
    #[serde(rename = "cleaning", default)]
    cleaning_summary: CleaningSummary,
    #[serde(default)]
    metrics: Metrics,
    #[serde(rename = "site", default)]
    site: SiteInfo,
}

impl NovelDocument {
    /// 组装作品文档，同时计算切片、指标和清洗摘要
    pub fn assemble(
        meta: NovelMeta,
        episodes: Vec<CleanedEpisode>,
        total_episodes: usize,
    ) -> Result<Self, NovelError> {
        if episodes.is_empty() {
            return Err(NovelError::NoEpisodes(meta.work_url));
        }

        let analysis_scope = select_scope(&episodes);
        let metrics = compute_metrics(&episodes);
        let cleaning_summary = summarize_cleaning(&episodes);

        Ok(Self {
            title: meta.title,
            author: meta.author,
            work_url: meta.work_url,
            overview: meta.overview,
            total_episodes,
            scraped_episodes: episodes.len(),
            episodes,
            analysis_scope,
            cleaning_summary,
            metrics,
            site: SiteInfo {
                name: meta.site_name,
            },
        })
    }

    /// 复制元数据，只替换话列表（分批评估用的视图，派生字段保持整部作品的值）
    pub fn with_episodes(&self, episodes: Vec<CleanedEpisode>) -> Self {
        Self {
            episodes,
            ..self.clone_metadata()
        }
    }

    /// 截取前 limit 话，切片、指标与清洗摘要按截取后的话重新推导
    pub fn limited_to(&self, limit: usize) -> Result<Self, NovelError> {
        if limit == 0 {
            return Err(NovelError::NoEpisodes(self.work_url.clone()));
        }
        if limit > self.episodes.len() {
            return Err(NovelError::InsufficientInput {
                requested: limit,
                available: self.episodes.len(),
            });
        }

        let episodes = self.episodes[..limit].to_vec();
        Ok(Self {
            scraped_episodes: episodes.len(),
            analysis_scope: select_scope(&episodes),
            cleaning_summary: summarize_cleaning(&episodes),
            metrics: compute_metrics(&episodes),
            episodes,
            ..self.clone_metadata()
        })
    }

    fn clone_metadata(&self) -> Self {
        Self {
            title: self.title.clone(),
            author: self.author.clone(),
            work_url: self.work_url.clone(),
            overview: self.overview.clone(),
            total_episodes: self.total_episodes,
            scraped_episodes: self.scraped_episodes,
            episodes: Vec::new(),
            analysis_scope: self.analysis_scope.clone(),
            cleaning_summary: self.cleaning_summary.clone(),
            metrics: self.metrics,
            site: self.site.clone(),
        }
    }

    // Getters
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn work_url(&self) -> &str {
        &self.work_url
    }

    pub fn overview(&self) -> &Overview {
        &self.overview
    }

    pub fn episodes(&self) -> &[CleanedEpisode] {
        &self.episodes
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn scraped_episodes(&self) -> usize {
        self.scraped_episodes
    }

    pub fn analysis_scope(&self) -> &AnalysisScope {
        &self.analysis_scope
    }

    pub fn cleaning_summary(&self) -> &CleaningSummary {
        &self.cleaning_summary
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn site_name(&self) -> &str {
        &self.site.name
    }
}

/// 汇总各话的移除类别，按出现次数降序、名称升序
fn summarize_cleaning(episodes: &[CleanedEpisode]) -> CleaningSummary {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for episode in episodes {
        for category in episode.removed_categories() {
            *counts.entry(category.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    CleaningSummary {
        removed_boilerplates: !ranked.is_empty(),
        notes: ranked
            .into_iter()
            .map(|(category, count)| format!("removed: {} ({})", category, count))
            .collect(),
    }
}
