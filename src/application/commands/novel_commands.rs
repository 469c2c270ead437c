//! Novel Commands

use serde::Deserialize;

use crate::domain::novel::RawEpisode;

/// 作品概要输入
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverviewInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// 整理抓取结果并保存为作品文档
///
/// 正文已由外部抓取器提取，这里负责清洗、切片、指标计算
#[derive(Debug, Clone, Deserialize)]
pub struct PrepareNovel {
    pub work_id: String,
    /// 站点名，决定使用哪套样板文本规则
    #[serde(default)]
    pub site_name: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub work_url: String,
    #[serde(default)]
    pub overview: OverviewInput,
    pub episodes: Vec<RawEpisode>,
    /// 作品公开的总话数，缺省时取 episodes 的数量
    #[serde(default)]
    pub total_episodes: Option<usize>,
    /// 只保留前 N 话
    #[serde(default)]
    pub episode_limit: Option<usize>,
}
