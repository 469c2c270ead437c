//! Novel Context - Value Objects

use serde::{Deserialize, Serialize};

/// 作品概要
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub title: String,
    pub description: String,
    /// description 的字符数
    pub length: usize,
}

impl Overview {
    pub fn new(title: &str, description: &str) -> Self {
        let title = title.trim().to_string();
        let description = description.trim().to_string();
        let length = description.chars().count();
        Self {
            title,
            description,
            length,
        }
    }
}

/// 切片位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceKind {
    /// 开篇钩子
    Hook,
    /// 中段转折
    TurningPoint,
    /// 结尾回收
    Payoff,
}

impl SliceKind {
    pub const ALL: [SliceKind; 3] = [SliceKind::Hook, SliceKind::TurningPoint, SliceKind::Payoff];

    pub fn as_str(&self) -> &'static str {
        match self {
            SliceKind::Hook => "hook",
            SliceKind::TurningPoint => "turning_point",
            SliceKind::Payoff => "payoff",
        }
    }
}

/// 代表性切片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// 来源话的编号（不是下标）
    pub ep: u32,
    pub kind: SliceKind,
    pub text: String,
}

/// 分析范围 - 每次运行从完整话列表重新计算
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisScope {
    pub episodes_included: Vec<u32>,
    pub slices: Vec<Slice>,
}

/// 清洗摘要
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub removed_boilerplates: bool,
    pub notes: Vec<String>,
}

/// 轻量文本指标
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_chars: usize,
    pub avg_chars_per_episode: f64,
    pub dialogue_ratio: f64,
    pub unique_trigram_ratio: f64,
    pub mean_sentence_len: f64,
}

/// 来源站点
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
}
