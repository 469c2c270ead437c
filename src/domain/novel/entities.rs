//! Novel Context - Entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 原始话 - 由外部抓取器产出
///
/// 不变量:
/// - number 从 1 开始，按发现顺序编号
/// - 创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEpisode {
    pub number: u32,
    pub title: String,
    pub url: String,
    pub text: String,
}

impl RawEpisode {
    pub fn new(
        number: u32,
        title: impl Into<String>,
        url: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            url: url.into(),
            text: text.into(),
        }
    }
}

/// 清洗后的话
///
/// 序列化时 `text` 字段即清洗后的正文，原始正文在清洗后丢弃。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedEpisode {
    number: u32,
    title: String,
    url: String,
    #[serde(rename = "text")]
    cleaned_text: String,
    length: usize,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    removed_categories: BTreeSet<String>,
}

impl CleanedEpisode {
    /// 由原始话和清洗结果构造
    pub fn from_raw(
        raw: RawEpisode,
        cleaned_text: String,
        removed_categories: BTreeSet<String>,
    ) -> Self {
        let length = cleaned_text.chars().count();
        Self {
            number: raw.number,
            title: raw.title,
            url: raw.url,
            cleaned_text,
            length,
            removed_categories,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn cleaned_text(&self) -> &str {
        &self.cleaned_text
    }

    /// 清洗后正文的字符数
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn removed_categories(&self) -> &BTreeSet<String> {
        &self.removed_categories
    }
}
