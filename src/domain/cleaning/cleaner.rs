//! 样板文本清洗器
//!
//! 两级删除策略，每级结果都要通过充分性检查：
//! 1. 严格级：强命中、首尾 3 行内的任意命中、或 2 个以上类别命中的行被删除
//! 2. 宽松级：只删除强命中的行
//! 3. 都不充分时原样返回（仅压缩空行）

use std::collections::BTreeSet;

use super::patterns::PatternSet;
use crate::domain::novel::{CleanedEpisode, RawEpisode};
use crate::domain::text_normalizer::{
    char_len, collapse_blank_lines, normalize_newlines, split_lines,
};

/// 原文达到该长度时，清洗结果也不能低于该长度
pub const MIN_CHARS: usize = 600;

/// 清洗结果至少保留原文的比例
pub const MIN_RATIO: f64 = 0.6;

/// 首尾多少行视为边缘行
const EDGE_LINES: usize = 3;

/// 清洗结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanResult {
    pub text: String,
    pub removed_categories: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CleaningTier {
    Strict,
    Loose,
}

/// 样板文本清洗器
#[derive(Debug, Clone)]
pub struct BoilerplateCleaner {
    patterns: PatternSet,
}

impl BoilerplateCleaner {
    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    /// 按站点名使用内置预设
    pub fn for_site(site_name: &str) -> Self {
        Self::new(PatternSet::for_site(site_name))
    }

    /// 清洗一段正文，返回清洗后文本和被删除的类别
    pub fn clean(&self, raw_text: &str) -> CleanResult {
        let normalized = normalize_newlines(raw_text);
        if normalized.is_empty() {
            return CleanResult {
                text: String::new(),
                removed_categories: BTreeSet::new(),
            };
        }

        let original_len = char_len(&normalized);

        for tier in [CleaningTier::Strict, CleaningTier::Loose] {
            let result = self.perform(&normalized, tier);
            if is_sufficient(original_len, &result.text) {
                return result;
            }
            tracing::debug!(
                tier = ?tier,
                original_len,
                cleaned_len = char_len(&result.text),
                "Cleaning tier rejected by sufficiency check"
            );
        }

        CleanResult {
            text: collapse_blank_lines(&normalized),
            removed_categories: BTreeSet::new(),
        }
    }

    /// 清洗一话
    pub fn clean_episode(&self, raw: RawEpisode) -> CleanedEpisode {
        let result = self.clean(&raw.text);
        CleanedEpisode::from_raw(raw, result.text, result.removed_categories)
    }

    fn perform(&self, normalized: &str, tier: CleaningTier) -> CleanResult {
        let lines = split_lines(normalized);
        let total = lines.len();

        let mut removed = BTreeSet::new();
        let mut kept: Vec<&str> = Vec::with_capacity(total);

        for (idx, line) in lines.into_iter().enumerate() {
            let hits = self.patterns.hits(line);
            let strong = hits.iter().any(|category| category.is_strong());

            let should_remove = match tier {
                CleaningTier::Strict => {
                    let is_edge = idx < EDGE_LINES || total - idx <= EDGE_LINES;
                    strong || (is_edge && !hits.is_empty()) || hits.len() >= 2
                }
                CleaningTier::Loose => strong,
            };

            if should_remove {
                if hits.is_empty() {
                    removed.insert("misc".to_string());
                }
                removed.extend(hits.iter().map(|category| category.name().to_string()));
                continue;
            }
            kept.push(line);
        }

        let joined = kept.join("\n\n");
        CleanResult {
            text: collapse_blank_lines(joined.trim()),
            removed_categories: removed,
        }
    }
}

impl Default for BoilerplateCleaner {
    fn default() -> Self {
        Self::new(PatternSet::kakuyomu())
    }
}

/// 充分性检查：防止把简短但正常的一话删光
fn is_sufficient(original_len: usize, cleaned: &str) -> bool {
    let cleaned_len = char_len(cleaned);
    if cleaned_len == 0 {
        return false;
    }
    if original_len >= MIN_CHARS && cleaned_len < MIN_CHARS {
        return false;
    }
    if cleaned_len < (original_len as f64 * MIN_RATIO) as usize {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prose(paragraphs: usize) -> Vec<String> {
        (0..paragraphs)
            .map(|i| format!("第{}段落。彼は静かに扉を開けて、長い廊下の先を見つめていた。", i))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let cleaner = BoilerplateCleaner::default();
        let result = cleaner.clean("  \r\n ");
        assert_eq!(result.text, "");
        assert!(result.removed_categories.is_empty());
    }

    #[test]
    fn test_clean_text_is_unchanged() {
        let cleaner = BoilerplateCleaner::for_site("syosetu");
        let text = prose(5).join("\n\n");

        let result = cleaner.clean(&text);

        assert_eq!(result.text, text);
        assert!(result.removed_categories.is_empty());
    }

    #[test]
    fn test_crlf_is_normalized() {
        let cleaner = BoilerplateCleaner::default();
        let text = prose(3).join("\r\n\r\n");

        let result = cleaner.clean(&text);

        assert_eq!(result.text, prose(3).join("\n\n"));
    }

    #[test]
    fn test_strict_removes_edge_and_multi_hits() {
        let cleaner = BoilerplateCleaner::default();
        let mut lines = prose(30);
        // 尾部 3 行内的单一命中
        lines.push("次回更新は明日です".to_string());
        // 中间行的两个类别命中
        lines.insert(10, "フォローとレビューをお願いします".to_string());
        // 中间行的单一命中会被保留
        lines.insert(20, "目標に向かって走った".to_string());
        let text = lines.join("\n");

        let result = cleaner.clean(&text);

        assert!(!result.text.contains("次回更新"));
        assert!(!result.text.contains("フォロー"));
        assert!(result.text.contains("目標に向かって走った"));
        let removed: Vec<&str> = result.removed_categories.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            removed,
            vec!["sns_promo", "stars_request", "thanks_request", "update_notice"]
        );
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let cleaner = BoilerplateCleaner::default();
        let mut lines = prose(30);
        lines.push("次回更新は明日です".to_string());
        lines.insert(10, "フォローとレビューをお願いします".to_string());
        lines.insert(20, "目標に向かって走った".to_string());

        let once = cleaner.clean(&lines.join("\n"));
        let twice = cleaner.clean(&once.text);

        assert!(!once.removed_categories.is_empty());
        assert_eq!(twice.text, once.text);
        assert!(twice.removed_categories.is_empty());
    }

    #[test]
    fn test_footer_banner_removed_anywhere() {
        let cleaner = BoilerplateCleaner::default();
        let mut lines = prose(30);
        lines.insert(15, "☆☆☆☆☆☆☆☆☆☆☆☆".to_string());
        let text = lines.join("\n\n");

        let result = cleaner.clean(&text);

        assert_eq!(result.text, prose(30).join("\n\n"));
        assert!(result.removed_categories.contains("footer_heading"));
    }

    #[test]
    fn test_footer_only_episode_falls_through_to_original() {
        let cleaner = BoilerplateCleaner::default();
        let mut text = "★★★★★★★★★\n".repeat(59);
        text.push_str("★★★★★★★★★★");
        assert_eq!(char_len(&text), 600);

        let result = cleaner.clean(&text);

        assert_eq!(result.text, text);
        assert!(result.removed_categories.is_empty());
    }

    #[test]
    fn test_loose_tier_used_when_strict_removes_too_much() {
        let cleaner = BoilerplateCleaner::for_site("syosetu");
        // 短文：每行都在边缘且命中一个类别，严格级会全部删除
        let text = "応援して走った\n宣伝の看板を見た\n予告どおり雨が降った\n★★★★ここまで★★★★";

        let result = cleaner.clean(text);

        assert_eq!(
            result.text,
            "応援して走った\n\n宣伝の看板を見た\n\n予告どおり雨が降った"
        );
        let removed: Vec<&str> = result.removed_categories.iter().map(|s| s.as_str()).collect();
        assert_eq!(removed, vec!["footer_heading", "stars_request"]);
    }

    #[test]
    fn test_sufficiency_rules() {
        assert!(!is_sufficient(100, ""));
        assert!(!is_sufficient(1000, &"あ".repeat(599)));
        assert!(is_sufficient(1000, &"あ".repeat(600)));
        assert!(!is_sufficient(500, &"あ".repeat(299)));
        assert!(is_sufficient(500, &"あ".repeat(300)));
    }

    #[test]
    fn test_clean_episode_keeps_identity() {
        let cleaner = BoilerplateCleaner::default();
        let raw = RawEpisode::new(7, "第七話", "https://example.com/7", prose(2).join("\n\n"));

        let episode = cleaner.clean_episode(raw);

        assert_eq!(episode.number(), 7);
        assert_eq!(episode.title(), "第七話");
        assert_eq!(episode.length(), char_len(episode.cleaned_text()));
    }
}
