//! 文本统计指标
//!
//! 只统计非空正文，各话以空行连接后计算对话占比、三元组多样性和平均句长

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::domain::novel::{CleanedEpisode, Metrics};
use crate::domain::text_normalizer::{char_len, split_sentences};

/// 日文对话：「」括起的部分
static DIALOGUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"「[^」]*」").expect("valid regex"));

/// 计算全书指标
pub fn compute_metrics(episodes: &[CleanedEpisode]) -> Metrics {
    let texts: Vec<&str> = episodes
        .iter()
        .map(|episode| episode.cleaned_text())
        .filter(|text| !text.is_empty())
        .collect();

    let total_chars: usize = texts.iter().map(|text| char_len(text)).sum();
    if total_chars == 0 {
        return Metrics::default();
    }

    let all_text = texts.join("\n\n");

    let dialogue_chars: usize = DIALOGUE
        .find_iter(&all_text)
        .map(|m| char_len(m.as_str()))
        .sum();

    let sentence_lengths: Vec<usize> = split_sentences(&all_text)
        .into_iter()
        .filter(|sentence| !sentence.trim().is_empty())
        .map(char_len)
        .collect();
    let mean_sentence_len = if sentence_lengths.is_empty() {
        0.0
    } else {
        sentence_lengths.iter().sum::<usize>() as f64 / sentence_lengths.len() as f64
    };

    Metrics {
        total_chars,
        avg_chars_per_episode: round_to(total_chars as f64 / texts.len() as f64, 2),
        dialogue_ratio: round_to(dialogue_chars as f64 / total_chars as f64, 6),
        unique_trigram_ratio: round_to(unique_trigram_ratio(&all_text, total_chars), 6),
        mean_sentence_len: round_to(mean_sentence_len, 2),
    }
}

/// 三元组窗口数按正文总字数计算（不含连接用的换行）
fn unique_trigram_ratio(all_text: &str, total_chars: usize) -> f64 {
    let windows = total_chars.saturating_sub(2);
    if windows == 0 {
        return 0.0;
    }

    let chars: Vec<char> = all_text.chars().collect();
    let unique: HashSet<&[char]> = (0..windows).map(|i| &chars[i..i + 3]).collect();
    unique.len() as f64 / windows as f64
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::RawEpisode;
    use std::collections::BTreeSet;

    fn episodes(texts: &[&str]) -> Vec<CleanedEpisode> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let raw = RawEpisode::new(i as u32 + 1, "", "", *text);
                CleanedEpisode::from_raw(raw, text.to_string(), BTreeSet::new())
            })
            .collect()
    }

    #[test]
    fn test_empty_input_yields_zero_metrics() {
        assert_eq!(compute_metrics(&[]), Metrics::default());
        assert_eq!(compute_metrics(&episodes(&["", ""])), Metrics::default());
    }

    #[test]
    fn test_dialogue_and_sentences() {
        let metrics = compute_metrics(&episodes(&["「はい」と彼は言った。"]));

        assert_eq!(metrics.total_chars, 11);
        assert_eq!(metrics.avg_chars_per_episode, 11.0);
        assert_eq!(metrics.dialogue_ratio, 0.363636);
        assert_eq!(metrics.unique_trigram_ratio, 1.0);
        assert_eq!(metrics.mean_sentence_len, 10.0);
    }

    #[test]
    fn test_repetition_lowers_trigram_ratio() {
        let metrics = compute_metrics(&episodes(&["ああああ"]));

        assert_eq!(metrics.unique_trigram_ratio, 0.5);
        assert_eq!(metrics.dialogue_ratio, 0.0);
        assert_eq!(metrics.mean_sentence_len, 4.0);
    }

    #[test]
    fn test_empty_episodes_are_skipped() {
        let metrics = compute_metrics(&episodes(&["abc", "", "de"]));

        assert_eq!(metrics.total_chars, 5);
        assert_eq!(metrics.avg_chars_per_episode, 2.5);
        assert_eq!(metrics.unique_trigram_ratio, 1.0);
    }

    #[test]
    fn test_ratios_are_bounded() {
        let metrics = compute_metrics(&episodes(&["「あ」「い」「う」", "ここは。そこは？"]));

        assert!((0.0..=1.0).contains(&metrics.dialogue_ratio));
        assert!((0.0..=1.0).contains(&metrics.unique_trigram_ratio));
    }
}
