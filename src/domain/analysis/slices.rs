//! 代表性切片选择
//!
//! 在结构上有意义的位置（开篇、中段、结尾）各取约 1800 字的片段，
//! 用较低成本近似通读全文。
//!
//! 选择策略:
//! 1. 锚点：10 话以上取第 1/5/10 话，否则取首话、中间话、末话
//! 2. 每个锚点按 0, +1, -1, +2, -2 ... 向外扫描，分三轮寻找来源话
//! 3. 片段不足 1500 字时按长度排名重新选择来源话

use super::super::novel::{AnalysisScope, CleanedEpisode, Slice, SliceKind};
use crate::domain::text_normalizer::normalize_text;

/// 每个切片的目标字符数
pub const TARGET_SIZE: usize = 1800;

/// 来源话的最小长度
pub const MIN_EPISODE_LENGTH: usize = 1500;

/// 切片的最小长度，不足时触发重新选择
pub const SLICE_MIN: usize = 1500;

/// 从完整话列表计算分析范围
pub fn select_scope(episodes: &[CleanedEpisode]) -> AnalysisScope {
    if episodes.is_empty() {
        return AnalysisScope::default();
    }
    SliceSelector::new(episodes).select()
}

struct SliceSelector<'a> {
    episodes: &'a [CleanedEpisode],
    /// 规范化后的正文（按字符）
    texts: Vec<Vec<char>>,
    /// 按长度降序排列的下标（长度相同保持原顺序）
    by_length: Vec<usize>,
    selected: Vec<usize>,
}

impl<'a> SliceSelector<'a> {
    fn new(episodes: &'a [CleanedEpisode]) -> Self {
        let texts: Vec<Vec<char>> = episodes
            .iter()
            .map(|episode| normalize_text(episode.cleaned_text()).chars().collect())
            .collect();

        let mut by_length: Vec<usize> = (0..texts.len()).collect();
        by_length.sort_by(|&a, &b| texts[b].len().cmp(&texts[a].len()));

        Self {
            episodes,
            texts,
            by_length,
            selected: Vec::with_capacity(3),
        }
    }

    fn len_of(&self, idx: usize) -> usize {
        self.texts[idx].len()
    }

    fn count(&self) -> usize {
        self.texts.len()
    }

    fn select(mut self) -> AnalysisScope {
        let mut slices = Vec::with_capacity(3);

        for (anchor, kind) in self.base_indices().into_iter().zip(SliceKind::ALL) {
            let mut chosen = self.pick_episode(anchor);
            let mut chunk = self.extract(chosen, kind);

            if chunk.chars().count() < SLICE_MIN {
                let fallback = self.choose_fallback(chosen);
                if fallback != chosen {
                    chosen = fallback;
                    chunk = self.extract(chosen, kind);
                }
            }

            if chunk.is_empty() {
                chosen = self.choose_fallback(chosen);
                chunk = self.extract(chosen, kind);
            }

            self.selected.push(chosen);
            slices.push(Slice {
                ep: self.episodes[chosen].number(),
                kind,
                text: chunk,
            });
        }

        let mut episodes_included: Vec<u32> = Vec::with_capacity(3);
        for &idx in &self.selected {
            let number = self.episodes[idx].number();
            if !episodes_included.contains(&number) {
                episodes_included.push(number);
            }
        }

        AnalysisScope {
            episodes_included,
            slices,
        }
    }

    /// 三个锚点下标（话数很少时允许重复）
    fn base_indices(&self) -> [usize; 3] {
        let n = self.count();
        if n >= 10 {
            [0, 4, 9]
        } else {
            let mid = n.div_ceil(2).saturating_sub(1);
            [0, mid, n - 1]
        }
    }

    /// 从锚点向外交替扫描，返回第一个满足条件的下标
    fn search_nearest(&self, start: usize, avoid_used: bool, min_length: usize) -> Option<usize> {
        let n = self.count() as isize;
        let start = start as isize;

        let offsets = std::iter::once(0).chain((1..n).flat_map(|step| [step, -step]));
        for offset in offsets {
            let candidate = start + offset;
            if candidate < 0 || candidate >= n {
                continue;
            }
            let candidate = candidate as usize;
            if avoid_used && self.selected.contains(&candidate) {
                continue;
            }
            let len = self.len_of(candidate);
            if len > 0 && len >= min_length {
                return Some(candidate);
            }
        }
        None
    }

    fn pick_episode(&self, anchor: usize) -> usize {
        let passes = [
            (true, MIN_EPISODE_LENGTH),
            (false, MIN_EPISODE_LENGTH),
            (false, 1),
        ];
        for (avoid_used, min_length) in passes {
            if let Some(candidate) = self.search_nearest(anchor, avoid_used, min_length) {
                return candidate;
            }
        }
        anchor.min(self.count() - 1)
    }

    /// 按切片位置截取片段
    fn extract(&self, idx: usize, kind: SliceKind) -> String {
        let text = &self.texts[idx];
        let len = text.len();
        if len <= TARGET_SIZE {
            return text.iter().collect();
        }

        let start = match kind {
            SliceKind::Hook => 0,
            SliceKind::TurningPoint => {
                let mid = len / 2;
                mid.saturating_sub(TARGET_SIZE / 2).min(len - TARGET_SIZE)
            }
            SliceKind::Payoff => len - TARGET_SIZE,
        };
        text[start..start + TARGET_SIZE].iter().collect()
    }

    /// 片段过短时的备选来源话
    ///
    /// 优先级: 未使用且足够长 > 足够长 > 最长的非空话
    fn choose_fallback(&self, original: usize) -> usize {
        let long_enough = |idx: usize| self.len_of(idx) >= SLICE_MIN;

        self.by_length
            .iter()
            .copied()
            .find(|&idx| idx != original && !self.selected.contains(&idx) && long_enough(idx))
            .or_else(|| {
                self.by_length
                    .iter()
                    .copied()
                    .find(|&idx| idx != original && long_enough(idx))
            })
            .or_else(|| {
                self.by_length
                    .iter()
                    .copied()
                    .find(|&idx| self.len_of(idx) > 0)
            })
            .unwrap_or(original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::RawEpisode;
    use std::collections::BTreeSet;

    fn episode(number: u32, text: String) -> CleanedEpisode {
        let raw = RawEpisode::new(number, format!("第{}話", number), "", text.clone());
        CleanedEpisode::from_raw(raw, text, BTreeSet::new())
    }

    fn novel(lengths: &[usize]) -> Vec<CleanedEpisode> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, &len)| episode(i as u32 + 1, "あ".repeat(len)))
            .collect()
    }

    fn kinds(scope: &AnalysisScope) -> Vec<SliceKind> {
        scope.slices.iter().map(|s| s.kind).collect()
    }

    fn eps(scope: &AnalysisScope) -> Vec<u32> {
        scope.slices.iter().map(|s| s.ep).collect()
    }

    #[test]
    fn test_empty_novel() {
        let scope = select_scope(&[]);
        assert!(scope.episodes_included.is_empty());
        assert!(scope.slices.is_empty());
    }

    #[test]
    fn test_twelve_episode_anchors() {
        let episodes = novel(&[2000; 12]);

        let scope = select_scope(&episodes);

        assert_eq!(scope.episodes_included, vec![1, 5, 10]);
        assert_eq!(
            kinds(&scope),
            vec![SliceKind::Hook, SliceKind::TurningPoint, SliceKind::Payoff]
        );
        assert!(scope.slices.iter().all(|s| s.text.chars().count() == TARGET_SIZE));
    }

    #[test]
    fn test_excerpt_positions() {
        let text = format!("{}{}", "あ".repeat(1000), "い".repeat(1000));
        let episodes: Vec<CleanedEpisode> = (1..=10).map(|n| episode(n, text.clone())).collect();

        let scope = select_scope(&episodes);

        let hook = &scope.slices[0].text;
        assert_eq!(hook.chars().filter(|&c| c == 'あ').count(), 1000);
        assert_eq!(hook.chars().filter(|&c| c == 'い').count(), 800);

        let turning = &scope.slices[1].text;
        assert_eq!(turning.chars().filter(|&c| c == 'あ').count(), 900);
        assert_eq!(turning.chars().filter(|&c| c == 'い').count(), 900);

        let payoff = &scope.slices[2].text;
        assert_eq!(payoff.chars().filter(|&c| c == 'あ').count(), 800);
        assert_eq!(payoff.chars().filter(|&c| c == 'い').count(), 1000);
    }

    #[test]
    fn test_empty_middle_episode_falls_back() {
        let episodes = novel(&[2000, 0, 2000]);

        let scope = select_scope(&episodes);

        let turning = &scope.slices[1];
        assert_eq!(turning.kind, SliceKind::TurningPoint);
        assert_ne!(turning.ep, 2);
        assert!(!turning.text.is_empty());
        assert_eq!(eps(&scope), vec![1, 3, 3]);
        assert_eq!(scope.episodes_included, vec![1, 3]);
    }

    #[test]
    fn test_short_episodes_defer_to_long_one() {
        let episodes = novel(&[100, 2000, 100, 100]);

        let scope = select_scope(&episodes);

        assert_eq!(eps(&scope), vec![2, 2, 2]);
        assert_eq!(scope.episodes_included, vec![2]);
    }

    #[test]
    fn test_all_short_episodes_never_empty() {
        let episodes = novel(&[100, 200, 50]);

        let scope = select_scope(&episodes);

        assert_eq!(scope.slices.len(), 3);
        assert!(scope.slices.iter().all(|s| !s.text.is_empty()));
        // 最长的话被优先作为备选
        assert_eq!(eps(&scope), vec![2, 2, 2]);
    }

    #[test]
    fn test_single_episode_reused() {
        let episodes = novel(&[3000]);

        let scope = select_scope(&episodes);

        assert_eq!(eps(&scope), vec![1, 1, 1]);
        assert_eq!(scope.episodes_included, vec![1]);
        assert!(scope.slices.iter().all(|s| s.text.chars().count() == TARGET_SIZE));
    }

    #[test]
    fn test_base_indices_for_short_novels() {
        let episodes = novel(&[10; 5]);
        let selector = SliceSelector::new(&episodes);
        assert_eq!(selector.base_indices(), [0, 2, 4]);

        let episodes = novel(&[10; 2]);
        let selector = SliceSelector::new(&episodes);
        assert_eq!(selector.base_indices(), [0, 0, 1]);
    }
}
