//! 按 token 预算分批
//!
//! 长篇作品整体超出模型上下文时，按话顺序切成若干子作品。
//! 分词器通过 [`TokenCounter`] 注入，领域层不依赖具体实现。

use crate::domain::novel::NovelDocument;

/// 每批的默认 token 上限
pub const DEFAULT_TOKEN_CEILING: usize = 40_000;

/// 分词计数器
pub trait TokenCounter: Send + Sync {
    fn count_tokens(&self, text: &str) -> usize;
}

/// 子作品批次
#[derive(Debug, Clone)]
pub struct SubNovelBatch {
    /// 从 0 开始的批次序号
    pub index: usize,
    pub token_count: usize,
    /// 只替换了话列表的父文档
    pub document: NovelDocument,
}

/// 将文档按 token 上限切分
///
/// 规则:
/// - 加入下一话会超过上限时关闭当前批次
/// - 单话超过上限时独立成批
/// - 不重排、不合并、不丢弃任何一话
pub fn chunk(
    document: &NovelDocument,
    counter: &dyn TokenCounter,
    token_ceiling: usize,
) -> Vec<SubNovelBatch> {
    let mut groups: Vec<(usize, Vec<_>)> = Vec::new();
    let mut current = Vec::new();
    let mut current_tokens = 0usize;

    for episode in document.episodes() {
        let tokens = counter.count_tokens(episode.cleaned_text());
        if !current.is_empty() && current_tokens + tokens > token_ceiling {
            groups.push((current_tokens, std::mem::take(&mut current)));
            current_tokens = 0;
        }
        current.push(episode.clone());
        current_tokens += tokens;
    }

    if !current.is_empty() {
        groups.push((current_tokens, current));
    }

    let batches: Vec<SubNovelBatch> = groups
        .into_iter()
        .enumerate()
        .map(|(index, (token_count, episodes))| SubNovelBatch {
            index,
            token_count,
            document: document.with_episodes(episodes),
        })
        .collect();

    tracing::debug!(
        episodes = document.episodes().len(),
        batches = batches.len(),
        token_ceiling,
        "Document chunked"
    );

    batches
}
