//! 文本规范化工具
//!
//! 清洗、切片、指标计算共用的换行规范化与按字符截取

use once_cell::sync::Lazy;
use regex::Regex;

static CRLF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").expect("valid regex"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid regex"));

/// 检查是否为句末标点（指标计算时的分句依据）
#[inline]
fn is_sentence_terminal(ch: char) -> bool {
    matches!(ch, '。' | '！' | '？' | '!' | '?')
}

/// CR / CRLF 统一为 LF 并去掉首尾空白
pub fn normalize_newlines(text: &str) -> String {
    CRLF.replace_all(text, "\n").trim().to_string()
}

/// 将 3 个以上连续换行压缩为 2 个
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

/// 规范化换行、去除首尾空白并压缩空行
pub fn normalize_text(text: &str) -> String {
    collapse_blank_lines(&normalize_newlines(text))
}

/// 按一个或多个换行拆分为非空行
pub fn split_lines(text: &str) -> Vec<&str> {
    LINE_BREAKS.split(text).filter(|line| !line.is_empty()).collect()
}

/// 字符数（非字节数）
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// 按字符下标截取 [start, start + len)
pub fn char_slice(text: &str, start: usize, len: usize) -> String {
    text.chars().skip(start).take(len).collect()
}

/// 按句末标点分句，保留原始片段（含空白）
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(is_sentence_terminal).collect()
}
