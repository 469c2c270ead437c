//! Evaluation Commands

use serde::Deserialize;

/// 评估输入
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// 全文（超出 token 上限时分批）
    #[default]
    Full,
    /// 只发送代表性切片与指标
    Slices,
}

/// 用指定模型评估一部已保存的作品
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateNovel {
    pub provider: String,
    pub work_id: String,
    pub stage: String,
    #[serde(default)]
    pub episode_limit: Option<usize>,
    #[serde(default)]
    pub mode: EvaluationMode,
}
