//! 评估阶段与评估标准
//!
//! 设置文件是 `[StageSettings]` 数组，字段名沿用前端的 camelCase。

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// 评估标准 ID（前端可能写成数字或字符串）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CriterionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionId::Number(n) => write!(f, "{}", n),
            CriterionId::Text(s) => f.write_str(s),
        }
    }
}

/// 单条评估标准
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCriterion {
    pub id: CriterionId,
    pub name: String,
    pub prompt: String,
    pub min_score: Number,
    pub max_score: Number,
}

/// 一个评估阶段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSettings {
    pub stage: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub criteria: Vec<StageCriterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing_score: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_max_score: Option<Number>,
}

impl StageSettings {
    /// 评估标准说明（嵌入提示词）
    pub fn criteria_text(&self) -> String {
        self.criteria
            .iter()
            .map(|c| {
                format!(
                    "- 評価基準{}\n    評価名前： \"{}\",\n    内容：\" {}\"\n    最小スコア:{}\n    最大スコア:{}",
                    c.id, c.name, c.prompt, c.min_score, c.max_score
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// 输出格式中 "scores" 对象的键
    pub fn scores_text(&self) -> String {
        self.criteria
            .iter()
            .map(|c| format!("    \"{}\": 数値 (評価基準{}についての評価)", c.name, c.id))
            .collect::<Vec<_>>()
            .join(",\n")
    }
}

/// 按阶段名查找
pub fn find_stage<'a>(settings: &'a [StageSettings], stage: &str) -> Option<&'a StageSettings> {
    settings.iter().find(|s| s.stage == stage)
}
