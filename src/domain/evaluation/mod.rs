//! Evaluation - 评估标准、提示词与结果提取

mod criteria;
mod extractor;
mod prompt;

pub use criteria::{find_stage, CriterionId, StageCriterion, StageSettings};
pub use extractor::{extract_json, EvaluationResult, ExtractError};
pub use prompt::PromptBuilder;
