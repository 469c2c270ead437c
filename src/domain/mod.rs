//! Domain Layer - 领域层
//!
//! 纯文本处理，不涉及 IO:
//! - Novel: 作品文档聚合
//! - Cleaning: 样板文本清洗
//! - Analysis: 代表性切片与统计指标
//! - Chunking: 按 token 预算分批
//! - Evaluation: 评估标准、提示词与结果提取

pub mod analysis;
pub mod chunking;
pub mod cleaning;
pub mod evaluation;
pub mod novel;

// 共享的文本规范化工具
pub mod text_normalizer;
