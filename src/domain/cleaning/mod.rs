//! Cleaning - 样板文本清洗
//!
//! 从抓取到的正文中移除评价请求、SNS 宣传、更新告知等非叙事行

mod cleaner;
mod patterns;

pub use cleaner::{BoilerplateCleaner, CleanResult, MIN_CHARS, MIN_RATIO};
pub use patterns::{BoilerplateCategory, CategoryDef, PatternSet};
