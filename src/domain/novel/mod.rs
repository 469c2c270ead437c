//! Novel Context - 作品限界上下文
//!
//! 职责:
//! - NovelDocument 聚合
//! - 原始话 / 清洗后的话实体
//! - 切片、指标、清洗摘要等值对象

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::{NovelDocument, NovelMeta};
pub use entities::{CleanedEpisode, RawEpisode};
pub use errors::NovelError;
pub use value_objects::{
    AnalysisScope, CleaningSummary, Metrics, Overview, SiteInfo, Slice, SliceKind,
};
