//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod evaluation_queries;
mod novel_queries;
mod settings_queries;

pub mod handlers;

pub use evaluation_queries::*;
pub use novel_queries::*;
pub use settings_queries::*;
