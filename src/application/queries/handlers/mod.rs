//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod evaluation_handlers;
mod novel_handlers;
mod settings_handlers;

pub use evaluation_handlers::*;
pub use novel_handlers::*;
pub use settings_handlers::*;
