//! Settings Queries

/// 获取全部阶段设置
#[derive(Debug, Clone)]
pub struct GetSettings;
