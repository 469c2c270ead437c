//! Settings Commands

use crate::domain::evaluation::StageSettings;

/// 覆盖保存全部阶段设置
#[derive(Debug, Clone)]
pub struct SaveSettings {
    pub settings: Vec<StageSettings>,
}
