//! Persistence Layer - 数据持久化
//!
//! 作品、评估结果与评估设置均以 JSON 文件保存

pub mod json_store;

pub use json_store::JsonFileStore;
