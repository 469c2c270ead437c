//! Novel Queries

/// 获取作品文档
#[derive(Debug, Clone)]
pub struct GetNovel {
    pub work_id: String,
}

/// 列出所有作品
#[derive(Debug, Clone)]
pub struct ListNovels;
