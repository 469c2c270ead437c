//! 样板文本类别表
//!
//! 类别表是可替换的配置：内置了 kakuyomu / syosetu 两套预设，
//! 也可以从 TOML 文件加载：
//!
//! ```toml
//! [[category]]
//! name = "footer_heading"
//! pattern = '^\s*[★☆]{4,}.*[★☆]{4,}\s*$'
//! strong = true
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

use crate::domain::novel::NovelError;

/// 类别定义（配置形式）
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    pub pattern: String,
    /// 强命中：任意清洗级别都会删除该行
    #[serde(default)]
    pub strong: bool,
}

#[derive(Debug, Deserialize)]
struct PatternFile {
    #[serde(rename = "category", default)]
    categories: Vec<CategoryDef>,
}

/// 已编译的样板类别
#[derive(Debug, Clone)]
pub struct BoilerplateCategory {
    name: String,
    regex: Regex,
    strong: bool,
}

impl BoilerplateCategory {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_strong(&self) -> bool {
        self.strong
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// 有序的类别表
#[derive(Debug, Clone)]
pub struct PatternSet {
    categories: Vec<BoilerplateCategory>,
}

const COMMON_CATEGORIES: &[(&str, &str, bool)] = &[
    (
        "stars_request",
        r"[★☆]{1,}|★で称える|評価(お願いします|ください)|レビュー(を|お願いします)",
        false,
    ),
    (
        "like_request",
        r"♡|ハート|いいね|応援(しよう|お願いします|して|のお願い)",
        false,
    ),
    ("sns_promo", r"SNS|Twitter|X\s*\(|フォロー|宣伝|読了報告", false),
    (
        "ranking",
        r"(月間|週間|年間).{0,8}(ランキング|順位)|1位|上位|目標",
        false,
    ),
    ("thanks_request", r"お礼とお願い|お願い|ギフト|切実", false),
    ("update_notice", r"更新告知|次回更新|告知|予告", false),
    ("footer_heading", r"^\s*[★☆]{4,}.*[★☆]{4,}\s*$", true),
];

const SYOSETU_EXTRA_CATEGORIES: &[(&str, &str, bool)] = &[
    (
        "author_note",
        r"作者のコメント|あとがき|作者より|お疲れ様でした",
        false,
    ),
    (
        "copyright_notice",
        r"当サイトの内容、テキスト、画像等の無断転載・無断使用を固く禁じます|Unauthorized copying and replication of the contents of this site, text and images are strictly prohibited",
        true,
    ),
];

static KAKUYOMU: Lazy<PatternSet> = Lazy::new(|| compile_builtin(COMMON_CATEGORIES.iter()));

static SYOSETU: Lazy<PatternSet> = Lazy::new(|| {
    compile_builtin(COMMON_CATEGORIES.iter().chain(SYOSETU_EXTRA_CATEGORIES.iter()))
});

fn compile_builtin<'a>(table: impl Iterator<Item = &'a (&'a str, &'a str, bool)>) -> PatternSet {
    let categories = table
        .map(|(name, pattern, strong)| BoilerplateCategory {
            name: name.to_string(),
            regex: Regex::new(pattern).expect("built-in boilerplate pattern"),
            strong: *strong,
        })
        .collect();
    PatternSet { categories }
}

impl PatternSet {
    /// 从类别定义编译
    pub fn from_defs(defs: Vec<CategoryDef>) -> Result<Self, NovelError> {
        let categories = defs
            .into_iter()
            .map(|def| {
                let regex = Regex::new(&def.pattern)
                    .map_err(|e| NovelError::InvalidPattern(format!("{}: {}", def.name, e)))?;
                Ok(BoilerplateCategory {
                    name: def.name,
                    regex,
                    strong: def.strong,
                })
            })
            .collect::<Result<Vec<_>, NovelError>>()?;

        Ok(Self { categories })
    }

    /// 从 TOML 文本加载
    pub fn from_toml_str(content: &str) -> Result<Self, NovelError> {
        let file: PatternFile =
            toml::from_str(content).map_err(|e| NovelError::InvalidPattern(e.to_string()))?;
        if file.categories.is_empty() {
            return Err(NovelError::InvalidPattern(
                "pattern file defines no category".to_string(),
            ));
        }
        Self::from_defs(file.categories)
    }

    /// 从 TOML 文件加载
    pub fn from_toml_file(path: &Path) -> Result<Self, NovelError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NovelError::InvalidPattern(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// カクヨム 预设
    pub fn kakuyomu() -> Self {
        KAKUYOMU.clone()
    }

    /// 小説家になろう 预设（额外包含作者附言与版权声明）
    pub fn syosetu() -> Self {
        SYOSETU.clone()
    }

    /// 按站点名选择预设，未知站点使用 kakuyomu 预设
    pub fn for_site(site_name: &str) -> Self {
        match site_name {
            "syosetu" => Self::syosetu(),
            _ => Self::kakuyomu(),
        }
    }

    pub fn categories(&self) -> &[BoilerplateCategory] {
        &self.categories
    }

    /// 返回该行命中的全部类别（按表顺序）
    pub fn hits<'a>(&'a self, line: &str) -> Vec<&'a BoilerplateCategory> {
        self.categories
            .iter()
            .filter(|category| category.is_match(line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(hits: &[&BoilerplateCategory]) -> Vec<String> {
        hits.iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn test_presets() {
        assert_eq!(PatternSet::kakuyomu().categories().len(), 7);
        assert_eq!(PatternSet::syosetu().categories().len(), 9);
        assert_eq!(PatternSet::for_site("unknown").categories().len(), 7);
    }

    #[test]
    fn test_footer_heading_is_strong() {
        let set = PatternSet::kakuyomu();
        let hits = set.hits("★★★★ お礼とお願い ★★★★");
        assert!(hits.iter().any(|c| c.is_strong()));
        assert_eq!(
            names(&hits),
            vec!["stars_request", "thanks_request", "footer_heading"]
        );
    }

    #[test]
    fn test_plain_prose_has_no_hits() {
        let set = PatternSet::syosetu();
        assert!(set.hits("彼は静かに扉を開けた。").is_empty());
    }

    #[test]
    fn test_from_toml_str() {
        let content = r#"
[[category]]
name = "promo"
pattern = "宣伝"

[[category]]
name = "banner"
pattern = '^=+$'
strong = true
"#;
        let set = PatternSet::from_toml_str(content).unwrap();
        assert_eq!(set.categories().len(), 2);
        assert!(set.categories()[1].is_strong());
        assert_eq!(names(&set.hits("宣伝です")), vec!["promo"]);
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let content = r#"
[[category]]
name = "broken"
pattern = "(unclosed"
"#;
        let err = PatternSet::from_toml_str(content).unwrap_err();
        assert!(matches!(err, NovelError::InvalidPattern(_)));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(PatternSet::from_toml_str("").is_err());
    }
}
