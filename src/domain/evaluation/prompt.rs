//! 评估提示词
//!
//! 模板中的占位符：`{criteria_text}` `{scores_text}` `{novel_json}`
//! `{analysis_json}` `{sub_reviews}` `{part}` `{parts}`

use serde::Serialize;

use super::criteria::StageSettings;
use crate::domain::novel::{AnalysisScope, Metrics, NovelDocument, Overview};

const OUTPUT_FORMAT: &str = r#"### 出力フォーマット

以下のJSONのみを出力してください。

{
  "title": "",
  "overall_score": 数値,
  "scores": {
{scores_text}
  },
  "comments": {
    "strengths": ["強み1", "強み2", "強み3"],
    "weaknesses": ["改善点1", "改善点2", "改善点3"]
  },
  "final_summary": ""
}"#;

const FULL_NOVEL_TEMPLATE: &str = r#"あなたはライトノベル編集者です。

以下のJSON形式の小説データを読み込み、作品全体を評価してください。

### 評価基準

{criteria_text}

{output_format}

### 小説データ

{novel_json}
"#;

const SLICES_TEMPLATE: &str = r#"あなたはライトノベル編集者です。

以下は作品の概要、冒頭・中盤・終盤から抜き出した代表的な抜粋、および文章統計です。
抜粋から作品全体の質を推定して評価してください。

### 評価基準

{criteria_text}

{output_format}

### 分析データ

{analysis_json}
"#;

const SUB_NOVEL_TEMPLATE: &str = r#"あなたはライトノベル編集者です。

以下は長編小説を分割したうちの第{part}部（全{parts}部）です。
この部分に含まれる話を要約し、評価基準ごとに所見を述べてください。
最終的な採点は後で全体をまとめて行うため、ここでは点数を付ける必要はありません。

### 評価基準

{criteria_text}

### 小説データ

{novel_json}
"#;

const SYNTHESIS_TEMPLATE: &str = r#"あなたはライトノベル編集者です。

以下は長編小説を分割して読んだ各部分のレビューです。
これらを統合し、作品全体を評価してください。

### 評価基準

{criteria_text}

{output_format}

### 部分レビュー

{sub_reviews}
"#;

/// 切片模式下发送给模型的视图
#[derive(Serialize)]
struct SlicesView<'a> {
    title: &'a str,
    author: &'a str,
    overview: &'a Overview,
    total_episodes: usize,
    analysis_scope: &'a AnalysisScope,
    metrics: &'a Metrics,
}

/// 按阶段设置生成各类提示词
pub struct PromptBuilder {
    criteria_text: String,
    output_format: String,
}

impl PromptBuilder {
    pub fn new(stage: &StageSettings) -> Self {
        Self {
            criteria_text: stage.criteria_text(),
            output_format: OUTPUT_FORMAT.replace("{scores_text}", &stage.scores_text()),
        }
    }

    /// 整部作品一次评估
    pub fn full_novel(&self, document: &NovelDocument) -> serde_json::Result<String> {
        let novel_json = serde_json::to_string_pretty(document)?;
        Ok(self.render(FULL_NOVEL_TEMPLATE).replace("{novel_json}", &novel_json))
    }

    /// 只用切片和指标评估
    pub fn slices(&self, document: &NovelDocument) -> serde_json::Result<String> {
        let view = SlicesView {
            title: document.title(),
            author: document.author(),
            overview: document.overview(),
            total_episodes: document.total_episodes(),
            analysis_scope: document.analysis_scope(),
            metrics: document.metrics(),
        };
        let analysis_json = serde_json::to_string_pretty(&view)?;
        Ok(self.render(SLICES_TEMPLATE).replace("{analysis_json}", &analysis_json))
    }

    /// 分批评估中的单个批次，part 从 1 开始
    pub fn sub_novel(
        &self,
        document: &NovelDocument,
        part: usize,
        parts: usize,
    ) -> serde_json::Result<String> {
        let novel_json = serde_json::to_string_pretty(document)?;
        Ok(self
            .render(SUB_NOVEL_TEMPLATE)
            .replace("{part}", &part.to_string())
            .replace("{parts}", &parts.to_string())
            .replace("{novel_json}", &novel_json))
    }

    /// 汇总各批次的评审意见
    pub fn synthesis(&self, sub_reviews: &[String]) -> String {
        self.render(SYNTHESIS_TEMPLATE)
            .replace("{sub_reviews}", &sub_reviews.join("\n"))
    }

    // 小说数据最后替换，避免正文中的占位符被误替换
    fn render(&self, template: &str) -> String {
        template
            .replace("{output_format}", &self.output_format)
            .replace("{criteria_text}", &self.criteria_text)
    }
}
