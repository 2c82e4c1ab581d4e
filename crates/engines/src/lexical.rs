//! Lexical engine — deterministic, offline fallback backend.
//!
//! Scores statements by counting urgency/importance cue words and generates
//! text from fixed templates. No network, no model weights: the same input
//! always produces the same output, which is what the default backend and
//! the hermetic test suite need. Quality is intentionally modest — real
//! semantic understanding comes from the remote backend.

use async_trait::async_trait;
use tasklens_core::engine::{EngineKind, GenerationParams, TextEngine};
use tasklens_core::error::EngineError;

/// Cue words that move a statement's score toward 1. Mixed English and
/// Japanese, matched case-insensitively as substrings.
const CUES: &[&str] = &[
    "urgent",
    "immediately",
    "asap",
    "deadline",
    "due",
    "today",
    "tomorrow",
    "now",
    "critical",
    "important",
    "essential",
    "must",
    "blocker",
    "blocked",
    "depends",
    "outage",
    "production",
    "customers",
    "至急",
    "緊急",
    "重要",
    "期限",
    "今すぐ",
    "今日",
    "明日",
];

/// Longest summary the lexical backend will emit, in characters.
const SUMMARY_CHAR_LIMIT: usize = 160;

/// An engine that understands text only lexically.
pub struct LexicalEngine {
    kind: EngineKind,
    model: String,
    params: GenerationParams,
}

impl LexicalEngine {
    pub fn new(kind: EngineKind, model: impl Into<String>, params: GenerationParams) -> Self {
        Self {
            kind,
            model: model.into(),
            params,
        }
    }

    /// The model id this engine stands in for.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Decoding params the engine was built with. Lexical generation is
    /// template-based, so these are recorded but not consulted.
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    fn summarize_text(input: &str) -> String {
        let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= SUMMARY_CHAR_LIMIT {
            return collapsed;
        }
        let cut: String = collapsed.chars().take(SUMMARY_CHAR_LIMIT).collect();
        format!("{}…", cut.trim_end())
    }

    fn extract_scaffold(prompt: &str) -> String {
        // The extraction prompt embeds the raw text between the instruction
        // line and the "Format:" block; everything else is scaffold.
        let mut content_lines = Vec::new();
        let mut in_content = false;
        for line in prompt.lines() {
            if line.starts_with("Extract task information") {
                in_content = true;
                continue;
            }
            if line.starts_with("Format:") {
                break;
            }
            if in_content && !line.trim().is_empty() {
                content_lines.push(line.trim());
            }
        }

        let title: String = content_lines
            .first()
            .copied()
            .unwrap_or("")
            .chars()
            .take(60)
            .collect();
        let description = content_lines.join(" ");

        let lower = description.to_lowercase();
        let tags: Vec<&str> = CUES
            .iter()
            .copied()
            .filter(|cue| lower.contains(cue))
            .take(3)
            .collect();

        format!(
            "Title: {title}\nDescription: {description}\nTags: {}",
            tags.join(", ")
        )
    }

    fn suggest_from_context(prompt: &str) -> String {
        // The suggestion context lists existing tasks as "- <title>" lines;
        // propose continuing the first one.
        match prompt
            .lines()
            .find_map(|line| line.strip_prefix("- "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            Some(title) => format!("「{title}」を進める\n「{title}」の次のアクションを整理して着手する。"),
            None => "新しいタスクを計画する\n直近の目標を洗い出して、最初の一歩を決める。".to_string(),
        }
    }
}

#[async_trait]
impl TextEngine for LexicalEngine {
    fn name(&self) -> &str {
        "lexical"
    }

    fn kind(&self) -> EngineKind {
        self.kind
    }

    async fn score(&self, statement: &str) -> Result<f64, EngineError> {
        if self.kind != EngineKind::TextClassification {
            return Err(EngineError::Unsupported(format!(
                "Engine '{}' ({}) does not score statements",
                self.name(),
                self.kind
            )));
        }

        let lower = statement.to_lowercase();
        let hits = CUES.iter().filter(|cue| lower.contains(*cue)).count() as i32;
        // 0 cues → 0.0, 1 → 0.5, 2 → 0.75, … asymptotically 1.0
        Ok(1.0 - 0.5f64.powi(hits))
    }

    async fn generate(&self, prompt: &str) -> Result<String, EngineError> {
        match self.kind {
            EngineKind::Summarization => Ok(Self::summarize_text(prompt)),
            EngineKind::Text2TextGeneration => {
                if prompt.contains("Format:") && prompt.contains("Title:") {
                    Ok(Self::extract_scaffold(prompt))
                } else {
                    Ok(Self::suggest_from_context(prompt))
                }
            }
            EngineKind::TextClassification => Err(EngineError::Unsupported(format!(
                "Engine '{}' ({}) does not generate text",
                self.name(),
                self.kind
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LexicalEngine {
        LexicalEngine::new(
            EngineKind::TextClassification,
            "distilbert-base-uncased",
            GenerationParams::classification(),
        )
    }

    #[tokio::test]
    async fn score_is_deterministic_and_bounded() {
        let engine = classifier();
        let a = engine.score("Is this task urgent? Fix the outage now").await.unwrap();
        let b = engine.score("Is this task urgent? Fix the outage now").await.unwrap();
        assert_eq!(a, b);
        assert!((0.0..=1.0).contains(&a));
    }

    #[tokio::test]
    async fn more_cues_score_higher() {
        let engine = classifier();
        let calm = engine.score("Water the plants sometime").await.unwrap();
        let hot = engine
            .score("Urgent: production outage, customers affected, fix today")
            .await
            .unwrap();
        assert!(hot > calm);
        assert_eq!(calm, 0.0);
    }

    #[tokio::test]
    async fn japanese_cues_count() {
        let engine = classifier();
        let score = engine.score("至急対応してください").await.unwrap();
        assert!(score > 0.0);
    }

    #[tokio::test]
    async fn summarization_collapses_and_truncates() {
        let engine = LexicalEngine::new(
            EngineKind::Summarization,
            "sshleifer/distilbart-cnn-12-6",
            GenerationParams::default(),
        );
        let short = engine.generate("Fix the\n  build   pipeline").await.unwrap();
        assert_eq!(short, "Fix the build pipeline");

        let long_input = "word ".repeat(100);
        let long = engine.generate(&long_input).await.unwrap();
        assert!(long.chars().count() <= SUMMARY_CHAR_LIMIT + 1);
        assert!(long.ends_with('…'));
    }

    #[tokio::test]
    async fn generation_fills_extraction_scaffold() {
        let engine = LexicalEngine::new(
            EngineKind::Text2TextGeneration,
            "google/flan-t5-small",
            GenerationParams::default(),
        );
        let prompt = "\nExtract task information from the following text:\nFix the urgent login bug\n\nFormat:\nTitle: [task title]\nDescription: [task description]\nTags: [comma-separated tags]\n";
        let output = engine.generate(prompt).await.unwrap();

        assert!(output.contains("Title: Fix the urgent login bug"));
        assert!(output.contains("Description: Fix the urgent login bug"));
        assert!(output.contains("Tags: urgent"));
    }

    #[tokio::test]
    async fn generation_suggests_from_task_list() {
        let engine = LexicalEngine::new(
            EngineKind::Text2TextGeneration,
            "facebook/bart-base",
            GenerationParams::default(),
        );
        let context = "現在のタスク一覧:\n- レポート作成\n  状態: 進行中\n\n上記のタスクリストを考慮して、次に取り組むべきタスクを提案してください。";
        let output = engine.generate(context).await.unwrap();

        let mut lines = output.lines();
        assert_eq!(lines.next().unwrap(), "「レポート作成」を進める");
        assert!(lines.next().unwrap().contains("レポート作成"));
    }

    #[tokio::test]
    async fn empty_task_list_still_suggests() {
        let engine = LexicalEngine::new(
            EngineKind::Text2TextGeneration,
            "facebook/bart-base",
            GenerationParams::default(),
        );
        let output = engine.generate("現在のタスク一覧:\n\n上記のタスクリストを考慮して、次に取り組むべきタスクを提案してください。").await.unwrap();
        assert!(!output.lines().next().unwrap().is_empty());
    }

    #[tokio::test]
    async fn classification_kind_does_not_generate() {
        let err = classifier().generate("prompt").await.unwrap_err();
        assert!(matches!(err, EngineError::Unsupported(_)));
    }
}
