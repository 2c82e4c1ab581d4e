//! TextEngine trait — the abstraction over text-understanding backends.
//!
//! A TextEngine answers two kinds of question: how *true* a statement is
//! (`score`, a confidence in [0,1]) and what text follows from a prompt
//! (`generate`). The decision layer depends only on this contract, so
//! backends can be swapped (remote inference endpoint, deterministic
//! lexical fallback, scripted test stub) without touching any scoring rule.

use crate::error::EngineError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The capability family an engine is built for.
///
/// Wire/display form uses the conventional task-name strings
/// (`text-classification`, `text2text-generation`, `summarization`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineKind {
    /// Scores statements — backs `score`.
    #[serde(rename = "text-classification")]
    TextClassification,
    /// Prompted generation — backs `generate`.
    #[serde(rename = "text2text-generation")]
    Text2TextGeneration,
    /// Abstractive summarization — backs `generate` with raw text input.
    #[serde(rename = "summarization")]
    Summarization,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::TextClassification => "text-classification",
            EngineKind::Text2TextGeneration => "text2text-generation",
            EngineKind::Summarization => "summarization",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoding configuration fixed when an engine is first built.
///
/// The registry caches engines by `(kind, model)` only — these params are
/// applied on the first build and ignored on later acquisitions of the same
/// key (first config wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum output length in tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Minimum output length in tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,

    /// Whether to sample (false = greedy decoding).
    #[serde(default)]
    pub do_sample: bool,

    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus-sampling threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl GenerationParams {
    /// Params for classification engines (input truncation only).
    pub fn classification() -> Self {
        Self {
            max_length: Some(512),
            ..Self::default()
        }
    }
}

/// The core TextEngine trait.
///
/// Every backend implements this. Callers assume `score` is monotonic
/// ("closer to 1 = more true") and tolerate non-deterministic `generate`
/// output — downstream parsing is defensive, never schema-strict.
#[async_trait]
pub trait TextEngine: Send + Sync {
    /// Short backend name for logs (e.g. "remote", "lexical").
    fn name(&self) -> &str;

    /// The capability family this engine was built for.
    fn kind(&self) -> EngineKind;

    /// Confidence in [0,1] that the statement holds.
    ///
    /// Default implementation reports the capability as unsupported —
    /// generation-only engines don't override it.
    async fn score(&self, statement: &str) -> std::result::Result<f64, EngineError> {
        let _ = statement;
        Err(EngineError::Unsupported(format!(
            "Engine '{}' ({}) does not score statements",
            self.name(),
            self.kind()
        )))
    }

    /// Generate text from a prompt using the engine's configured decoding
    /// params. Default implementation reports unsupported.
    async fn generate(&self, prompt: &str) -> std::result::Result<String, EngineError> {
        let _ = prompt;
        Err(EngineError::Unsupported(format!(
            "Engine '{}' ({}) does not generate text",
            self.name(),
            self.kind()
        )))
    }
}
