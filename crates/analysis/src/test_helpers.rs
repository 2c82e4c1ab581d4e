//! Shared test helpers for analysis tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tasklens_core::engine::{EngineKind, TextEngine};
use tasklens_core::error::EngineError;

/// A scripted engine that answers `score` by substring rules and `generate`
/// with a fixed output, recording every prompt it sees.
///
/// Score rules are checked in order; the first rule whose pattern occurs in
/// the statement wins. A statement matching no rule is a test bug and
/// panics.
pub struct ScriptedEngine {
    kind: EngineKind,
    rules: Vec<(String, f64)>,
    output: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedEngine {
    pub fn scorer(rules: &[(&str, f64)]) -> Self {
        Self {
            kind: EngineKind::TextClassification,
            rules: rules
                .iter()
                .map(|(pattern, score)| (pattern.to_string(), *score))
                .collect(),
            output: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn generator(output: &str) -> Self {
        Self {
            kind: EngineKind::Text2TextGeneration,
            rules: Vec::new(),
            output: Some(output.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn summarizer(output: &str) -> Self {
        Self {
            kind: EngineKind::Summarization,
            ..Self::generator(output)
        }
    }

    /// Number of engine calls made so far.
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// All prompts seen, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    fn kind(&self) -> EngineKind {
        self.kind
    }

    async fn score(&self, statement: &str) -> Result<f64, EngineError> {
        self.prompts.lock().unwrap().push(statement.to_string());
        let score = self
            .rules
            .iter()
            .find(|(pattern, _)| statement.contains(pattern))
            .map(|(_, score)| *score)
            .unwrap_or_else(|| panic!("ScriptedEngine: no rule matches {statement:?}"));
        Ok(score)
    }

    async fn generate(&self, prompt: &str) -> Result<String, EngineError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.output {
            Some(output) => Ok(output.clone()),
            None => panic!("ScriptedEngine: no generate output scripted"),
        }
    }
}

/// An engine whose every call fails — for error-propagation tests.
pub struct FailingEngine {
    kind: EngineKind,
    message: String,
}

impl FailingEngine {
    pub fn new(kind: EngineKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl TextEngine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    fn kind(&self) -> EngineKind {
        self.kind
    }

    async fn score(&self, _statement: &str) -> Result<f64, EngineError> {
        Err(EngineError::Network(self.message.clone()))
    }

    async fn generate(&self, _prompt: &str) -> Result<String, EngineError> {
        Err(EngineError::Network(self.message.clone()))
    }
}
