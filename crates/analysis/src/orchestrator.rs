//! Request orchestration — validation, sequencing, response assembly.
//!
//! The [`Analyzer`] owns the engine registry and runs one operation per
//! call: validate required fields (specific wire messages, checked before
//! any engine is acquired), sequence the component calls strictly in
//! order, and assemble the typed response. Engine failures are caught here
//! — and only here — and rewrapped as `Failed to <operation>: <message>`.

use std::future::Future;
use std::sync::Arc;

use tasklens_config::AppConfig;
use tasklens_core::api::{
    ClassifyRequest, ClassifyResponse, CreateTaskRequest, CreateTaskResponse, PriorityRequest,
    PriorityResponse, SuggestRequest, SuggestResponse, SummarizeRequest, SummarizeResponse,
};
use tasklens_core::engine::{EngineKind, GenerationParams, TextEngine};
use tasklens_core::error::{Error, Result};
use tasklens_core::task::TaskSummary;
use tasklens_engines::EngineRegistry;
use tracing::{debug, warn};
use uuid::Uuid;

/// The five analysis operations, used to dispatch a raw JSON request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Priority,
    Classify,
    Create,
    Summarize,
    Suggest,
}

/// Orchestrates the analysis pipeline for one request at a time.
pub struct Analyzer {
    registry: Arc<EngineRegistry>,
    config: AppConfig,
}

impl Analyzer {
    /// Build an analyzer whose engines come from the configured backend.
    pub fn new(config: AppConfig) -> Result<Self> {
        let registry = Arc::new(EngineRegistry::from_config(&config)?);
        Ok(Self { registry, config })
    }

    /// Build an analyzer over an explicit registry (tests inject scripted
    /// engines this way).
    pub fn with_registry(config: AppConfig, registry: Arc<EngineRegistry>) -> Self {
        Self { registry, config }
    }

    // ── Engine acquisition ─────────────────────────────────────────────

    fn classifier(&self) -> std::result::Result<Arc<dyn TextEngine>, Error> {
        Ok(self.registry.acquire(
            EngineKind::TextClassification,
            &self.config.models.classifier,
            &GenerationParams::classification(),
        )?)
    }

    fn generator(&self) -> std::result::Result<Arc<dyn TextEngine>, Error> {
        Ok(self.registry.acquire(
            EngineKind::Text2TextGeneration,
            &self.config.models.generator,
            &GenerationParams {
                max_length: Some(128),
                min_length: Some(30),
                do_sample: true,
                temperature: Some(0.7),
                top_p: None,
            },
        )?)
    }

    fn summarizer(&self) -> std::result::Result<Arc<dyn TextEngine>, Error> {
        Ok(self.registry.acquire(
            EngineKind::Summarization,
            &self.config.models.summarizer,
            &GenerationParams {
                max_length: Some(128),
                min_length: Some(30),
                do_sample: false,
                temperature: None,
                top_p: None,
            },
        )?)
    }

    fn suggester(&self) -> std::result::Result<Arc<dyn TextEngine>, Error> {
        Ok(self.registry.acquire(
            EngineKind::Text2TextGeneration,
            &self.config.models.suggester,
            &GenerationParams {
                max_length: Some(128),
                min_length: Some(30),
                do_sample: true,
                temperature: Some(0.7),
                top_p: Some(0.9),
            },
        )?)
    }

    // ── Operations ─────────────────────────────────────────────────────

    /// `priority` — 4-factor weighted priority for a titled task.
    pub async fn analyze_priority(&self, request: &PriorityRequest) -> Result<PriorityResponse> {
        if request.title.is_empty() || request.content.is_empty() {
            return Err(Error::validation("Title and content are required"));
        }

        let full_text = format!("{}\n{}", request.title, request.content);
        self.run("analyze priority", async {
            let engine = self.classifier()?;
            let factors = crate::priority::score_factors(engine.as_ref(), &full_text).await?;
            let priority = crate::priority::label_for(factors.weighted_sum());
            Ok(PriorityResponse { priority })
        })
        .await
    }

    /// `classify` — dual-signal category with rounded confidence.
    pub async fn classify_task(&self, request: &ClassifyRequest) -> Result<ClassifyResponse> {
        if request.title.is_empty() || request.content.is_empty() {
            return Err(Error::validation("Title and content are required"));
        }

        let full_text = format!("{}\n{}", request.title, request.content);
        self.run("classify task", async {
            let engine = self.classifier()?;
            let (category, confidence) =
                crate::category::categorize(engine.as_ref(), &full_text).await?;
            Ok(ClassifyResponse {
                category,
                confidence: round2(confidence),
            })
        })
        .await
    }

    /// `create` — structured task from free text: generated fields, a due
    /// date token appended to the description, and a quick priority.
    pub async fn create_task(&self, request: &CreateTaskRequest) -> Result<CreateTaskResponse> {
        if request.text.is_empty() {
            return Err(Error::validation("Text is required"));
        }

        self.run("create task", async {
            let generator = self.generator()?;
            let mut task =
                crate::extract::extract_task_info(generator.as_ref(), &request.text).await?;

            if let Some(due_date) = crate::extract::extract_date(&request.text) {
                task.description = format!("{}\n期限: {}", task.description, due_date);
            }

            let classifier = self.classifier()?;
            let priority =
                crate::priority::quick_priority(classifier.as_ref(), &request.text).await?;

            Ok(CreateTaskResponse {
                title: task.title,
                description: task.description,
                priority,
                tags: task.tags,
            })
        })
        .await
    }

    /// `summarize` — generated summary plus top keywords.
    pub async fn summarize_task(&self, request: &SummarizeRequest) -> Result<SummarizeResponse> {
        if request.title.is_empty() || request.content.is_empty() {
            return Err(Error::validation("Title and content are required"));
        }

        let full_text = format!("{}\n{}", request.title, request.content);
        self.run("generate summary", async {
            let summarizer = self.summarizer()?;
            let summary = crate::summarize::summarize(summarizer.as_ref(), &full_text).await?;

            let classifier = self.classifier()?;
            let keywords =
                crate::summarize::extract_keywords(classifier.as_ref(), &full_text).await?;

            Ok(SummarizeResponse { summary, keywords })
        })
        .await
    }

    /// `suggest` — next-task proposal derived from the existing task list.
    pub async fn suggest_next_task(&self, request: &SuggestRequest) -> Result<SuggestResponse> {
        // An absent list means "no tasks yet"; any present non-array shape
        // is a validation error. Element conversion happens inside the
        // operation, so a malformed entry is a wrapped failure instead.
        let tasks_value = if request.tasks.is_null() {
            serde_json::Value::Array(Vec::new())
        } else {
            request.tasks.clone()
        };

        if !tasks_value.is_array() {
            return Err(Error::validation("Tasks must be an array"));
        }

        self.run("suggest next task", async {
            let tasks: Vec<TaskSummary> = serde_json::from_value(tasks_value)?;
            let context = crate::suggest::format_tasks_context(&tasks);

            let generator = self.suggester()?;
            let generated = generator.generate(&context).await?;
            let (title, description) = crate::suggest::split_suggestion(&generated);

            let classifier = self.classifier()?;
            let priority =
                crate::priority::combined_priority(classifier.as_ref(), &generated).await?;

            Ok(SuggestResponse {
                title,
                description,
                priority,
            })
        })
        .await
    }

    // ── Dispatch & error boundary ──────────────────────────────────────

    /// Parse a raw JSON request, run the operation, and render either the
    /// response or the uniform `{"error": …}` body. This is the outer
    /// boundary: nothing below it produces wire output.
    pub async fn dispatch(
        &self,
        operation: Operation,
        input: serde_json::Value,
    ) -> serde_json::Value {
        let result: Result<serde_json::Value> = match operation {
            Operation::Priority => match parse_request::<PriorityRequest>(input) {
                Ok(request) => self.analyze_priority(&request).await.and_then(to_value),
                Err(err) => Err(err),
            },
            Operation::Classify => match parse_request::<ClassifyRequest>(input) {
                Ok(request) => self.classify_task(&request).await.and_then(to_value),
                Err(err) => Err(err),
            },
            Operation::Create => match parse_request::<CreateTaskRequest>(input) {
                Ok(request) => self.create_task(&request).await.and_then(to_value),
                Err(err) => Err(err),
            },
            Operation::Summarize => match parse_request::<SummarizeRequest>(input) {
                Ok(request) => self.summarize_task(&request).await.and_then(to_value),
                Err(err) => Err(err),
            },
            Operation::Suggest => match parse_request::<SuggestRequest>(input) {
                Ok(request) => self.suggest_next_task(&request).await.and_then(to_value),
                Err(err) => Err(err),
            },
        };

        match result {
            Ok(value) => value,
            Err(err) => err.to_body(),
        }
    }

    /// Wrap an operation body: log start/end and convert any failure into
    /// the `Failed to <operation>: <reason>` shape. Validation never passes
    /// through here — it is rejected before the body runs.
    async fn run<T, F>(&self, operation: &str, body: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let request_id = Uuid::new_v4();
        debug!(%request_id, operation, "Starting operation");

        match body.await {
            Ok(value) => {
                debug!(%request_id, operation, "Operation complete");
                Ok(value)
            }
            Err(err) => {
                warn!(%request_id, operation, error = %err, "Operation failed");
                Err(Error::operation(operation, unwrap_reason(err)))
            }
        }
    }
}

/// Parse a raw JSON value into a request record. Any shape mismatch is a
/// boundary error — no engine is ever acquired for it.
fn parse_request<T: serde::de::DeserializeOwned>(input: serde_json::Value) -> Result<T> {
    serde_json::from_value(input).map_err(|e| Error::InvalidInput(e.to_string()))
}

/// Serialize a response record for the wire.
fn to_value<T: serde::Serialize>(response: T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(response)?)
}

/// Round a confidence to 2 decimal places for the wire.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Strip the context prefix nested errors would otherwise leak into the
/// wire message — the reason shown after `Failed to <op>:` is the
/// underlying message alone.
fn unwrap_reason(err: Error) -> String {
    match err {
        Error::Engine(inner) => inner.to_string(),
        Error::Serialization(inner) => inner.to_string(),
        other => other.to_string(),
    }
}
