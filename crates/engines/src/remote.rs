//! Remote engine — delegates inference to an HTTP serving endpoint.
//!
//! Speaks the Hugging Face inference wire shape: `POST {base}/models/{id}`
//! with `{"inputs": …, "parameters": {…}}`. Classification responses score
//! statements; generation/summarization responses carry generated text.
//! Output parsing is tolerant of the two list nestings seen in the wild.

use async_trait::async_trait;
use serde::Deserialize;
use tasklens_core::engine::{EngineKind, GenerationParams, TextEngine};
use tasklens_core::error::EngineError;
use tracing::{debug, warn};

/// An engine backed by a remote inference endpoint.
pub struct RemoteEngine {
    kind: EngineKind,
    model: String,
    base_url: String,
    api_key: Option<String>,
    params: GenerationParams,
    client: reqwest::Client,
}

impl RemoteEngine {
    /// Create a new remote engine.
    ///
    /// `params` are fixed for the engine's lifetime — they are sent with
    /// every request as the `parameters` object.
    pub fn new(
        kind: EngineKind,
        model: impl Into<String>,
        base_url: impl Into<String>,
        api_key: Option<String>,
        params: GenerationParams,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            kind,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            params,
            client,
        }
    }

    /// Issue one inference request and return the raw JSON payload.
    async fn infer(&self, inputs: &str) -> Result<serde_json::Value, EngineError> {
        let url = format!("{}/models/{}", self.base_url, self.model);

        let body = serde_json::json!({
            "inputs": inputs,
            "parameters": self.params,
        });

        debug!(kind = %self.kind, model = %self.model, "Sending inference request");

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(EngineError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(EngineError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status == 404 {
            return Err(EngineError::ModelNotFound(self.model.clone()));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Inference endpoint returned error");
            return Err(EngineError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        response.json().await.map_err(|e| EngineError::ApiError {
            status_code: 200,
            message: format!("Failed to parse response: {e}"),
        })
    }
}

#[async_trait]
impl TextEngine for RemoteEngine {
    fn name(&self) -> &str {
        "remote"
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

        let payload = self.infer(statement).await?;
        parse_score(&payload)
    }

    async fn generate(&self, prompt: &str) -> Result<String, EngineError> {
        if self.kind == EngineKind::TextClassification {
            return Err(EngineError::Unsupported(format!(
                "Engine '{}' ({}) does not generate text",
                self.name(),
                self.kind
            )));
        }

        let payload = self.infer(prompt).await?;
        parse_generated(&payload, self.kind)
    }
}

#[derive(Debug, Deserialize)]
struct ClassificationOutput {
    score: f64,
}

/// Pull the top classification score out of a response payload.
///
/// Accepts both `[[{label, score}, …]]` (batched) and `[{label, score}, …]`
/// (flat); the first entry is the winning label's score.
fn parse_score(payload: &serde_json::Value) -> Result<f64, EngineError> {
    let first = match payload {
        serde_json::Value::Array(items) => match items.first() {
            Some(serde_json::Value::Array(inner)) => inner.first(),
            other => other,
        },
        _ => None,
    };

    let first = first.ok_or_else(|| {
        EngineError::MalformedOutput("empty classification response".into())
    })?;

    let output: ClassificationOutput = serde_json::from_value(first.clone())
        .map_err(|e| EngineError::MalformedOutput(format!("classification entry: {e}")))?;

    Ok(output.score)
}

/// Pull generated text out of a response payload.
///
/// Generation models answer `[{"generated_text": …}]`, summarization models
/// `[{"summary_text": …}]`; a bare object is tolerated too.
fn parse_generated(payload: &serde_json::Value, kind: EngineKind) -> Result<String, EngineError> {
    let field = match kind {
        EngineKind::Summarization => "summary_text",
        _ => "generated_text",
    };

    let entry = match payload {
        serde_json::Value::Array(items) => items.first(),
        obj @ serde_json::Value::Object(_) => Some(obj),
        _ => None,
    };

    entry
        .and_then(|e| e.get(field))
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .ok_or_else(|| EngineError::MalformedOutput(format!("missing '{field}' in response")))
}
