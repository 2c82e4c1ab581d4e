//! Error types for the TaskLens domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Engine failures have
//! their own bounded-context enum; everything converges on [`Error`] at the
//! orchestrator boundary, where it is rendered into the single wire shape
//! `{"error": "<message>"}`.

use thiserror::Error;

/// The top-level error type for all TaskLens operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required request field is missing or empty. Displays verbatim
    /// (e.g. "Title and content are required") — validation messages are
    /// part of the wire contract and are never wrapped.
    #[error("{0}")]
    Validation(String),

    /// The request body is not valid JSON.
    #[error("Invalid JSON input: {0}")]
    InvalidInput(String),

    /// An engine call failed mid-operation; rewrapped at the orchestrator
    /// boundary with the operation's name.
    #[error("Failed to {operation}: {reason}")]
    Operation { operation: String, reason: String },

    // --- Engine errors (before boundary wrapping) ---
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// A validation failure with the given wire message.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Wrap a sub-call failure with the failing operation's name,
    /// e.g. `Error::operation("classify task", err)` displays as
    /// `Failed to classify task: <err>`.
    pub fn operation(operation: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::Operation {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    /// Render into the uniform response body `{"error": "<message>"}`.
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by inference endpoint, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Engine not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed engine output: {0}")]
    MalformedOutput(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}
