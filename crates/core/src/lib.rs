//! # TaskLens Core
//!
//! Domain types, traits, and error definitions for the TaskLens task
//! analysis toolkit. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The semantic understanding of text is delegated to an external engine
//! behind the [`TextEngine`] trait (`score` a statement, `generate` from a
//! prompt). Everything that turns those raw signals into task-management
//! decisions is deterministic and lives in `tasklens-analysis`. Keeping the
//! trait here enables:
//! - Swapping engine backends via configuration
//! - Easy testing with scripted stub engines
//! - Clean dependency graph (all crates depend inward on core)

pub mod api;
pub mod engine;
pub mod error;
pub mod task;

// Re-export key types at crate root for ergonomics
pub use api::{
    ClassifyRequest, ClassifyResponse, CreateTaskRequest, CreateTaskResponse, PriorityRequest,
    PriorityResponse, SuggestRequest, SuggestResponse, SummarizeRequest, SummarizeResponse,
};
pub use engine::{EngineKind, GenerationParams, TextEngine};
pub use error::{EngineError, Error, Result};
pub use task::{Category, ExtractedTask, Priority, TaskStatus, TaskSummary};
