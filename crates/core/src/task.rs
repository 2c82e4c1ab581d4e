//! Task domain types — decision labels, task summaries, extracted tasks.
//!
//! The label enums serialize to their Japanese wire forms (高/中/低,
//! 今すぐ/次に/いつか) — the wire contract predates this implementation and
//! is kept bit-exact.

use serde::{Deserialize, Serialize};

/// Priority label. Ordinal — comparison is by rank, so `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "低")]
    Low,
    #[serde(rename = "中")]
    Medium,
    #[serde(rename = "高")]
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "高",
            Priority::Medium => "中",
            Priority::Low => "低",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eisenhower-style category. Mutually exclusive; chosen by ordered rules
/// (urgency first), never by parallel evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "今すぐ")]
    Now,
    #[serde(rename = "次に")]
    Next,
    #[serde(rename = "いつか")]
    Someday,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Now => "今すぐ",
            Category::Next => "次に",
            Category::Someday => "いつか",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status of an existing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    OnHold,
}

impl TaskStatus {
    /// Japanese display label used when formatting task-list context.
    pub fn label_ja(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "未着手",
            TaskStatus::InProgress => "進行中",
            TaskStatus::Completed => "完了",
            TaskStatus::OnHold => "保留中",
        }
    }
}

/// An existing task as supplied in a suggestion request. Read-only input —
/// never mutated by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSummary {
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    /// Free-form priority string, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// Structured fields parsed out of generated text. Derived, ephemeral —
/// produced once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTask {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
