//! Request and response records for the five analysis operations.
//!
//! Every request field carries `#[serde(default)]`: a missing field
//! deserializes to its empty value and is then rejected by the
//! orchestrator's validation with a specific message — absence is a
//! validation error, never a crash. Response field order matches the wire
//! contract.

use crate::task::{Category, Priority};
use serde::{Deserialize, Serialize};

/// Input to the `priority` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityResponse {
    pub priority: Priority,
}

/// Input to the `classify` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub category: Category,
    /// Rounded to 2 decimal places at the orchestrator boundary.
    pub confidence: f64,
}

/// Input to the `create` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub tags: Vec<String>,
}

/// Input to the `summarize` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub keywords: Vec<String>,
}

/// Input to the `suggest` operation.
///
/// `tasks` stays a raw JSON value so the orchestrator can distinguish
/// "absent" (treated as an empty list) from "present but not an array"
/// (the `Tasks must be an array` validation error) before converting
/// elements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub tasks: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let req: PriorityRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_empty());
        assert!(req.content.is_empty());

        let req: CreateTaskRequest = serde_json::from_str("{}").unwrap();
        assert!(req.text.is_empty());
    }

    #[test]
    fn suggest_tasks_defaults_to_null() {
        let req: SuggestRequest = serde_json::from_str("{}").unwrap();
        assert!(req.tasks.is_null());

        let req: SuggestRequest =
            serde_json::from_str(r#"{"tasks": [{"title": "a"}]}"#).unwrap();
        assert!(req.tasks.is_array());

        // A wrong shape still parses here — the orchestrator validates it.
        let req: SuggestRequest = serde_json::from_str(r#"{"tasks": "nope"}"#).unwrap();
        assert!(req.tasks.is_string());
    }

    #[test]
    fn classify_response_field_order() {
        let resp = ClassifyResponse {
            category: Category::Now,
            confidence: 0.85,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"category":"今すぐ","confidence":0.85}"#);
    }

    #[test]
    fn create_response_field_order() {
        let resp = CreateTaskResponse {
            title: "t".into(),
            description: "d".into(),
            priority: Priority::Low,
            tags: vec!["a".into()],
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(
            json,
            r#"{"title":"t","description":"d","priority":"低","tags":["a"]}"#
        );
    }
}
