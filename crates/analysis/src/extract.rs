//! Structured text extraction.
//!
//! Two independent sub-algorithms:
//! - field extraction from generated text via ordered line-prefix matching
//!   (generation output is never schema-bound, so parsing is defensive);
//! - date-token extraction from raw input via ordered pattern precedence,
//!   returning the matched substring verbatim — tokens are never parsed
//!   into date values.

use std::sync::LazyLock;

use regex_lite::Regex;
use tasklens_core::engine::TextEngine;
use tasklens_core::error::EngineError;
use tasklens_core::task::ExtractedTask;

const TITLE_PREFIX: &str = "Title:";
const DESCRIPTION_PREFIX: &str = "Description:";
const TAGS_PREFIX: &str = "Tags:";

/// Date patterns in precedence order: a fully-specified date beats a
/// partial date beats a relative token, regardless of position in the text.
static DATE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"\d{4}[-/年]\d{1,2}[-/月]\d{1,2}日?").expect("valid full-date pattern"),
        Regex::new(r"\d{1,2}[-/月]\d{1,2}日?").expect("valid partial-date pattern"),
        Regex::new("来週|今週|明日|明後日|今日|今月末|今週末|来月").expect("valid relative-date pattern"),
    ]
});

/// Build the extraction prompt sent to the generation engine.
pub fn extraction_prompt(text: &str) -> String {
    format!(
        "\nExtract task information from the following text:\n{text}\n\nFormat:\nTitle: [task title]\nDescription: [task description]\nTags: [comma-separated tags]\n"
    )
}

/// Parse `Title:` / `Description:` / `Tags:` fields out of generated text.
///
/// Prefixes are case-sensitive, matched at line start only. Tags split on
/// commas with empty tokens dropped. Lines matching no known prefix are
/// silently ignored; a prefix that never appears leaves its field at the
/// empty default. A repeated prefix overwrites the earlier value.
pub fn parse_task_fields(generated: &str) -> ExtractedTask {
    let mut task = ExtractedTask::default();

    for line in generated.split('\n') {
        if let Some(rest) = line.strip_prefix(TITLE_PREFIX) {
            task.title = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(DESCRIPTION_PREFIX) {
            task.description = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(TAGS_PREFIX) {
            task.tags = rest
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(String::from)
                .collect();
        }
    }

    task
}

/// Extract a due-date token from raw input text.
///
/// The first pattern in precedence order that matches anywhere wins; its
/// matched substring is returned verbatim. No match is an absent optional
/// field, not an error.
pub fn extract_date(text: &str) -> Option<&str> {
    DATE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(text).map(|m| m.as_str()))
}

/// Generate task fields for `text`: one engine call, then defensive parsing.
pub async fn extract_task_info(
    engine: &dyn TextEngine,
    text: &str,
) -> Result<ExtractedTask, EngineError> {
    let generated = engine.generate(&extraction_prompt(text)).await?;
    Ok(parse_task_fields(&generated))
}
