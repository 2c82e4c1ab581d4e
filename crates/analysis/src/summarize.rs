//! Summary generation and keyword selection.
//!
//! The summary itself is one generation call. Keywords are chosen by
//! scoring every word of the text in context and keeping the top five —
//! expensive (one engine query per word) but strictly sequential and
//! deterministic given the engine's scores.

use tasklens_core::engine::TextEngine;
use tasklens_core::error::EngineError;

/// Words shorter than this are never keyword candidates.
const MIN_KEYWORD_CHARS: usize = 2;

/// How many keywords to keep.
const KEYWORD_LIMIT: usize = 5;

/// Summarize `text` with one generation call.
pub async fn summarize(engine: &dyn TextEngine, text: &str) -> Result<String, EngineError> {
    engine.generate(text).await
}

/// Score every candidate word of `text` in context and keep the top
/// [`KEYWORD_LIMIT`] by score, descending. The sort is stable, so words
/// with equal scores keep their order of appearance.
pub async fn extract_keywords(
    engine: &dyn TextEngine,
    text: &str,
) -> Result<Vec<String>, EngineError> {
    let mut scored: Vec<(&str, f64)> = Vec::new();

    for word in text.split_whitespace() {
        if word.chars().count() < MIN_KEYWORD_CHARS {
            continue;
        }
        let score = engine
            .score(&format!("Is '{word}' important in this context: {text}"))
            .await?;
        scored.push((word, score));
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(KEYWORD_LIMIT);

    Ok(scored.into_iter().map(|(word, _)| word.to_string()).collect())
}
