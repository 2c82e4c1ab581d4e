//! Dual-signal categorization.
//!
//! Maps the urgency and importance signals onto a mutually exclusive
//! category by ordered rules — urgency is checked first and dominates
//! importance even when importance scores higher. The order is load-bearing
//! and must not be reordered.

use tasklens_core::engine::TextEngine;
use tasklens_core::error::EngineError;
use tasklens_core::task::Category;

use crate::priority::{importance_score, urgency_score};

/// Signal threshold above which a category rule fires (strict `>`).
const SIGNAL_THRESHOLD: f64 = 0.7;

/// Categorize `text`, returning the category and a confidence in it.
///
/// Rules, first match wins:
/// 1. urgency `u > 0.7` → `(Now, u)` — importance is never queried.
/// 2. importance `i > 0.7` → `(Next, i)`.
/// 3. otherwise → `(Someday, max(1-u, 1-i))` — confidence in Someday is
///    the stronger of the two non-signals, inverted.
pub async fn categorize(
    engine: &dyn TextEngine,
    text: &str,
) -> Result<(Category, f64), EngineError> {
    let urgency = urgency_score(engine, text).await?;
    if urgency > SIGNAL_THRESHOLD {
        return Ok((Category::Now, urgency));
    }

    let importance = importance_score(engine, text).await?;
    if importance > SIGNAL_THRESHOLD {
        return Ok((Category::Next, importance));
    }

    Ok((
        Category::Someday,
        (1.0 - urgency).max(1.0 - importance),
    ))
}
