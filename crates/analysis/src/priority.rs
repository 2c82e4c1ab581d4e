//! Multi-factor priority scoring.
//!
//! Four named factors are scored independently, combined by a fixed weight
//! table, and mapped through strict-`>` thresholds to a label. Two lighter
//! variants share the same thresholds: a two-signal mean (task creation)
//! and a single combined statement (next-task suggestion).

use tasklens_core::engine::TextEngine;
use tasklens_core::error::EngineError;
use tasklens_core::task::Priority;

/// One named semantic signal contributing to a priority decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    Urgency,
    Importance,
    Dependency,
    Effort,
}

impl Factor {
    /// Fixed evaluation order. The weights sum to 1.0 by construction —
    /// an invariant of this table, pinned by a test rather than checked at
    /// runtime.
    pub const ALL: [Factor; 4] = [
        Factor::Urgency,
        Factor::Importance,
        Factor::Dependency,
        Factor::Effort,
    ];

    /// The question posed to the scoring engine for this factor; the task
    /// text is appended after a single space.
    pub fn question(&self) -> &'static str {
        match self {
            Factor::Urgency => "Does this task have a deadline or time constraint?",
            Factor::Importance => "Is this task important for the project or business?",
            Factor::Dependency => "Do other tasks depend on this task?",
            Factor::Effort => "Does this task require significant effort or resources?",
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Factor::Urgency => 0.4,
            Factor::Importance => 0.3,
            Factor::Dependency => 0.2,
            Factor::Effort => 0.1,
        }
    }
}

/// Factor scores for one request. Produced fresh per request, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScores {
    pub urgency: f64,
    pub importance: f64,
    pub dependency: f64,
    pub effort: f64,
}

impl FactorScores {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Urgency => self.urgency,
            Factor::Importance => self.importance,
            Factor::Dependency => self.dependency,
            Factor::Effort => self.effort,
        }
    }

    /// Weighted combination of all factors.
    pub fn weighted_sum(&self) -> f64 {
        Factor::ALL
            .iter()
            .map(|factor| self.get(*factor) * factor.weight())
            .sum()
    }
}

/// Map a combined score to a label.
///
/// Both boundaries are strict `>`: exactly 0.7 is Medium, exactly 0.4 is
/// Low.
pub fn label_for(score: f64) -> Priority {
    if score > 0.7 {
        Priority::High
    } else if score > 0.4 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Statement used for the urgency signal; task text appended after a space.
pub const URGENCY_STATEMENT: &str = "Is this task urgent?";

/// Statement used for the importance signal.
pub const IMPORTANCE_STATEMENT: &str = "Is this task important?";

/// Score the urgency signal for `text`.
pub async fn urgency_score(engine: &dyn TextEngine, text: &str) -> Result<f64, EngineError> {
    engine.score(&format!("{URGENCY_STATEMENT} {text}")).await
}

/// Score the importance signal for `text`.
pub async fn importance_score(engine: &dyn TextEngine, text: &str) -> Result<f64, EngineError> {
    engine.score(&format!("{IMPORTANCE_STATEMENT} {text}")).await
}

/// Score all four factors, one engine query each, in fixed order. A failure
/// at any factor aborts the whole scoring operation; there is no retry.
pub async fn score_factors(
    engine: &dyn TextEngine,
    text: &str,
) -> Result<FactorScores, EngineError> {
    let mut scores = [0.0f64; 4];
    for (slot, factor) in scores.iter_mut().zip(Factor::ALL) {
        *slot = engine
            .score(&format!("{} {}", factor.question(), text))
            .await?;
    }

    Ok(FactorScores {
        urgency: scores[0],
        importance: scores[1],
        dependency: scores[2],
        effort: scores[3],
    })
}

/// Full multi-factor priority for `text`.
pub async fn score_priority(
    engine: &dyn TextEngine,
    text: &str,
) -> Result<Priority, EngineError> {
    let factors = score_factors(engine, text).await?;
    Ok(label_for(factors.weighted_sum()))
}

/// Two-signal priority used by task creation: mean of the urgency and
/// importance scores through the standard thresholds.
pub async fn quick_priority(engine: &dyn TextEngine, text: &str) -> Result<Priority, EngineError> {
    let urgency = urgency_score(engine, text).await?;
    let importance = importance_score(engine, text).await?;
    Ok(label_for((urgency + importance) / 2.0))
}

/// Single-signal priority used for generated suggestions: one combined
/// urgency/importance statement through the standard thresholds.
pub async fn combined_priority(
    engine: &dyn TextEngine,
    text: &str,
) -> Result<Priority, EngineError> {
    let score = engine
        .score(&format!("How urgent and important is this task: {text}"))
        .await?;
    Ok(label_for(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingEngine, ScriptedEngine};
    use tasklens_core::engine::EngineKind;

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = Factor::ALL.iter().map(|f| f.weight()).sum();
        assert!((total - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn saturated_scores_hit_the_extremes() {
        let all_high = FactorScores {
            urgency: 1.0,
            importance: 1.0,
            dependency: 1.0,
            effort: 1.0,
        };
        assert!((all_high.weighted_sum() - 1.0).abs() < 1e-6);
        assert_eq!(label_for(all_high.weighted_sum()), Priority::High);

        let all_low = FactorScores {
            urgency: 0.0,
            importance: 0.0,
            dependency: 0.0,
            effort: 0.0,
        };
        assert_eq!(all_low.weighted_sum(), 0.0);
        assert_eq!(label_for(all_low.weighted_sum()), Priority::Low);
    }

    #[test]
    fn thresholds_are_strict() {
        // Exactly 0.7 is NOT High, exactly 0.4 is NOT Medium.
        assert_eq!(label_for(0.7), Priority::Medium);
        assert_eq!(label_for(0.4), Priority::Low);
        assert_eq!(label_for(0.700_1), Priority::High);
        assert_eq!(label_for(0.400_1), Priority::Medium);
        assert_eq!(label_for(0.0), Priority::Low);
        assert_eq!(label_for(1.0), Priority::High);
    }

    #[tokio::test]
    async fn factors_are_queried_in_order_with_question_prefixes() {
        let engine = ScriptedEngine::scorer(&[
            ("deadline or time constraint", 0.9),
            ("important for the project", 0.8),
            ("depend on this task", 0.5),
            ("significant effort", 0.3),
        ]);

        let factors = score_factors(&engine, "Fix outage\nCustomers affected now")
            .await
            .unwrap();

        assert_eq!(factors.urgency, 0.9);
        assert_eq!(factors.importance, 0.8);
        assert_eq!(factors.dependency, 0.5);
        assert_eq!(factors.effort, 0.3);
        assert_eq!(engine.calls(), 4);

        let prompts = engine.prompts();
        assert!(prompts[0].starts_with("Does this task have a deadline"));
        assert!(prompts[3].starts_with("Does this task require significant effort"));
        assert!(prompts[0].ends_with("Fix outage\nCustomers affected now"));
    }

    #[tokio::test]
    async fn weighted_sum_end_to_end() {
        // 0.9*0.4 + 0.8*0.3 + 0.5*0.2 + 0.3*0.1 = 0.73 → High
        let engine = ScriptedEngine::scorer(&[
            ("deadline or time constraint", 0.9),
            ("important for the project", 0.8),
            ("depend on this task", 0.5),
            ("significant effort", 0.3),
        ]);

        let priority = score_priority(&engine, "Fix outage").await.unwrap();
        assert_eq!(priority, Priority::High);
    }

    #[tokio::test]
    async fn quick_priority_is_the_two_signal_mean() {
        // (0.9 + 0.5) / 2 = 0.7 → Medium (strict threshold)
        let engine = ScriptedEngine::scorer(&[
            ("Is this task urgent?", 0.9),
            ("Is this task important?", 0.5),
        ]);
        assert_eq!(quick_priority(&engine, "text").await.unwrap(), Priority::Medium);
        assert_eq!(engine.calls(), 2);
    }

    #[tokio::test]
    async fn combined_priority_uses_one_statement() {
        let engine = ScriptedEngine::scorer(&[("How urgent and important", 0.75)]);
        assert_eq!(combined_priority(&engine, "text").await.unwrap(), Priority::High);
        assert_eq!(engine.calls(), 1);
    }

    #[tokio::test]
    async fn factor_failure_aborts_scoring() {
        let engine = FailingEngine::new(EngineKind::TextClassification, "engine down");
        let err = score_factors(&engine, "text").await.unwrap_err();
        assert!(err.to_string().contains("engine down"));
    }
}
