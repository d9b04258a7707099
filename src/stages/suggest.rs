use tracing::{debug, warn};

use crate::heuristics::{improvements_for, normalize_improvements};
use crate::llm::{build_improvement_prompt, parse_suggestions, CompletionBackend};
use crate::models::Classification;

#[derive(Debug, Clone)]
pub struct SuggestResult {
    /// Always 2-3 entries
    pub improvements: Vec<String>,
    /// Canned suggestions were used in place of, or to pad, the model's
    pub padded: bool,
}

/// Stage 3: ask the model for improvement suggestions
///
/// The list is truncated to three and padded with canned suggestions for the
/// outcome when the model gives fewer than two or the request fails.
pub async fn suggest(
    backend: &dyn CompletionBackend,
    summary: &str,
    classification: &Classification,
) -> SuggestResult {
    let prompt = build_improvement_prompt(summary, classification);

    let suggestions = match backend.complete(&prompt).await {
        Ok(response) => parse_suggestions(&response),
        Err(e) => {
            warn!("Improvement request failed: {}; using canned suggestions", e);
            return SuggestResult {
                improvements: improvements_for(classification.outcome),
                padded: true,
            };
        }
    };

    let parsed = suggestions.len();
    let improvements = normalize_improvements(suggestions, classification.outcome);
    let padded = parsed < 2;
    if padded {
        debug!(
            "Model gave {} suggestion(s); padded to {}",
            parsed,
            improvements.len()
        );
    }

    SuggestResult {
        improvements,
        padded,
    }
}
