use tracing::{info, warn};

use crate::error::StageError;
use crate::heuristics;
use crate::llm::{build_classification_prompt, build_repair_prompt, parse_classification, CompletionBackend};
use crate::models::{Classification, Transcript};

/// How the classification was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    /// First model answer parsed cleanly
    Model,
    /// Model answer parsed after the repair request
    Repaired,
    /// Both attempts failed; heuristic classifier used
    HeuristicFallback,
}

#[derive(Debug, Clone)]
pub struct ClassifyResult {
    pub classification: Classification,
    pub source: ClassificationSource,
}

/// Stage 2: classify with the model, one repair attempt, then heuristics
///
/// Never fails: a best-effort classification is always returned.
pub async fn classify(
    backend: &dyn CompletionBackend,
    transcript: &Transcript,
    transcript_text: &str,
    summary: &str,
) -> ClassifyResult {
    let prompt = build_classification_prompt(transcript_text, summary);

    let previous = match attempt(backend, &prompt).await {
        Ok(classification) => {
            return ClassifyResult {
                classification,
                source: ClassificationSource::Model,
            };
        }
        Err((error, previous)) => {
            warn!("Classification attempt failed: {}; requesting repair", error);
            previous
        }
    };

    let repair = build_repair_prompt(transcript_text, summary, &previous);
    match attempt(backend, &repair).await {
        Ok(classification) => {
            info!("Classification repaired on retry");
            ClassifyResult {
                classification,
                source: ClassificationSource::Repaired,
            }
        }
        Err((error, _)) => {
            warn!(
                "Classification repair failed: {}; using heuristic classifier",
                error
            );
            ClassifyResult {
                classification: heuristics::classify(transcript),
                source: ClassificationSource::HeuristicFallback,
            }
        }
    }
}

/// One request plus parse; on failure returns the error and the raw answer
async fn attempt(
    backend: &dyn CompletionBackend,
    prompt: &str,
) -> Result<Classification, (StageError, String)> {
    let response = backend
        .complete(prompt)
        .await
        .map_err(|e| (StageError::from(e), String::from("(no response: request failed)")))?;

    parse_classification(&response).map_err(|e| (e, response))
}
