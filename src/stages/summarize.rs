use tracing::debug;

use crate::error::{BackendError, StageError};
use crate::llm::{build_summary_prompt, CompletionBackend};

/// Stage 1: ask the model for a call summary
///
/// A backend failure or a blank summary is a summarization error.
pub async fn summarize(
    backend: &dyn CompletionBackend,
    transcript_text: &str,
) -> Result<String, StageError> {
    let prompt = build_summary_prompt(transcript_text);
    let summary = backend
        .complete(&prompt)
        .await
        .map_err(StageError::Summarization)?;

    let summary = summary.trim().to_string();
    if summary.is_empty() {
        return Err(StageError::Summarization(BackendError::EmptyResponse));
    }

    debug!("Summary: {} chars", summary.len());
    Ok(summary)
}
