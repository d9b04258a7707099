use thiserror::Error;

/// Failures of a single completion request
#[derive(Debug, Error)]
pub enum BackendError {
    /// No credential configured; the heuristic path applies
    #[error("no backend credential configured")]
    Unavailable,

    #[error("request to model backend failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model backend returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model backend returned no text content")]
    EmptyResponse,
}

/// Stage-level failures inside the pipeline
///
/// The analyzer absorbs every variant and degrades to the heuristic path.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("summarization failed: {0}")]
    Summarization(#[source] BackendError),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors surfaced to callers of the analyzer
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid transcript: {0}")]
    InvalidTranscript(String),

    /// Only produced by the batch worker pool when a task panics
    #[error("analysis aborted: {0}")]
    Aborted(String),
}
