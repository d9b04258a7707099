use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::AnalysisError;
use crate::heuristics::{self, improvements_for, HEURISTIC_MODEL};
use crate::llm::{Backend, CompletionBackend, Provider, RemoteClient, RemoteConfig};
use crate::models::{AnalysisResult, Transcript};
use crate::stages::{classify, suggest, summarize, ClassificationSource, PipelineState};

/// Analyzer configuration, read once at construction
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Remote model settings; `None` when no credential is configured
    pub remote: Option<RemoteConfig>,
    /// Use the heuristic path even when a credential is present
    pub force_heuristic: bool,
}

impl AnalyzerConfig {
    pub fn heuristic() -> Self {
        Self {
            remote: None,
            force_heuristic: true,
        }
    }

    pub fn remote(config: RemoteConfig) -> Self {
        Self {
            remote: Some(config),
            force_heuristic: false,
        }
    }

    /// Build from environment variables
    ///
    /// Reads the provider's API key and base URL plus `CALLQA_FORCE_HEURISTIC`.
    pub fn from_env(provider: Provider, model: Option<String>) -> Self {
        let force_heuristic = std::env::var("CALLQA_FORCE_HEURISTIC")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            remote: RemoteConfig::from_env(provider, model).ok(),
            force_heuristic,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Runs the summarize → classify → suggest pipeline against one backend
///
/// The backend is chosen once in [`Analyzer::new`] and never switched for a
/// single call, apart from the documented classification fallback. Cloning is
/// cheap, so one analyzer can serve many concurrent calls.
#[derive(Debug, Clone)]
pub struct Analyzer {
    backend: Backend,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let backend = match config.remote {
            Some(remote) if !config.force_heuristic && remote.has_credential() => {
                match RemoteClient::new(remote) {
                    Ok(client) => Backend::Remote(Arc::new(client)),
                    Err(e) => {
                        warn!("Remote backend unavailable ({}); using heuristics", e);
                        Backend::Heuristic
                    }
                }
            }
            Some(_) if config.force_heuristic => {
                info!("Heuristic mode forced by configuration");
                Backend::Heuristic
            }
            _ => {
                info!("No model credential configured; using heuristics");
                Backend::Heuristic
            }
        };

        Self { backend }
    }

    pub fn heuristic() -> Self {
        Self {
            backend: Backend::Heuristic,
        }
    }

    /// Bind to an arbitrary completion backend
    pub fn with_backend(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend: Backend::Remote(backend),
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Model identifier for results produced without fallback
    pub fn model_id(&self) -> &str {
        match &self.backend {
            Backend::Remote(backend) => backend.model_id(),
            Backend::Heuristic => HEURISTIC_MODEL,
        }
    }

    /// Analyze raw speaker-labelled transcript text
    pub async fn analyze(&self, call_id: &str, raw: &str) -> Result<AnalysisResult, AnalysisError> {
        if raw.trim().is_empty() {
            return Err(AnalysisError::InvalidTranscript(
                "transcript is empty".to_string(),
            ));
        }
        self.analyze_transcript(call_id, &Transcript::parse(raw))
            .await
    }

    /// Analyze an already parsed transcript
    ///
    /// Only an empty transcript is an error; backend failures degrade to the
    /// heuristic path and still produce a complete result.
    pub async fn analyze_transcript(
        &self,
        call_id: &str,
        transcript: &Transcript,
    ) -> Result<AnalysisResult, AnalysisError> {
        if transcript.is_empty() {
            return Err(AnalysisError::InvalidTranscript(
                "transcript has no utterances".to_string(),
            ));
        }

        let result = match &self.backend {
            Backend::Heuristic => analyze_heuristic(call_id, transcript),
            Backend::Remote(backend) => analyze_remote(backend.as_ref(), call_id, transcript).await,
        };

        info!(
            "Call {}: {} / {} ({})",
            result.call_id(),
            result.intent(),
            result.outcome(),
            result.model()
        );
        Ok(result)
    }
}

fn analyze_heuristic(call_id: &str, transcript: &Transcript) -> AnalysisResult {
    debug!("Call {}: {} (heuristic pipeline)", call_id, PipelineState::Start);

    let analysis = heuristics::analyze(transcript);
    let summary = analysis.summary(transcript.len());
    debug!("Call {}: {}", call_id, PipelineState::Summarized);

    let classification = analysis.classification();
    debug!("Call {}: {}", call_id, PipelineState::Classified);

    let improvements = improvements_for(classification.outcome);
    debug!("Call {}: {}", call_id, PipelineState::Suggested);

    AnalysisResult::new(
        call_id.to_string(),
        HEURISTIC_MODEL.to_string(),
        classification,
        summary,
        improvements,
    )
}

async fn analyze_remote(
    backend: &dyn CompletionBackend,
    call_id: &str,
    transcript: &Transcript,
) -> AnalysisResult {
    debug!(
        "Call {}: {} (remote pipeline with {})",
        call_id,
        PipelineState::Start,
        backend.model_id()
    );
    let transcript_text = transcript.to_text();

    let summary = match summarize(backend, &transcript_text).await {
        Ok(summary) => summary,
        Err(e) => {
            warn!(
                "Call {}: {} at {}; analyzing with heuristics instead",
                call_id,
                e,
                PipelineState::Failed
            );
            return analyze_heuristic(call_id, transcript);
        }
    };
    debug!("Call {}: {}", call_id, PipelineState::Summarized);

    let classified = classify(backend, transcript, &transcript_text, &summary).await;
    debug!(
        "Call {}: {} ({:?})",
        call_id,
        PipelineState::Classified,
        classified.source
    );

    let suggested = suggest(backend, &summary, &classified.classification).await;
    debug!(
        "Call {}: {} (padded: {})",
        call_id,
        PipelineState::Suggested,
        suggested.padded
    );

    let model = match classified.source {
        ClassificationSource::HeuristicFallback => {
            format!("{}+{}", backend.model_id(), HEURISTIC_MODEL)
        }
        ClassificationSource::Model | ClassificationSource::Repaired => {
            backend.model_id().to_string()
        }
    };

    debug!("Call {}: {}", call_id, PipelineState::Done);
    AnalysisResult::new(
        call_id.to_string(),
        model,
        classified.classification,
        summary,
        suggested.improvements,
    )
}
