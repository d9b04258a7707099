use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BackendError;

/// A text-completion service: prompt in, response text out
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send a prompt and return the model's text response
    async fn complete(&self, prompt: &str) -> Result<String, BackendError>;

    /// Identifier recorded in results (usually the model name)
    fn model_id(&self) -> &str;
}

/// The backend an analyzer is bound to, chosen once at construction
#[derive(Clone)]
pub enum Backend {
    Remote(Arc<dyn CompletionBackend>),
    Heuristic,
}

impl Backend {
    pub fn is_heuristic(&self) -> bool {
        matches!(self, Backend::Heuristic)
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Remote(backend) => f.debug_tuple("Remote").field(&backend.model_id()).finish(),
            Backend::Heuristic => f.write_str("Heuristic"),
        }
    }
}
