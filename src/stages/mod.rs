pub mod classify;
pub mod suggest;
pub mod summarize;

pub use classify::*;
pub use suggest::*;
pub use summarize::*;

use std::fmt;

/// Pipeline position, used in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    Summarized,
    Classified,
    Suggested,
    Done,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Start => "start",
            PipelineState::Summarized => "summarized",
            PipelineState::Classified => "classified",
            PipelineState::Suggested => "suggested",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}
