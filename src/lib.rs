pub mod batch;
pub mod error;
pub mod heuristics;
pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use batch::{analyze_batch, BatchEntry, CallInput};
pub use error::{AnalysisError, BackendError, StageError};
pub use io::{
    call_id_for, list_transcript_files, read_transcript_file, render_report, write_result_json,
    BatchFailure, BatchReport,
};
pub use llm::{Backend, CompletionBackend, Provider, RemoteClient, RemoteConfig};
pub use models::{AnalysisResult, Classification, Intent, Outcome, Transcript, Utterance};
pub use pipeline::{Analyzer, AnalyzerConfig};
