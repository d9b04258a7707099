use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::AnalysisError;
use crate::models::{AnalysisResult, Transcript};
use crate::pipeline::Analyzer;

/// One call queued for batch analysis
#[derive(Debug, Clone)]
pub struct CallInput {
    pub call_id: String,
    pub transcript: Transcript,
}

/// Per-call batch result
#[derive(Debug)]
pub struct BatchEntry {
    pub call_id: String,
    pub result: Result<AnalysisResult, AnalysisError>,
}

/// Analyze many calls with at most `workers` pipelines in flight
///
/// Each worker runs one call's three stages to completion before the next
/// call starts. Entries come back in input order, one per input; a task that
/// panics yields an `Aborted` entry for its call.
pub async fn analyze_batch(
    analyzer: &Analyzer,
    inputs: Vec<CallInput>,
    workers: usize,
) -> Vec<BatchEntry> {
    let workers = workers.max(1);
    let total = inputs.len();
    info!("Analyzing {} calls with {} workers", total, workers);

    let call_ids: Vec<String> = inputs.iter().map(|input| input.call_id.clone()).collect();
    let mut slots: Vec<Option<BatchEntry>> = (0..total).map(|_| None).collect();
    let mut tasks = JoinSet::new();

    for (index, input) in inputs.into_iter().enumerate() {
        if tasks.len() >= workers {
            if let Some(joined) = tasks.join_next().await {
                store(&mut slots, joined);
            }
        }

        let analyzer = analyzer.clone();
        tasks.spawn(async move {
            let result = analyzer
                .analyze_transcript(&input.call_id, &input.transcript)
                .await;
            (
                index,
                BatchEntry {
                    call_id: input.call_id,
                    result,
                },
            )
        });
    }

    while let Some(joined) = tasks.join_next().await {
        store(&mut slots, joined);
    }

    slots
        .into_iter()
        .zip(call_ids)
        .map(|(slot, call_id)| {
            slot.unwrap_or_else(|| BatchEntry {
                result: Err(AnalysisError::Aborted(format!(
                    "analysis task for {} did not complete",
                    call_id
                ))),
                call_id,
            })
        })
        .collect()
}

fn store(
    slots: &mut [Option<BatchEntry>],
    joined: Result<(usize, BatchEntry), tokio::task::JoinError>,
) {
    match joined {
        Ok((index, entry)) => slots[index] = Some(entry),
        Err(e) => warn!("Analysis task failed: {}", e),
    }
}
