use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{AnalysisResult, Outcome};

/// A call that could not be analyzed
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub call_id: String,
    pub error: String,
}

/// Envelope for a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub outcome_counts: BTreeMap<Outcome, usize>,
    pub results: Vec<AnalysisResult>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn new(model: String, results: Vec<AnalysisResult>, failures: Vec<BatchFailure>) -> Self {
        let mut outcome_counts = BTreeMap::new();
        for result in &results {
            *outcome_counts.entry(result.outcome()).or_insert(0) += 1;
        }

        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            model,
            outcome_counts,
            results,
            failures,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }
}

/// Write a single analysis result as pretty JSON
pub fn write_result_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    write_json(result, path)
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, value).context("Failed to write JSON")?;
    Ok(())
}

/// Console report for one call
pub fn render_report(result: &AnalysisResult) -> String {
    let rule = "=".repeat(60);
    let mut output = String::new();

    output.push_str(&format!("{}\n", rule));
    output.push_str(&format!("Call ID: {}\n", result.call_id()));
    output.push_str(&format!("Model: {}\n", result.model()));
    output.push_str(&format!("{}\n", "-".repeat(60)));
    output.push_str(&format!("Intent: {}\n", result.intent()));
    output.push_str(&format!("Outcome: {}\n", result.outcome()));
    output.push_str(&format!("Rationale: {}\n\n", result.rationale()));

    output.push_str("Summary:\n");
    for line in result.summary().lines() {
        output.push_str(&format!("  {}\n", line));
    }
    output.push('\n');

    output.push_str("Improvement Suggestions:\n");
    for (i, suggestion) in result.improvements().iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
    }
    output.push_str(&format!("{}\n", rule));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, Intent};

    fn sample() -> AnalysisResult {
        AnalysisResult::new(
            "call7".to_string(),
            "heuristic".to_string(),
            Classification {
                intent: Intent::ReturnStatus,
                outcome: Outcome::EscalatedPartiallySuccessful,
                rationale: "Link shared, then transferred.".to_string(),
            },
            "- line one\n- line two".to_string(),
            vec!["First.".to_string(), "Second.".to_string()],
        )
    }

    #[test]
    fn test_render_report() {
        let report = render_report(&sample());
        assert!(report.contains("Call ID: call7"));
        assert!(report.contains("Outcome: Escalated - Partially Successful"));
        assert!(report.contains("  - line two\n"));
        assert!(report.contains("  2. Second.\n"));
    }

    #[test]
    fn test_write_result_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("call7.json");
        write_result_json(&sample(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["call_id"], "call7");
        assert_eq!(value["outcome"], "Escalated - Partially Successful");
    }

    #[test]
    fn test_batch_report_counts() {
        let report = BatchReport::new(
            "heuristic".to_string(),
            vec![sample(), sample()],
            vec![BatchFailure {
                call_id: "empty".to_string(),
                error: "invalid transcript: transcript is empty".to_string(),
            }],
        );

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["outcome_counts"]["Escalated - Partially Successful"], 2);
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["failures"][0]["call_id"], "empty");
    }
}
