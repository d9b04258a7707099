use std::fmt;

use serde::{Deserialize, Serialize};

/// Customer intent, a closed set with an explicit unknown fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    OrderStatus,
    ReturnStatus,
    ReturnRefundIssue,
    ProductQuestion,
    MembershipQuestion,
    Unknown,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::OrderStatus,
        Intent::ReturnStatus,
        Intent::ReturnRefundIssue,
        Intent::ProductQuestion,
        Intent::MembershipQuestion,
        Intent::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::OrderStatus => "order_status",
            Intent::ReturnStatus => "return_status",
            Intent::ReturnRefundIssue => "return_refund_issue",
            Intent::ProductQuestion => "product_question",
            Intent::MembershipQuestion => "membership_question",
            Intent::Unknown => "unknown",
        }
    }

    /// Map a free-form label ("Order status", "return-status") onto the closed set
    ///
    /// Labels outside the set become `Unknown`, never an error.
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        let normalized = normalized.trim_matches('_');

        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == normalized)
            .unwrap_or(Intent::Unknown)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call outcome category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "Automated - Successful")]
    AutomatedSuccessful,
    #[serde(rename = "Automated - Partially Successful")]
    AutomatedPartiallySuccessful,
    #[serde(rename = "Escalated - Partially Successful")]
    EscalatedPartiallySuccessful,
    #[serde(rename = "Escalated - Unsuccessful")]
    EscalatedUnsuccessful,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [
        Outcome::AutomatedSuccessful,
        Outcome::AutomatedPartiallySuccessful,
        Outcome::EscalatedPartiallySuccessful,
        Outcome::EscalatedUnsuccessful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::AutomatedSuccessful => "Automated - Successful",
            Outcome::AutomatedPartiallySuccessful => "Automated - Partially Successful",
            Outcome::EscalatedPartiallySuccessful => "Escalated - Partially Successful",
            Outcome::EscalatedUnsuccessful => "Escalated - Unsuccessful",
        }
    }

    pub fn is_escalated(&self) -> bool {
        matches!(
            self,
            Outcome::EscalatedPartiallySuccessful | Outcome::EscalatedUnsuccessful
        )
    }

    /// Parse a model-supplied category, tolerating case and dash variants
    pub fn parse_loose(value: &str) -> Option<Self> {
        let normalized = normalize_category(value);
        Outcome::ALL
            .into_iter()
            .find(|outcome| normalize_category(outcome.as_str()) == normalized)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase, unify dashes, and collapse whitespace
fn normalize_category(value: &str) -> String {
    value
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '.')
        .to_lowercase()
        .replace(['–', '—', '‒', '−'], "-")
        .replace('-', " - ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classification stage output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub outcome: Outcome,
    pub rationale: String,
}

/// Final analysis of one call
///
/// Field names are part of the downstream JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    call_id: String,
    model: String,
    intent: Intent,
    outcome: Outcome,
    rationale: String,
    summary: String,
    improvements: Vec<String>,
}

impl AnalysisResult {
    pub(crate) fn new(
        call_id: String,
        model: String,
        classification: Classification,
        summary: String,
        improvements: Vec<String>,
    ) -> Self {
        debug_assert!((2..=3).contains(&improvements.len()));
        debug_assert!(!classification.rationale.trim().is_empty());

        Self {
            call_id,
            model,
            intent: classification.intent,
            outcome: classification.outcome,
            rationale: classification.rationale,
            summary,
            improvements,
        }
    }

    pub fn call_id(&self) -> &str {
        &self.call_id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn improvements(&self) -> &[String] {
        &self.improvements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_exact_strings() {
        let json = serde_json::to_string(&Outcome::EscalatedPartiallySuccessful).unwrap();
        assert_eq!(json, "\"Escalated - Partially Successful\"");

        let parsed: Outcome = serde_json::from_str("\"Automated - Successful\"").unwrap();
        assert_eq!(parsed, Outcome::AutomatedSuccessful);
    }

    #[test]
    fn test_outcome_parse_loose() {
        assert_eq!(
            Outcome::parse_loose("Automated – Successful"),
            Some(Outcome::AutomatedSuccessful)
        );
        assert_eq!(
            Outcome::parse_loose("escalated—unsuccessful."),
            Some(Outcome::EscalatedUnsuccessful)
        );
        assert_eq!(
            Outcome::parse_loose("  \"Automated-Partially Successful\" "),
            Some(Outcome::AutomatedPartiallySuccessful)
        );
        assert_eq!(Outcome::parse_loose("Resolved"), None);
        assert_eq!(Outcome::parse_loose("Escalated"), None);
    }

    #[test]
    fn test_intent_from_label() {
        assert_eq!(Intent::from_label("order_status"), Intent::OrderStatus);
        assert_eq!(Intent::from_label("Order status"), Intent::OrderStatus);
        assert_eq!(Intent::from_label("return-refund-issue"), Intent::ReturnRefundIssue);
        assert_eq!(Intent::from_label("billing"), Intent::Unknown);
        assert_eq!(Intent::from_label(""), Intent::Unknown);
    }

    #[test]
    fn test_result_json_shape() {
        let result = AnalysisResult::new(
            "call1".to_string(),
            "heuristic".to_string(),
            Classification {
                intent: Intent::OrderStatus,
                outcome: Outcome::AutomatedSuccessful,
                rationale: "resolved".to_string(),
            },
            "summary".to_string(),
            vec!["a".to_string(), "b".to_string()],
        );

        let value = serde_json::to_value(&result).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(|k| k.as_str()).collect();
        keys.sort();

        assert_eq!(
            keys,
            vec!["call_id", "improvements", "intent", "model", "outcome", "rationale", "summary"]
        );
        assert_eq!(value["intent"], "order_status");
        assert_eq!(value["outcome"], "Automated - Successful");
        assert_eq!(value["improvements"].as_array().unwrap().len(), 2);
    }
}
