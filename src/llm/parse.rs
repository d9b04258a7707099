use serde::Deserialize;

use crate::error::StageError;
use crate::models::{Classification, Intent, Outcome};

#[derive(Debug, Deserialize)]
struct RawClassification {
    #[serde(default)]
    intent: Option<String>,
    #[serde(default)]
    outcome: Option<String>,
    #[serde(default)]
    rationale: Option<String>,
}

/// Parse a model's classification answer
///
/// Accepts the JSON object on its own, inside a code fence, or surrounded by
/// prose. The outcome must land in the closed set and the rationale must be
/// non-empty; an unrecognised intent becomes `unknown`.
pub fn parse_classification(response: &str) -> Result<Classification, StageError> {
    let object = extract_json_object(response).ok_or_else(|| {
        StageError::MalformedResponse("no JSON object in classification response".to_string())
    })?;

    let raw: RawClassification = serde_json::from_str(object)
        .map_err(|e| StageError::MalformedResponse(format!("invalid classification JSON: {}", e)))?;

    let outcome_text = raw
        .outcome
        .ok_or_else(|| StageError::MalformedResponse("missing \"outcome\"".to_string()))?;
    let outcome = Outcome::parse_loose(&outcome_text).ok_or_else(|| {
        StageError::MalformedResponse(format!("outcome not in category set: {:?}", outcome_text))
    })?;

    let rationale = raw.rationale.unwrap_or_default().trim().to_string();
    if rationale.is_empty() {
        return Err(StageError::MalformedResponse(
            "missing or empty \"rationale\"".to_string(),
        ));
    }

    let intent = raw
        .intent
        .as_deref()
        .map(Intent::from_label)
        .unwrap_or(Intent::Unknown);

    Ok(Classification {
        intent,
        outcome,
        rationale,
    })
}

/// Slice from the first `{` to the last `}`
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Pull bullet or numbered suggestions out of free text
///
/// Falls back to non-empty lines when the response has no list markers.
pub fn parse_suggestions(response: &str) -> Vec<String> {
    let lines: Vec<&str> = response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .collect();

    let bullets: Vec<String> = lines
        .iter()
        .filter_map(|line| strip_list_marker(line))
        .map(clean_suggestion)
        .filter(|s| !s.is_empty())
        .collect();

    if !bullets.is_empty() {
        return bullets;
    }

    lines
        .into_iter()
        .map(clean_suggestion)
        .filter(|s| !s.is_empty() && !s.ends_with(':'))
        .collect()
}

fn strip_list_marker(line: &str) -> Option<&str> {
    for marker in ["- ", "* ", "• ", "– "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest);
        }
    }

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return Some(rest);
        }
    }

    None
}

/// Trim whitespace and markdown emphasis
fn clean_suggestion(text: &str) -> String {
    text.trim()
        .trim_start_matches("**")
        .replace("**", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let response = r#"{"intent": "order_status", "outcome": "Automated - Successful", "rationale": "Order found and confirmed."}"#;
        let classification = parse_classification(response).unwrap();

        assert_eq!(classification.intent, Intent::OrderStatus);
        assert_eq!(classification.outcome, Outcome::AutomatedSuccessful);
        assert_eq!(classification.rationale, "Order found and confirmed.");
    }

    #[test]
    fn test_parse_fenced_json_with_dash_variant() {
        let response = "Here is my answer:\n```json\n{\n  \"intent\": \"Return status\",\n  \"outcome\": \"Escalated – Partially Successful\",\n  \"rationale\": \"Link shared, then transferred.\"\n}\n```";
        let classification = parse_classification(response).unwrap();

        assert_eq!(classification.intent, Intent::ReturnStatus);
        assert_eq!(classification.outcome, Outcome::EscalatedPartiallySuccessful);
    }

    #[test]
    fn test_unknown_intent_is_not_an_error() {
        let response = r#"{"intent": "billing", "outcome": "Escalated - Unsuccessful", "rationale": "x"}"#;
        assert_eq!(parse_classification(response).unwrap().intent, Intent::Unknown);
    }

    #[test]
    fn test_malformed_classifications() {
        let cases = [
            "Automated - Successful",
            r#"{"intent": "order_status", "outcome": "Resolved", "rationale": "x"}"#,
            r#"{"intent": "order_status", "rationale": "x"}"#,
            r#"{"intent": "order_status", "outcome": "Automated - Successful", "rationale": "  "}"#,
            r#"{"intent": "order_status", "outcome": "#,
        ];

        for case in cases {
            assert!(
                matches!(parse_classification(case), Err(StageError::MalformedResponse(_))),
                "expected malformed: {}",
                case
            );
        }
    }

    #[test]
    fn test_parse_bullets() {
        let response = "Suggestions:\n- Greet the customer.\n* **Confirm** the order number.\n\n• Offer a callback.";
        assert_eq!(
            parse_suggestions(response),
            vec!["Greet the customer.", "Confirm the order number.", "Offer a callback."]
        );
    }

    #[test]
    fn test_parse_numbered() {
        let response = "1. Explain the transfer.\n2) Share the portal link earlier.";
        assert_eq!(
            parse_suggestions(response),
            vec!["Explain the transfer.", "Share the portal link earlier."]
        );
    }

    #[test]
    fn test_parse_unmarked_lines() {
        let response = "Here are my ideas:\nAsk clarifying questions.\nSummarize before transferring.";
        assert_eq!(
            parse_suggestions(response),
            vec!["Ask clarifying questions.", "Summarize before transferring."]
        );
    }
}
