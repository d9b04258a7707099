use crate::models::{Classification, Intent, Outcome};

/// Stage 1: summarize the call
pub const SUMMARY_PROMPT: &str = r#"You are a QA assistant. Summarize the following customer support call between an AI voice agent and a customer.

Focus on:
- The customer's intent
- The AI agent's actions (lookups, links shared, policies explained, transfers)
- Whether the issue was resolved or escalated
- Any miscommunications or moments where the agent misunderstood the customer

Write 3-6 short bullet points.

Transcript:
{transcript}
"#;

/// Stage 2: classify the call outcome
pub const CLASSIFICATION_PROMPT: &str = r#"You are a QA reviewer. Classify the outcome of this customer support call into exactly ONE of the following categories:

- Automated - Successful: the AI agent resolved the customer's request on its own and the call ended without a handoff.
- Automated - Partially Successful: the AI agent handled the call without a handoff, but the request was only partly addressed or the customer left without clear confirmation.
- Escalated - Partially Successful: the call was handed to a human or another channel, but the AI agent provided useful help first or a human continued the call.
- Escalated - Unsuccessful: the call was handed off without meaningful help from the AI agent, or the handoff itself failed.

Also identify the customer's intent as one of: {intents}.

Summary:
{summary}

Transcript:
{transcript}

Respond with a single JSON object and nothing else:
{"intent": "<intent>", "outcome": "<one of the four categories, exactly as written above>", "rationale": "<one or two sentences>"}
"#;

/// Stage 2 retry after an unusable classification response
pub const CLASSIFICATION_REPAIR_PROMPT: &str = r#"Your previous answer could not be used. It must be ONLY a JSON object, with no markdown fences and no extra text, using exactly these keys:

{"intent": "<one of: {intents}>", "outcome": "<one of: {outcomes}>", "rationale": "<non-empty explanation>"}

The "outcome" value must be copied character for character from the list above.

Previous answer:
{previous}

Summary:
{summary}

Transcript:
{transcript}
"#;

/// Stage 3: improvement suggestions
pub const IMPROVEMENT_PROMPT: &str = r#"You are a QA reviewer. Based on the call summary and classification, suggest 2-3 concrete, actionable improvements for the AI agent's behavior.

Summary:
{summary}

Classification:
{classification}

Write each suggestion as a single bullet point starting with "- ". Do not write anything else.
"#;

/// Substitute `{name}` slots with their values
///
/// Unknown slots are left untouched so JSON braces in templates survive.
/// Substitution is a single pass over the template, so braces inside a
/// substituted value are never expanded.
pub fn render(template: &str, slots: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let tail = &rest[open..];

        let slot = tail.find('}').and_then(|close| {
            let name = &tail[1..close];
            slots
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| (close, *value))
        });

        match slot {
            Some((close, value)) => {
                output.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                output.push('{');
                rest = &tail[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

fn intent_list() -> String {
    Intent::ALL
        .iter()
        .map(|i| i.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn outcome_list() -> String {
    Outcome::ALL
        .iter()
        .map(|o| format!("\"{}\"", o))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_summary_prompt(transcript: &str) -> String {
    render(SUMMARY_PROMPT, &[("transcript", transcript)])
}

pub fn build_classification_prompt(transcript: &str, summary: &str) -> String {
    let intents = intent_list();
    render(
        CLASSIFICATION_PROMPT,
        &[
            ("intents", intents.as_str()),
            ("summary", summary),
            ("transcript", transcript),
        ],
    )
}

pub fn build_repair_prompt(transcript: &str, summary: &str, previous: &str) -> String {
    let intents = intent_list();
    let outcomes = outcome_list();
    render(
        CLASSIFICATION_REPAIR_PROMPT,
        &[
            ("intents", intents.as_str()),
            ("outcomes", outcomes.as_str()),
            ("previous", previous),
            ("summary", summary),
            ("transcript", transcript),
        ],
    )
}

pub fn build_improvement_prompt(summary: &str, classification: &Classification) -> String {
    let classification = format!(
        "Outcome: {}\nIntent: {}\nRationale: {}",
        classification.outcome, classification.intent, classification.rationale
    );
    render(
        IMPROVEMENT_PROMPT,
        &[("summary", summary), ("classification", classification.as_str())],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_named_slots() {
        let text = render("a {x} b {y} {z}", &[("x", "1"), ("y", "2")]);
        assert_eq!(text, "a 1 b 2 {z}");
    }

    #[test]
    fn test_render_does_not_expand_slot_values() {
        let text = render(
            "{summary} / {transcript}",
            &[("summary", "mentions {transcript}"), ("transcript", "Agent: hi")],
        );
        assert_eq!(text, "mentions {transcript} / Agent: hi");

        let prompt = build_classification_prompt("Agent: hi", "- the customer typed {transcript}");
        assert!(prompt.contains("- the customer typed {transcript}"));
    }

    #[test]
    fn test_classification_prompt_embeds_categories() {
        let prompt = build_classification_prompt("Agent: hi", "- greeting only");
        for outcome in Outcome::ALL {
            assert!(prompt.contains(outcome.as_str()), "missing {}", outcome);
        }
        assert!(prompt.contains("order_status"));
        assert!(prompt.contains("Agent: hi"));
        assert!(prompt.contains("- greeting only"));
        assert!(prompt.contains(r#"{"intent": "<intent>""#));
        assert!(!prompt.contains("{summary}"));
    }

    #[test]
    fn test_repair_prompt_includes_previous_answer() {
        let prompt = build_repair_prompt("t", "s", "Outcome: Escalated");
        assert!(prompt.contains("Outcome: Escalated"));
        assert!(prompt.contains("\"Escalated - Unsuccessful\""));
    }

    #[test]
    fn test_improvement_prompt() {
        let classification = Classification {
            intent: Intent::ReturnStatus,
            outcome: Outcome::EscalatedPartiallySuccessful,
            rationale: "Transferred after sharing the portal link.".to_string(),
        };
        let prompt = build_improvement_prompt("- customer asked about a return", &classification);
        assert!(prompt.contains("Outcome: Escalated - Partially Successful"));
        assert!(prompt.contains("Intent: return_status"));
        assert!(prompt.contains("2-3 concrete"));
    }
}
