use crate::models::Outcome;

/// Pre-authored improvement suggestions for each outcome category
pub fn canned_improvements(outcome: Outcome) -> &'static [&'static str] {
    match outcome {
        Outcome::AutomatedSuccessful => &[
            "Confirm the resolution back to the customer in one sentence before closing the call.",
            "Offer proactive follow-up details, such as tracking links or timelines, so the customer does not need to call again.",
        ],
        Outcome::AutomatedPartiallySuccessful => &[
            "Ask a clarifying question when the customer's request is ambiguous instead of guessing.",
            "Check explicitly whether the customer's question was fully answered before ending the call.",
            "Offer a concrete next step, such as a link, an email confirmation or a callback, when the request cannot be completed during the call.",
        ],
        Outcome::EscalatedPartiallySuccessful => &[
            "Provide as much useful information as possible before escalation.",
            "Pass a summary of what was already done to the human agent so the customer does not have to repeat themselves.",
            "Explain why the call is being transferred and what the customer should expect next.",
        ],
        Outcome::EscalatedUnsuccessful => &[
            "Attempt to resolve or at least triage the request before offering a transfer.",
            "Acknowledge customer frustration and explain escalation clearly.",
            "Check human agent availability before transferring and offer a callback or another channel when no one is available.",
        ],
    }
}

pub fn improvements_for(outcome: Outcome) -> Vec<String> {
    canned_improvements(outcome)
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Bring a suggestion list to 2-3 entries
///
/// Extra suggestions beyond three are dropped; short lists are padded with
/// canned suggestions for the outcome that are not already present.
pub fn normalize_improvements(mut suggestions: Vec<String>, outcome: Outcome) -> Vec<String> {
    suggestions.retain(|s| !s.trim().is_empty());
    suggestions.truncate(3);

    for canned in canned_improvements(outcome) {
        if suggestions.len() >= 2 {
            break;
        }
        if !suggestions.iter().any(|s| s.eq_ignore_ascii_case(canned)) {
            suggestions.push(canned.to_string());
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_outcome_has_two_or_three() {
        for outcome in Outcome::ALL {
            let len = canned_improvements(outcome).len();
            assert!((2..=3).contains(&len), "{} has {} suggestions", outcome, len);
        }
    }

    #[test]
    fn test_normalize_pads_short_lists() {
        let padded = normalize_improvements(
            vec!["Greet the customer by name.".to_string()],
            Outcome::EscalatedUnsuccessful,
        );
        assert_eq!(padded.len(), 2);
        assert_eq!(padded[0], "Greet the customer by name.");
        assert_eq!(padded[1], canned_improvements(Outcome::EscalatedUnsuccessful)[0]);
    }

    #[test]
    fn test_normalize_skips_duplicates_when_padding() {
        let existing = canned_improvements(Outcome::AutomatedSuccessful)[0].to_string();
        let padded = normalize_improvements(vec![existing.clone()], Outcome::AutomatedSuccessful);
        assert_eq!(padded.len(), 2);
        assert_eq!(padded[0], existing);
        assert_eq!(padded[1], canned_improvements(Outcome::AutomatedSuccessful)[1]);
    }

    #[test]
    fn test_normalize_truncates_and_fills_empty() {
        let many: Vec<String> = (1..=5).map(|i| format!("Suggestion {}", i)).collect();
        assert_eq!(normalize_improvements(many, Outcome::AutomatedSuccessful).len(), 3);

        let empty = normalize_improvements(vec!["  ".to_string()], Outcome::AutomatedSuccessful);
        assert_eq!(empty, improvements_for(Outcome::AutomatedSuccessful));
    }
}
