pub mod intent;
pub mod markers;
pub mod outcome;
pub mod suggestions;

pub use intent::*;
pub use outcome::*;
pub use suggestions::*;

use crate::models::{Classification, Outcome, SpeakerRole, Transcript};

use markers::{normalize, quote_terms};

/// Model identifier recorded for heuristic results
pub const HEURISTIC_MODEL: &str = "heuristic";

/// Normalized utterance used for matching
#[derive(Debug, Clone)]
pub(crate) struct ViewTurn {
    pub role: SpeakerRole,
    pub text: String,
}

/// Lowercased view of a transcript with speaker-side rules
///
/// When a transcript has no labelled customer, unlabelled speech counts as the
/// customer's; likewise for the agent.
#[derive(Debug, Clone)]
pub(crate) struct CallView {
    pub turns: Vec<ViewTurn>,
    labelled_customer: bool,
    labelled_agent: bool,
}

impl CallView {
    pub fn new(transcript: &Transcript) -> Self {
        let turns = transcript
            .utterances()
            .iter()
            .map(|u| ViewTurn {
                role: u.role(),
                text: normalize(&u.text),
            })
            .collect();

        Self {
            turns,
            labelled_customer: transcript.has_role(SpeakerRole::Customer),
            labelled_agent: transcript.has_role(SpeakerRole::Agent),
        }
    }

    pub fn is_customer_side(&self, role: SpeakerRole) -> bool {
        role == SpeakerRole::Customer || (role == SpeakerRole::Unknown && !self.labelled_customer)
    }

    pub fn is_agent_side(&self, role: SpeakerRole) -> bool {
        role == SpeakerRole::Agent || (role == SpeakerRole::Unknown && !self.labelled_agent)
    }

    /// Turns that can carry a human agent's response
    pub fn is_human_side(&self, role: SpeakerRole) -> bool {
        role == SpeakerRole::HumanAgent || (role == SpeakerRole::Unknown && self.labelled_agent)
    }

    /// Join the text of turns selected by `keep`
    pub fn join<F>(&self, keep: F) -> String
    where
        F: Fn(usize, &ViewTurn) -> bool,
    {
        self.turns
            .iter()
            .enumerate()
            .filter(|(index, turn)| keep(*index, *turn))
            .map(|(_, turn)| turn.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn customer_text(&self) -> String {
        self.join(|_, turn| self.is_customer_side(turn.role))
    }

    pub fn full_text(&self) -> String {
        self.join(|_, _| true)
    }
}

/// Full heuristic reading of a call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicAnalysis {
    pub intent: IntentMatch,
    pub signals: CallSignals,
    pub rule: OutcomeRule,
    pub outcome: Outcome,
    pub rationale: String,
}

impl HeuristicAnalysis {
    pub fn classification(&self) -> Classification {
        Classification {
            intent: self.intent.intent,
            outcome: self.outcome,
            rationale: self.rationale.clone(),
        }
    }

    /// Templated summary built from the detected intent and call signals
    pub fn summary(&self, utterance_count: usize) -> String {
        let intent_line = if self.intent.keywords.is_empty() {
            "- Customer intent: unknown (no intent keywords found)".to_string()
        } else {
            format!(
                "- Customer intent: {} ({})",
                self.intent.intent,
                quote_terms(&self.intent.keywords)
            )
        };

        let mut actions = Vec::new();
        if !self.signals.prior_help.is_empty() {
            actions.push(format!(
                "shared information ({})",
                quote_terms(&self.signals.prior_help)
            ));
        }
        if self.signals.escalated() {
            actions.push(format!(
                "escalated the call ({})",
                quote_terms(&self.signals.escalation)
            ));
        }
        if actions.is_empty() {
            actions.push("handled the call without escalation".to_string());
        }

        let resolution = match self.rule {
            OutcomeRule::FailedEscalation if !self.signals.dead_end.is_empty() => {
                "escalated, handoff failed"
            }
            OutcomeRule::FailedEscalation => "escalated without resolution",
            OutcomeRule::EscalatedAfterHelp => "escalated after partial help",
            OutcomeRule::HumanFollowUp => "escalated, human agent followed up",
            OutcomeRule::AutomatedResolved => "resolved by the automated agent",
            OutcomeRule::AutomatedUnconfirmed => "no clear resolution",
        };

        format!(
            "Heuristic analysis of a {}-utterance call.\n{}\n- Agent actions: {}\n- Outcome: {} ({})",
            utterance_count,
            intent_line,
            actions.join("; "),
            self.outcome,
            resolution
        )
    }
}

/// Run the deterministic classifier over a transcript
pub fn analyze(transcript: &Transcript) -> HeuristicAnalysis {
    let view = CallView::new(transcript);
    let intent = intent::detect_in_view(&view);
    let signals = CallSignals::collect(&view);
    let rule = decide(&signals);

    let intent_sentence = if intent.keywords.is_empty() {
        "No intent keywords matched, so the intent is unknown.".to_string()
    } else {
        format!(
            "Detected intent {} from {}.",
            intent.intent,
            quote_terms(&intent.keywords)
        )
    };
    let rationale = format!("{} {}", intent_sentence, explain(rule, &signals));

    HeuristicAnalysis {
        outcome: rule.outcome(),
        intent,
        signals,
        rule,
        rationale,
    }
}

/// Intent, outcome and rationale for a transcript
pub fn classify(transcript: &Transcript) -> Classification {
    analyze(transcript).classification()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intent;

    #[test]
    fn test_analyze_is_deterministic() {
        let raw = "Customer: Where is my order?\nAgent: It shipped today.\nCustomer: Perfect, thanks!";
        let transcript = Transcript::parse(raw);

        let first = analyze(&transcript);
        let second = analyze(&transcript);

        assert_eq!(first, second);
        assert_eq!(first.summary(transcript.len()), second.summary(transcript.len()));
    }

    #[test]
    fn test_rationale_names_intent_and_rule() {
        let raw = "Customer: I have a question about my membership.\nAgent: Let me transfer you.";
        let analysis = analyze(&Transcript::parse(raw));

        assert_eq!(analysis.intent.intent, Intent::MembershipQuestion);
        assert_eq!(analysis.outcome, Outcome::EscalatedUnsuccessful);
        assert!(analysis.rationale.starts_with("Detected intent membership_question"));
        assert!(analysis.rationale.contains("\"transfer you\""));
    }

    #[test]
    fn test_unlabelled_transcript() {
        let raw = "hi i need to know if the shirt comes in a small size\nit does, you can pick it on the product page\ngreat thanks";
        let analysis = analyze(&Transcript::parse(raw));

        assert_eq!(analysis.intent.intent, Intent::ProductQuestion);
        assert_eq!(analysis.outcome, Outcome::AutomatedSuccessful);
    }

    #[test]
    fn test_summary_mentions_intent() {
        let raw = "Customer: Can I exchange these boots?\nAgent: Sure, here is the return label link.\nCustomer: Thanks.";
        let transcript = Transcript::parse(raw);
        let summary = analyze(&transcript).summary(transcript.len());

        assert!(summary.contains("return_status"));
        assert!(summary.contains("Automated - Successful"));
    }
}
