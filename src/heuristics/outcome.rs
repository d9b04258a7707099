use crate::models::{Outcome, SpeakerRole};

use super::markers::{
    matched_terms, quote_terms, DEAD_END_MARKERS, DISSATISFACTION_MARKERS, ESCALATION_MARKERS,
    HUMAN_FOLLOW_UP_MARKERS, INFORMATION_MARKERS, SATISFACTION_MARKERS,
};
use super::CallView;

/// Keyword evidence gathered from a call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSignals {
    /// Index of the first non-customer utterance with a handoff marker
    pub escalation_turn: Option<usize>,
    /// Handoff markers found in that utterance
    pub escalation: Vec<&'static str>,
    /// Informational content from the agent before the handoff
    pub prior_help: Vec<&'static str>,
    /// A speaker labelled as a human agent spoke after the handoff
    pub human_speaker: bool,
    /// Human-response phrases from human-side turns after the handoff
    pub human_follow_up: Vec<&'static str>,
    /// Failed-handoff markers from staff turns after the handoff and after the
    /// last human response
    pub dead_end: Vec<&'static str>,
    /// Customer closure markers
    pub closure: Vec<&'static str>,
    /// Customer dissatisfaction markers
    pub dissatisfaction: Vec<&'static str>,
}

impl CallSignals {
    pub(crate) fn collect(view: &CallView) -> Self {
        let mut signals = CallSignals::default();

        for (index, turn) in view.turns.iter().enumerate() {
            if turn.role == SpeakerRole::Customer {
                continue;
            }
            let found = matched_terms(&turn.text, ESCALATION_MARKERS);
            if !found.is_empty() {
                signals.escalation_turn = Some(index);
                signals.escalation = found;
                break;
            }
        }

        let customer_text = view.customer_text();
        signals.closure = matched_terms(&customer_text, SATISFACTION_MARKERS);
        signals.dissatisfaction = matched_terms(&customer_text, DISSATISFACTION_MARKERS);

        let Some(escalation_turn) = signals.escalation_turn else {
            return signals;
        };

        let before = view.join(|index, turn| {
            index < escalation_turn && view.is_agent_side(turn.role)
        });
        signals.prior_help = matched_terms(&before, INFORMATION_MARKERS);

        let after_from_human = view.join(|index, turn| {
            index > escalation_turn && view.is_human_side(turn.role)
        });
        signals.human_follow_up = matched_terms(&after_from_human, HUMAN_FOLLOW_UP_MARKERS);
        signals.human_speaker = view
            .turns
            .iter()
            .skip(escalation_turn + 1)
            .any(|turn| turn.role == SpeakerRole::HumanAgent);

        let last_human_turn = view
            .turns
            .iter()
            .enumerate()
            .skip(escalation_turn + 1)
            .filter(|(_, turn)| {
                turn.role == SpeakerRole::HumanAgent
                    || (view.is_human_side(turn.role)
                        && !matched_terms(&turn.text, HUMAN_FOLLOW_UP_MARKERS).is_empty())
            })
            .map(|(index, _)| index)
            .last();

        let dead_end_from = last_human_turn.map_or(escalation_turn, |index| index + 1);
        let after_last_human = view.join(|index, turn| {
            index >= dead_end_from && turn.role != SpeakerRole::Customer
        });
        signals.dead_end = matched_terms(&after_last_human, DEAD_END_MARKERS);

        signals
    }

    pub fn escalated(&self) -> bool {
        self.escalation_turn.is_some()
    }

    pub fn human_responded(&self) -> bool {
        self.human_speaker || !self.human_follow_up.is_empty()
    }
}

/// The decision rule that produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeRule {
    /// Escalated and the handoff failed, or no human picked up and nothing useful came first
    FailedEscalation,
    /// Escalated after the agent gave substantive information
    EscalatedAfterHelp,
    /// Escalated and a human continued the call
    HumanFollowUp,
    /// Not escalated and the customer signalled closure
    AutomatedResolved,
    /// Not escalated and no clear closure
    AutomatedUnconfirmed,
}

impl OutcomeRule {
    pub fn outcome(&self) -> Outcome {
        match self {
            OutcomeRule::FailedEscalation => Outcome::EscalatedUnsuccessful,
            OutcomeRule::EscalatedAfterHelp | OutcomeRule::HumanFollowUp => {
                Outcome::EscalatedPartiallySuccessful
            }
            OutcomeRule::AutomatedResolved => Outcome::AutomatedSuccessful,
            OutcomeRule::AutomatedUnconfirmed => Outcome::AutomatedPartiallySuccessful,
        }
    }
}

/// Pick the outcome rule; escalation always dominates satisfaction
pub fn decide(signals: &CallSignals) -> OutcomeRule {
    if signals.escalated() {
        let no_prior_help = signals.prior_help.is_empty();
        let dead_end = !signals.dead_end.is_empty();

        if dead_end || (!signals.human_responded() && no_prior_help) {
            OutcomeRule::FailedEscalation
        } else if !no_prior_help {
            OutcomeRule::EscalatedAfterHelp
        } else {
            OutcomeRule::HumanFollowUp
        }
    } else if !signals.closure.is_empty() && signals.dissatisfaction.is_empty() {
        OutcomeRule::AutomatedResolved
    } else {
        OutcomeRule::AutomatedUnconfirmed
    }
}

/// Explain the fired rule using the matched markers
pub fn explain(rule: OutcomeRule, signals: &CallSignals) -> String {
    let escalation = quote_terms(&signals.escalation);

    match rule {
        OutcomeRule::FailedEscalation if !signals.dead_end.is_empty() => format!(
            "The call was escalated ({}) but the handoff failed ({}), \
             so the customer was left without a resolution.",
            escalation,
            quote_terms(&signals.dead_end)
        ),
        OutcomeRule::FailedEscalation => format!(
            "The call was escalated ({}) before the agent provided any substantive help, \
             and no human follow-up appears in the transcript.",
            escalation
        ),
        OutcomeRule::EscalatedAfterHelp => format!(
            "The call was escalated ({}) after the agent provided substantive information ({}), \
             so the customer received partial help before the handoff.",
            escalation,
            quote_terms(&signals.prior_help)
        ),
        OutcomeRule::HumanFollowUp if signals.human_follow_up.is_empty() => format!(
            "The call was escalated ({}) and a human agent continued the conversation.",
            escalation
        ),
        OutcomeRule::HumanFollowUp => format!(
            "The call was escalated ({}) and a human agent followed up ({}).",
            escalation,
            quote_terms(&signals.human_follow_up)
        ),
        OutcomeRule::AutomatedResolved => format!(
            "No escalation occurred and the customer signalled closure ({}), \
             so the automated agent resolved the request.",
            quote_terms(&signals.closure)
        ),
        OutcomeRule::AutomatedUnconfirmed if !signals.dissatisfaction.is_empty() => format!(
            "No escalation occurred but the customer expressed dissatisfaction ({}), \
             so the request was only partly resolved.",
            quote_terms(&signals.dissatisfaction)
        ),
        OutcomeRule::AutomatedUnconfirmed => "No escalation occurred but the customer gave no \
             clear closure signal, so the request was only partly resolved."
            .to_string(),
    }
}
