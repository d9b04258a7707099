/// Lowercase and fold typographic apostrophes so curly and straight quotes match
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['’', '‘'], "'")
}

/// Check whether `term` occurs in `text` starting at a word boundary
///
/// Both arguments must already be normalized. Terms are stems: `refund`
/// matches `refunded` but `member` does not match `remember`.
pub fn contains_term(text: &str, term: &str) -> bool {
    let needs_boundary = term.chars().next().is_some_and(|c| c.is_alphanumeric());

    text.match_indices(term).any(|(index, _)| {
        !needs_boundary
            || text[..index]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric())
    })
}

/// Terms from `terms` present in `text`, in list order
pub fn matched_terms(text: &str, terms: &[&'static str]) -> Vec<&'static str> {
    terms
        .iter()
        .copied()
        .filter(|term| contains_term(text, term))
        .collect()
}

/// Render matched terms for rationale text: `"a", "b"`
pub fn quote_terms(terms: &[&str]) -> String {
    terms
        .iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Agent-side handoff phrases
///
/// Phrases rather than bare stems, so "bank transfer" or "connect you with the
/// portal" are not handoffs.
pub const ESCALATION_MARKERS: &[&str] = &[
    "transfer you",
    "transferring you",
    "transfer your call",
    "transferring your call",
    "transfer the call",
    "transferring the call",
    "escalate your",
    "escalating your",
    "escalate this",
    "escalating this",
    "escalate the",
    "escalating the",
    "let me escalate",
    "i'll escalate",
    "i will escalate",
    "connect you to our",
    "connect you with our",
    "connect you to someone",
    "connect you with someone",
    "connecting you to our",
    "connecting you with our",
    "connecting you to someone",
    "connecting you with someone",
    "put you through",
    "hand you over",
    "handing you over",
    "live agent",
    "human agent",
    "a representative",
    "a specialist",
];

/// Substantive help from the agent: links, lookups, policy explanations
pub const INFORMATION_MARKERS: &[&str] = &[
    "http",
    "www.",
    "link",
    "portal",
    "tracking",
    "order number",
    "i found",
    "i see your",
    "i've found",
    "looked up",
    "shipped",
    "delivered",
    "out for delivery",
    "estimated",
    "expected to arrive",
    "will arrive",
    "policy",
    "business days",
    "return label",
    "instructions",
    "steps",
    "you can",
];

/// The handoff went nowhere
pub const DEAD_END_MARKERS: &[&str] = &[
    "no agents available",
    "no agents are available",
    "no agents currently available",
    "no one is available",
    "nobody is available",
    "all of our agents are busy",
    "all our agents are busy",
    "all agents are busy",
    "agents are currently busy",
    "try again later",
    "call back later",
    "call back during",
    "outside of business hours",
    "outside business hours",
    "unable to transfer",
    "could not transfer",
    "couldn't transfer",
    "transfer failed",
    "call disconnected",
    "call dropped",
    "got disconnected",
    "line went dead",
    "hung up",
];

/// A human picked up after the handoff; only read from human-side turns
pub const HUMAN_FOLLOW_UP_MARKERS: &[&str] = &[
    "thanks for holding",
    "thank you for holding",
    "thanks for waiting",
    "thank you for waiting",
    "thank you for your patience",
    "i've taken care",
    "i have taken care",
    "i've resolved",
    "i have resolved",
    "i've processed",
    "i have processed",
    "i can help you with that",
];

/// Customer closure and satisfaction
pub const SATISFACTION_MARKERS: &[&str] = &[
    "thank",
    "resolved",
    "confirmed",
    "that's all",
    "that is all",
    "that's everything",
    "great",
    "perfect",
    "appreciate",
    "that helps",
    "that's helpful",
    "awesome",
    "sounds good",
];

/// Customer dissatisfaction, which overrides closure signals
pub const DISSATISFACTION_MARKERS: &[&str] = &[
    "not resolved",
    "still not",
    "doesn't help",
    "didn't help",
    "not helpful",
    "useless",
    "frustrat",
    "ridiculous",
    "unacceptable",
    "no thanks",
    "not what i asked",
];
