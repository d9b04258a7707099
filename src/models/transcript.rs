use serde::{Deserialize, Serialize};

/// Who is speaking in an utterance, inferred from the speaker label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    /// The caller
    Customer,
    /// The automated voice agent
    Agent,
    /// A human agent the call was handed to
    HumanAgent,
    /// Unlabelled or unrecognised speaker
    Unknown,
}

impl SpeakerRole {
    /// Infer a role from a speaker label such as "Customer", "AI Agent" or "Human Rep"
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let has = |candidates: &[&str]| words.iter().any(|w| candidates.contains(w));

        let staff_desk = words
            .windows(2)
            .any(|pair| pair[0] == "customer" && ["service", "support", "care"].contains(&pair[1]));

        if has(&["ai", "bot", "virtual", "assistant", "automated", "system", "ivr"]) {
            SpeakerRole::Agent
        } else if staff_desk
            || has(&["human", "representative", "rep", "supervisor", "specialist", "live"])
        {
            SpeakerRole::HumanAgent
        } else if has(&["customer", "caller", "client", "user", "shopper"]) {
            SpeakerRole::Customer
        } else if has(&["agent"]) {
            SpeakerRole::Agent
        } else {
            SpeakerRole::Unknown
        }
    }
}

/// A single speaker turn in a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Speaker label as it appeared in the source, if any
    #[serde(default)]
    pub speaker: Option<String>,
    /// Spoken text
    pub text: String,
}

impl Utterance {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: Some(speaker.into()),
            text: text.into(),
        }
    }

    pub fn unlabelled(text: impl Into<String>) -> Self {
        Self {
            speaker: None,
            text: text.into(),
        }
    }

    pub fn role(&self) -> SpeakerRole {
        self.speaker
            .as_deref()
            .map(SpeakerRole::from_label)
            .unwrap_or(SpeakerRole::Unknown)
    }
}

/// An ordered customer-service call transcript
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    utterances: Vec<Utterance>,
}

impl Transcript {
    pub fn from_utterances(utterances: Vec<Utterance>) -> Self {
        let utterances = utterances
            .into_iter()
            .filter(|u| !u.text.trim().is_empty())
            .collect();
        Self { utterances }
    }

    /// Parse raw text with speaker-labelled lines (`Agent: ...`, `Customer: ...`)
    ///
    /// Lines without a recognisable label continue the previous utterance.
    pub fn parse(raw: &str) -> Self {
        let mut utterances: Vec<Utterance> = Vec::new();

        for line in raw.lines() {
            let line = strip_timestamp(line.trim());
            if line.is_empty() {
                continue;
            }

            match split_label(line) {
                Some((label, text)) => utterances.push(Utterance::new(label, text)),
                None => match utterances.last_mut() {
                    Some(last) => {
                        if !last.text.is_empty() {
                            last.text.push(' ');
                        }
                        last.text.push_str(line);
                    }
                    None => utterances.push(Utterance::unlabelled(line)),
                },
            }
        }

        Self::from_utterances(utterances)
    }

    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    pub fn has_role(&self, role: SpeakerRole) -> bool {
        self.utterances.iter().any(|u| u.role() == role)
    }

    /// Render back to speaker-labelled lines for prompting
    pub fn to_text(&self) -> String {
        self.utterances
            .iter()
            .map(|u| match &u.speaker {
                Some(speaker) => format!("{}: {}", speaker, u.text),
                None => u.text.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Drop a leading `[00:12]`-style timestamp
fn strip_timestamp(line: &str) -> &str {
    if line.starts_with('[') {
        if let Some(end) = line.find(']') {
            return line[end + 1..].trim_start();
        }
    }
    line
}

/// Split `Label: text` when the prefix looks like a speaker label
fn split_label(line: &str) -> Option<(&str, &str)> {
    let (label, text) = line.split_once(':')?;
    let label = label.trim();

    let starts_with_letter = label.chars().next().is_some_and(|c| c.is_alphabetic());
    let word_count = label.split_whitespace().count();

    let looks_like_url = text.starts_with("//");

    if starts_with_letter
        && !looks_like_url
        && label.len() <= 40
        && (1..=4).contains(&word_count)
        && !label.contains('/')
    {
        Some((label, text.trim()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labelled_lines() {
        let raw = "Agent: Hi, thanks for calling.\n\nCustomer: Where is my order?\nAgent: Let me check.";
        let transcript = Transcript::parse(raw);

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.utterances()[1].speaker.as_deref(), Some("Customer"));
        assert_eq!(transcript.utterances()[1].text, "Where is my order?");
        assert_eq!(transcript.utterances()[0].role(), SpeakerRole::Agent);
        assert_eq!(transcript.utterances()[1].role(), SpeakerRole::Customer);
    }

    #[test]
    fn test_parse_continuation_and_timestamps() {
        let raw = "[00:01] AI Agent: Your tracking link is\nhttps://track.example.com/123\n[00:09] Caller: ok";
        let transcript = Transcript::parse(raw);

        assert_eq!(transcript.len(), 2);
        assert_eq!(
            transcript.utterances()[0].text,
            "Your tracking link is https://track.example.com/123"
        );
        assert_eq!(transcript.utterances()[1].role(), SpeakerRole::Customer);
    }

    #[test]
    fn test_parse_unlabelled_text() {
        let transcript = Transcript::parse("hello there\nI need help");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.utterances()[0].speaker, None);
        assert_eq!(transcript.utterances()[0].role(), SpeakerRole::Unknown);
    }

    #[test]
    fn test_parse_empty() {
        assert!(Transcript::parse("").is_empty());
        assert!(Transcript::parse("  \n\t\n").is_empty());
    }

    #[test]
    fn test_role_from_label() {
        assert_eq!(SpeakerRole::from_label("Human Agent"), SpeakerRole::HumanAgent);
        assert_eq!(SpeakerRole::from_label("Representative"), SpeakerRole::HumanAgent);
        assert_eq!(SpeakerRole::from_label("Voice Bot"), SpeakerRole::Agent);
        assert_eq!(SpeakerRole::from_label("Aidan"), SpeakerRole::Unknown);
    }

    #[test]
    fn test_customer_service_labels_are_staff() {
        assert_eq!(SpeakerRole::from_label("Customer Service Rep"), SpeakerRole::HumanAgent);
        assert_eq!(SpeakerRole::from_label("Customer Service"), SpeakerRole::HumanAgent);
        assert_eq!(SpeakerRole::from_label("Customer Support Agent"), SpeakerRole::HumanAgent);
        assert_eq!(SpeakerRole::from_label("Customer Care"), SpeakerRole::HumanAgent);
        assert_eq!(SpeakerRole::from_label("Virtual Agent"), SpeakerRole::Agent);
        assert_eq!(SpeakerRole::from_label("Customer"), SpeakerRole::Customer);
        assert_eq!(SpeakerRole::from_label("Caller 1"), SpeakerRole::Customer);
    }
}
