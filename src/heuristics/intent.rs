use crate::models::{Intent, Transcript};

use super::markers::{matched_terms, normalize};
use super::CallView;

/// Keyword families in detection priority order
///
/// Refund problems come before return status, and both come before the generic
/// order and product families, because return calls routinely mention the order
/// and the product being returned.
pub const INTENT_FAMILIES: &[(Intent, &[&str])] = &[
    (
        Intent::ReturnRefundIssue,
        &[
            "refund",
            "money back",
            "reimburse",
            "charged twice",
            "double charged",
            "overcharged",
        ],
    ),
    (
        Intent::ReturnStatus,
        &["return", "exchange", "rma", "send it back", "sent it back"],
    ),
    (
        Intent::MembershipQuestion,
        &[
            "membership",
            "member",
            "subscription",
            "subscribe",
            "loyalty",
            "rewards",
            "renew",
        ],
    ),
    (
        Intent::OrderStatus,
        &[
            "order",
            "tracking",
            "track my",
            "shipment",
            "shipping",
            "shipped",
            "delivery",
            "package",
            "parcel",
        ],
    ),
    (
        Intent::ProductQuestion,
        &[
            "size",
            "sizing",
            "fit",
            "color",
            "colour",
            "material",
            "fabric",
            "in stock",
            "product",
            "dimensions",
            "warranty",
            "compatible",
        ],
    ),
];

/// Detected intent plus the keywords that decided it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentMatch {
    pub intent: Intent,
    pub keywords: Vec<&'static str>,
}

/// Detect the customer's intent
///
/// Customer-side speech is scanned first so that agent greetings listing every
/// topic do not decide the intent; the full transcript is the fallback.
pub fn detect_intent(transcript: &Transcript) -> IntentMatch {
    let view = CallView::new(transcript);
    detect_in_view(&view)
}

pub(crate) fn detect_in_view(view: &CallView) -> IntentMatch {
    first_family_match(&view.customer_text())
        .or_else(|| first_family_match(&view.full_text()))
        .unwrap_or(IntentMatch {
            intent: Intent::Unknown,
            keywords: Vec::new(),
        })
}

/// Detect intent in free text with no speaker information
pub fn detect_intent_in_text(text: &str) -> IntentMatch {
    first_family_match(&normalize(text)).unwrap_or(IntentMatch {
        intent: Intent::Unknown,
        keywords: Vec::new(),
    })
}

fn first_family_match(text: &str) -> Option<IntentMatch> {
    INTENT_FAMILIES.iter().find_map(|(intent, terms)| {
        let keywords = matched_terms(text, terms);
        (!keywords.is_empty()).then_some(IntentMatch {
            intent: *intent,
            keywords,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent_of(raw: &str) -> Intent {
        detect_intent(&Transcript::parse(raw)).intent
    }

    #[test]
    fn test_refund_beats_return_and_order() {
        let raw = "Customer: I returned my order two weeks ago and still have no refund.";
        assert_eq!(intent_of(raw), Intent::ReturnRefundIssue);
    }

    #[test]
    fn test_return_beats_order_and_product() {
        let raw = "Customer: I want to return the shoes from my last order, the size is wrong.";
        assert_eq!(intent_of(raw), Intent::ReturnStatus);
    }

    #[test]
    fn test_membership_beats_order() {
        let raw = "Customer: Does my membership give free shipping on every order?";
        assert_eq!(intent_of(raw), Intent::MembershipQuestion);
    }

    #[test]
    fn test_order_status() {
        let raw = "Customer: Where is my package? I placed it last week.";
        assert_eq!(intent_of(raw), Intent::OrderStatus);
    }

    #[test]
    fn test_product_question() {
        let raw = "Customer: Does this jacket come in a larger size?";
        assert_eq!(intent_of(raw), Intent::ProductQuestion);
    }

    #[test]
    fn test_unknown_when_nothing_matches() {
        assert_eq!(intent_of("Customer: Hello? Can you hear me?"), Intent::Unknown);
    }

    #[test]
    fn test_agent_greeting_does_not_decide_intent() {
        let raw = "Agent: I can help with orders, returns, refunds and memberships.\n\
                   Customer: Does the blue one come in a medium size?";
        assert_eq!(intent_of(raw), Intent::ProductQuestion);
    }

    #[test]
    fn test_falls_back_to_full_text() {
        let raw = "Customer: Hi.\nAgent: I see you're asking about your order status.";
        let found = detect_intent(&Transcript::parse(raw));
        assert_eq!(found.intent, Intent::OrderStatus);
        assert_eq!(found.keywords, vec!["order"]);
    }

    #[test]
    fn test_same_keywords_same_intent() {
        let a = detect_intent_in_text("refund for my return");
        let b = detect_intent_in_text("my return, refund please");
        assert_eq!(a.intent, b.intent);
        assert_eq!(a.keywords, b.keywords);
    }
}
