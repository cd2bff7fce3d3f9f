//! Keyword chat responder.
//!
//! Matching is plain substring containment on the lowercased question, so
//! "fertilizers" hits `fertilizer` and "dewatering" hits `watering`. Clients
//! depend on that, keep it.

use serde::Serialize;

/// Returned when no topic keyword appears in the question.
pub const DEFAULT_RESPONSE: &str =
    "I recommend consulting with local agricultural experts for specific advice tailored to your farm.";

/// A topic the chatbot has a canned answer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatTopic {
    Fertilizer,
    Watering,
    Pesticide,
    Weather,
}

impl ChatTopic {
    /// Match order. The first keyword found in the question wins.
    pub const ORDER: [ChatTopic; 4] = [
        ChatTopic::Fertilizer,
        ChatTopic::Watering,
        ChatTopic::Pesticide,
        ChatTopic::Weather,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            ChatTopic::Fertilizer => "fertilizer",
            ChatTopic::Watering => "watering",
            ChatTopic::Pesticide => "pesticide",
            ChatTopic::Weather => "weather",
        }
    }

    pub const fn response(self) -> &'static str {
        match self {
            ChatTopic::Fertilizer => {
                "For balanced nutrition, use NPK 10:10:10. Adjust based on soil test results."
            }
            ChatTopic::Watering => {
                "Water deeply 2-3 times per week. Avoid overwatering to prevent root rot."
            }
            ChatTopic::Pesticide => {
                "Use neem oil as organic pesticide. For severe infections, consult local experts."
            }
            ChatTopic::Weather => {
                "Check local weather forecasts. Protect plants during extreme conditions."
            }
        }
    }

    /// First topic, in [`ChatTopic::ORDER`], whose keyword occurs in the question.
    pub fn detect(question: &str) -> Option<Self> {
        let question = question.to_lowercase();
        Self::ORDER
            .into_iter()
            .find(|topic| question.contains(topic.keyword()))
    }
}

/// Answer a free-text question with a canned response.
pub fn respond(question: &str) -> &'static str {
    ChatTopic::detect(question).map_or(DEFAULT_RESPONSE, ChatTopic::response)
}
