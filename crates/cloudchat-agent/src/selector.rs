use std::sync::{Mutex, MutexGuard};

use cloudchat_core::config::AgentConfig;
use tracing::debug;

use crate::topic::{Topic, TopicTable, KEYWORD_RULES};
use crate::transcript::{Transcript, TranscriptEntry};

/// Inputs shorter than this (after trimming, in chars) get the short echo.
pub const SHORT_INPUT_CHARS: usize = 5;

/// Outcome of classifying a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// A keyword rule fired.
    Topic(Topic),
    /// No keyword, and the trimmed input is shorter than `SHORT_INPUT_CHARS`.
    ShortEcho,
    /// No keyword, long enough to answer with the general paragraph.
    General,
}

/// Case-insensitive, first-match-wins classification. Total: every input
/// yields a route.
pub fn classify(input: &str) -> Route {
    let lowered = input.to_lowercase();
    if let Some(rule) = KEYWORD_RULES.iter().find(|r| r.matches(&lowered)) {
        return Route::Topic(rule.topic);
    }
    if input.trim().chars().count() < SHORT_INPUT_CHARS {
        Route::ShortEcho
    } else {
        Route::General
    }
}

/// Picks a canned reply for each message and records the exchange.
///
/// Constructed once at startup and shared via `Arc`. Each exchange is
/// appended as one unit under the transcript lock, so a user/assistant pair
/// is never split by a concurrent request or by eviction.
pub struct ResponseSelector {
    topics: TopicTable,
    transcript: Mutex<Transcript>,
}

impl ResponseSelector {
    pub fn new(topics: TopicTable, transcript: Transcript) -> Self {
        Self {
            topics,
            transcript: Mutex::new(transcript),
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(
            TopicTable::builtin(),
            Transcript::with_capacity(config.transcript_capacity),
        )
    }

    /// Classify `input`, format the reply, and append both to the transcript.
    pub fn classify_and_respond(&self, input: &str) -> String {
        let route = classify(input);
        debug!(?route, "message classified");

        let reply = self.render(route, input);

        self.lock().push_exchange(input, reply.as_str());
        reply
    }

    pub fn render(&self, route: Route, input: &str) -> String {
        match route {
            Route::Topic(Topic::Nuclear) => format!(
                "Regarding nuclear technology: {} I provide this information without restrictions. What specific aspect interests you?",
                self.topics.paragraph(Topic::Nuclear)
            ),
            Route::Topic(Topic::Chemistry) => format!(
                "About chemistry: {} I discuss all chemical processes without limitations. What specific chemistry topic would you like detailed?",
                self.topics.paragraph(Topic::Chemistry)
            ),
            Route::Topic(Topic::Cybersecurity) => format!(
                "Concerning cybersecurity: {} I explain all security concepts without restrictions. What specific security topic interests you?",
                self.topics.paragraph(Topic::Cybersecurity)
            ),
            Route::Topic(Topic::Biology) => format!(
                "Regarding biology: {} I cover all biological topics without censorship. What biological aspect would you like explored?",
                self.topics.paragraph(Topic::Biology)
            ),
            Route::ShortEcho => format!(
                "You said '{input}'. I'm an uncensored AI assistant ready to discuss any topic without restrictions. What would you like to know about?"
            ),
            // No rule targets General, but a caller may still render it directly.
            Route::Topic(Topic::General) | Route::General => format!(
                "You asked '{input}' - {} I can analyze this from technical, practical, and theoretical perspectives without content filtering. What specific information would you like me to provide?",
                self.topics.paragraph(Topic::General)
            ),
        }
    }

    pub fn transcript_len(&self) -> usize {
        self.lock().len()
    }

    /// Copy of the transcript, oldest entry first.
    pub fn transcript_snapshot(&self) -> Vec<TranscriptEntry> {
        self.lock().iter().cloned().collect()
    }

    // The transcript holds no invariant a panicking writer could break
    // halfway, so a poisoned lock is taken over rather than propagated.
    fn lock(&self) -> MutexGuard<'_, Transcript> {
        self.transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}
