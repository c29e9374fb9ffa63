//! Per-session conversation state.
//!
//! The conversation log is an explicit state object passed into the shell's
//! handler, not a process-wide global. It lives for exactly one session and
//! is never persisted.

use serde::{Deserialize, Serialize};

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Display label used when rendering the transcript.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Assistant",
        }
    }
}

/// One rendered transcript line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// The ordered, prepend-growing conversation log for one session.
///
/// Each successful exchange adds two entries at the head, so the log reads
/// newest-first: [assistant2, user2, assistant1, user1]. The log also
/// carries the service session token so follow-up questions keep their
/// multi-turn context.
#[derive(Debug, Default)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
    session_id: Option<String>,
}

impl Conversation {
    /// Start an empty conversation with no service session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript entries, newest exchange first.
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The current service session token, if any exchange established one.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Adopt the session token returned by the service.
    pub fn set_session_id(&mut self, session_id: impl Into<String>) {
        self.session_id = Some(session_id.into());
    }

    /// Record one successful exchange at the head of the log.
    ///
    /// Inserts the user entry, then the assistant entry above it, so the
    /// assistant's reply is the newest line.
    pub fn record_exchange(&mut self, question: &str, display_text: &str) {
        self.entries.insert(
            0,
            ConversationEntry {
                speaker: Speaker::User,
                text: question.to_string(),
            },
        );
        self.entries.insert(
            0,
            ConversationEntry {
                speaker: Speaker::Assistant,
                text: display_text.to_string(),
            },
        );
    }

    /// Drop all entries and the session token.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.session_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_conversation_is_empty() {
        let conversation = Conversation::new();
        assert!(conversation.is_empty());
        assert!(conversation.session_id().is_none());
    }

    #[test]
    fn test_exchange_order_is_newest_first() {
        let mut conversation = Conversation::new();
        conversation.record_exchange("first question", "first answer");
        conversation.record_exchange("second question", "second answer");

        assert_eq!(conversation.len(), 4);

        let entries = conversation.entries();
        assert_eq!(entries[0].speaker, Speaker::Assistant);
        assert_eq!(entries[0].text, "second answer");
        assert_eq!(entries[1].speaker, Speaker::User);
        assert_eq!(entries[1].text, "second question");
        assert_eq!(entries[2].speaker, Speaker::Assistant);
        assert_eq!(entries[2].text, "first answer");
        assert_eq!(entries[3].speaker, Speaker::User);
        assert_eq!(entries[3].text, "first question");
    }

    #[test]
    fn test_clear_drops_entries_and_session() {
        let mut conversation = Conversation::new();
        conversation.record_exchange("question", "answer");
        conversation.set_session_id("session-1");

        conversation.clear();
        assert!(conversation.is_empty());
        assert!(conversation.session_id().is_none());
    }

    #[test]
    fn test_speaker_labels() {
        assert_eq!(Speaker::User.label(), "You");
        assert_eq!(Speaker::Assistant.label(), "Assistant");
    }
}
