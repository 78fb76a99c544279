//! Chat controller state.
//!
//! The transcript, the single-slot in-flight marker, model selection, and
//! the suggestion panel all live here as plain state transitions; the chat
//! view drives them through a signal and performs the network calls around
//! them.

use crate::api::ApiError;
use crate::types::{ChatMessage, ChatModel, HistoryEntry};

/// Assistant turn synthesized when a send fails, keeping the 1:1 pairing
/// with its user turn instead of surfacing a raw error.
pub const SEND_ERROR_NOTICE: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub pending: bool,
    pub model: ChatModel,
    pub suggestions: Vec<String>,
    pub show_suggestions: bool,
    pub confirm_clear: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            show_suggestions: true,
            ..Self::default()
        }
    }

    /// Replace the transcript with prior turns from the backend, flattening
    /// each stored pair in chronological order.
    pub fn hydrate(&mut self, history: Vec<HistoryEntry>) {
        self.messages = history
            .into_iter()
            .flat_map(|entry| {
                [
                    ChatMessage::user(entry.user_message),
                    ChatMessage::assistant(entry.assistant_message),
                ]
            })
            .collect();
        self.show_suggestions = self.messages.is_empty();
    }

    pub fn suggestions_loaded(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
    }

    /// Start a send: trims the text, rejects blank input or a send while one
    /// is already in flight, and otherwise appends the user turn
    /// optimistically. Returns the trimmed text to put on the wire; `None`
    /// means nothing changed and no call may be issued.
    pub fn begin_send(&mut self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.pending {
            return None;
        }

        self.messages.push(ChatMessage::user(trimmed));
        self.input.clear();
        self.show_suggestions = false;
        self.pending = true;
        Some(trimmed.to_string())
    }

    /// Settle the in-flight send. Exactly one assistant turn is appended in
    /// both arms, and clearing `pending` here is the sole unlock for the
    /// next send.
    pub fn complete_send(&mut self, reply: Result<String, ApiError>) {
        let content = match reply {
            Ok(content) => content,
            Err(err) => {
                tracing::error!("chat send failed: {err}");
                SEND_ERROR_NOTICE.to_string()
            }
        };
        self.messages.push(ChatMessage::assistant(content));
        self.pending = false;
    }

    /// First step of the clear-history gate; no backend call happens until
    /// the confirmation is accepted.
    pub fn request_clear(&mut self) {
        self.confirm_clear = true;
    }

    pub fn cancel_clear(&mut self) {
        self.confirm_clear = false;
    }

    /// Backend delete succeeded: drop the transcript and bring the
    /// suggestion panel back.
    pub fn history_cleared(&mut self) {
        self.messages.clear();
        self.show_suggestions = true;
        self.confirm_clear = false;
    }

    /// Backend delete failed: the transcript stays untouched.
    pub fn clear_failed(&mut self) {
        self.confirm_clear = false;
    }

    /// Local only; applies to the next send.
    pub fn select_model(&mut self, model: ChatModel) {
        self.model = model;
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn blank_send_is_rejected() {
        let mut state = ChatState::new();
        assert_eq!(state.begin_send(""), None);
        assert_eq!(state.begin_send("   "), None);
        assert!(state.messages.is_empty());
        assert!(!state.pending);
    }

    #[test]
    fn second_send_blocked_until_first_settles() {
        let mut state = ChatState::new();
        assert_eq!(state.begin_send("first"), Some("first".to_string()));
        assert_eq!(state.begin_send("second"), None);
        assert_eq!(state.messages.len(), 1);

        state.complete_send(Ok("reply".into()));
        assert_eq!(state.begin_send("second"), Some("second".to_string()));
    }

    #[test]
    fn pairing_holds_across_successes_and_failures() {
        let mut state = ChatState::new();
        let outcomes: [Result<String, ApiError>; 3] = [
            Ok("fine".into()),
            Err(ApiError::Rejected),
            Ok("also fine".into()),
        ];
        for (i, outcome) in outcomes.into_iter().enumerate() {
            state.begin_send(&format!("turn {i}")).unwrap();
            state.complete_send(outcome);
        }

        assert_eq!(state.messages.len(), 6);
        for (i, msg) in state.messages.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(msg.role, expected);
        }
        assert_eq!(state.messages[3].content, SEND_ERROR_NOTICE);
        assert!(!state.pending);
    }

    #[test]
    fn send_trims_and_clears_input() {
        let mut state = ChatState::new();
        state.input = "  hello  ".into();
        let wire = state.begin_send("  hello  ").unwrap();
        assert_eq!(wire, "hello");
        assert_eq!(state.messages[0].content, "hello");
        assert!(state.input.is_empty());
        assert!(!state.show_suggestions);
    }

    #[test]
    fn hydrate_flattens_pairs_in_order() {
        let mut state = ChatState::new();
        state.hydrate(vec![
            HistoryEntry {
                user_message: "q1".into(),
                assistant_message: "a1".into(),
            },
            HistoryEntry {
                user_message: "q2".into(),
                assistant_message: "a2".into(),
            },
        ]);
        let contents: Vec<&str> = state.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["q1", "a1", "q2", "a2"]);
        assert!(!state.show_suggestions);
    }

    #[test]
    fn hydrate_empty_shows_suggestions() {
        let mut state = ChatState::new();
        state.show_suggestions = false;
        state.hydrate(Vec::new());
        assert!(state.show_suggestions);
    }

    #[test]
    fn clear_requires_confirmation() {
        let mut state = ChatState::new();
        state.begin_send("keep me").unwrap();
        state.complete_send(Ok("kept".into()));

        state.request_clear();
        state.cancel_clear();
        assert_eq!(state.messages.len(), 2);

        state.request_clear();
        state.history_cleared();
        assert!(state.messages.is_empty());
        assert!(state.show_suggestions);
        assert!(!state.confirm_clear);
    }

    #[test]
    fn failed_clear_leaves_transcript() {
        let mut state = ChatState::new();
        state.begin_send("keep me").unwrap();
        state.complete_send(Ok("kept".into()));

        state.request_clear();
        state.clear_failed();
        assert_eq!(state.messages.len(), 2);
        assert!(!state.confirm_clear);
    }

    #[test]
    fn model_change_applies_to_next_send_only() {
        let mut state = ChatState::new();
        state.begin_send("with default").unwrap();
        state.select_model(ChatModel::GeminiFlash);
        assert_eq!(state.model, ChatModel::GeminiFlash);
        // The already-appended turn is untouched by the selection.
        assert_eq!(state.messages.len(), 1);
    }
}
