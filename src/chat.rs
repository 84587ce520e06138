//! Conversation state and the turn orchestrator.
//!
//! [`ChatSession`] owns the ordered message log plus the two transient
//! flags (`is_loading`, `error`) and is the only component allowed to
//! mutate them. A turn runs the state machine
//! `idle → awaiting_response → idle`: append the user message, build the
//! grounded prompt, call the completion client once, fold the result back
//! as a model message. Failures become one fixed user-facing sentence;
//! the underlying cause goes to the diagnostic log only.
//!
//! Single-flight: at most one request may be in flight. Submissions while
//! `is_loading` is set are ignored without touching any state — the
//! explicit boolean gate the disabled-input UI affordance becomes in a
//! non-reactive setting.

use crate::completion::{CompletionClient, CompletionError};
use crate::prompt::build_prompt;

/// Greeting seeded as the first model message of every session.
pub const GREETING: &str = "Welcome! I am your smart assistant. How can I help you today? \
You can add files or text to the knowledge base first, then ask me anything.";

/// Model message substituted when the endpoint returns no usable text.
pub const EMPTY_REPLY: &str = "I could not generate a response. Please try again.";

/// The single fixed sentence shown for any completion failure.
pub const FAILURE_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// One entry in the conversation log. Immutable once appended; insertion
/// order is display order.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// How a submitted turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A request was already in flight; the submission was dropped.
    Ignored,
    /// The input was blank; nothing was sent.
    Rejected,
    /// A model reply (possibly the fixed fallback) was appended.
    Replied,
    /// The completion failed; the fixed failure sentence was appended.
    Failed,
}

/// Conversation log plus transient turn flags.
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<Message>,
    is_loading: bool,
    error: Option<String>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Start a session seeded with the fixed greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message {
                role: Role::Model,
                content: GREETING.to_string(),
            }],
            is_loading: false,
            error: None,
        }
    }

    /// The full conversation log, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True while a completion request is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The failure sentence from the last turn, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Transition `idle → awaiting_response`.
    ///
    /// Appends the user message, raises the loading gate, clears any
    /// previous error, and returns the built prompt. Returns `None` — with
    /// no state change at all — when a request is already in flight or the
    /// input is blank after trimming.
    pub fn begin_turn(&mut self, user_input: &str, knowledge_base: &str) -> Option<String> {
        if self.is_loading || user_input.trim().is_empty() {
            return None;
        }
        self.messages.push(Message {
            role: Role::User,
            content: user_input.to_string(),
        });
        self.is_loading = true;
        self.error = None;
        Some(build_prompt(user_input, knowledge_base))
    }

    /// Transition `awaiting_response → idle`.
    ///
    /// Folds the completion result into the log. Whitespace-only replies
    /// count as missing text. `is_loading` is lowered on every path.
    pub fn complete_turn(
        &mut self,
        result: Result<Option<String>, CompletionError>,
    ) -> TurnOutcome {
        let outcome = match result {
            Ok(Some(text)) if !text.trim().is_empty() => {
                self.messages.push(Message {
                    role: Role::Model,
                    content: text,
                });
                TurnOutcome::Replied
            }
            Ok(_) => {
                self.messages.push(Message {
                    role: Role::Model,
                    content: EMPTY_REPLY.to_string(),
                });
                TurnOutcome::Replied
            }
            Err(e) => {
                tracing::error!(error = %e, "completion request failed");
                self.error = Some(FAILURE_REPLY.to_string());
                self.messages.push(Message {
                    role: Role::Model,
                    content: FAILURE_REPLY.to_string(),
                });
                TurnOutcome::Failed
            }
        };
        self.is_loading = false;
        outcome
    }

    /// Run one full turn against `client`.
    pub async fn send(
        &mut self,
        client: &dyn CompletionClient,
        user_input: &str,
        knowledge_base: &str,
    ) -> TurnOutcome {
        let Some(prompt) = self.begin_turn(user_input, knowledge_base) else {
            return if self.is_loading {
                TurnOutcome::Ignored
            } else {
                TurnOutcome::Rejected
            };
        };
        let result = client.complete(&prompt).await;
        self.complete_turn(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_starts_with_the_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Model);
        assert_eq!(session.messages()[0].content, GREETING);
        assert!(!session.is_loading());
        assert!(session.error().is_none());
    }

    #[test]
    fn begin_turn_appends_user_message_and_raises_gate() {
        let mut session = ChatSession::new();
        let prompt = session.begin_turn("What are your hours?", "").unwrap();
        assert!(prompt.contains("What are your hours?"));
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].role, Role::User);
        assert!(session.is_loading());
    }

    #[test]
    fn blank_input_never_starts_a_turn() {
        let mut session = ChatSession::new();
        assert!(session.begin_turn("   \t\n", "kb").is_none());
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_loading());
    }

    #[test]
    fn second_submission_while_in_flight_is_a_no_op() {
        let mut session = ChatSession::new();
        assert!(session.begin_turn("first", "").is_some());
        assert!(session.begin_turn("second", "").is_none());
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn whitespace_only_reply_becomes_the_fallback() {
        let mut session = ChatSession::new();
        session.begin_turn("hello", "").unwrap();
        let outcome = session.complete_turn(Ok(Some("  \n".to_string())));
        assert_eq!(outcome, TurnOutcome::Replied);
        assert_eq!(session.messages().last().unwrap().content, EMPTY_REPLY);
        assert!(!session.is_loading());
    }

    #[test]
    fn missing_reply_becomes_the_fallback() {
        let mut session = ChatSession::new();
        session.begin_turn("hello", "").unwrap();
        session.complete_turn(Ok(None));
        assert_eq!(session.messages().last().unwrap().content, EMPTY_REPLY);
    }

    #[test]
    fn failure_sets_error_and_appends_the_same_sentence() {
        let mut session = ChatSession::new();
        session.begin_turn("hello", "").unwrap();
        let outcome = session.complete_turn(Err(CompletionError::Api {
            status: 500,
            body: "internal".to_string(),
        }));
        assert_eq!(outcome, TurnOutcome::Failed);
        assert_eq!(session.error(), Some(FAILURE_REPLY));
        assert_eq!(session.messages().last().unwrap().content, FAILURE_REPLY);
        assert!(!session.is_loading());
    }

    #[test]
    fn next_turn_clears_the_error_flag() {
        let mut session = ChatSession::new();
        session.begin_turn("hello", "").unwrap();
        session.complete_turn(Err(CompletionError::MissingCredential));
        assert!(session.error().is_some());
        session.begin_turn("again", "").unwrap();
        assert!(session.error().is_none());
    }
}
