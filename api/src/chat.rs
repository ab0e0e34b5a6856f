//! Chat transcript and the session that owns it.
//!
//! DESIGN
//! ======
//! The transcript is append-only: messages are created on send (user) or on
//! receipt (assistant) and never edited. Loading history replaces it
//! wholesale; clearing empties it only after the server agrees. A send always
//! produces exactly one assistant message, even on failure, so the
//! conversation never ends on an unanswered user line.
//!
//! The backend sits behind [`ChatBackend`] so the session can be driven by an
//! in-memory fake in tests.

use std::fmt;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::HistoryEntry;

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

/// Shown instead of a reply when a send fails without a server message.
pub const SEND_FAILURE: &str = "Sorry, I encountered an error. Please try again.";

/// Starter prompts offered on an empty transcript.
pub const SUGGESTIONS: [&str; 4] = [
    "Show me my career snapshot",
    "What should I learn next?",
    "Help me prepare for interviews",
    "Review my current progress",
];

// =============================================================================
// MESSAGES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Anything the backend does not label `user` is the assistant speaking.
    #[must_use]
    pub fn from_wire(role: &str) -> Self {
        if role.eq_ignore_ascii_case("user") { Self::User } else { Self::Assistant }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: OffsetDateTime,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), role, content: content.into(), timestamp: OffsetDateTime::now_utc() }
    }
}

impl From<HistoryEntry> for Message {
    fn from(entry: HistoryEntry) -> Self {
        Self::new(Role::from_wire(&entry.role), entry.content)
    }
}

/// Assistant text for a failed send.
#[must_use]
pub fn failure_text(err: &ApiError) -> String {
    match err.server_message() {
        Some(message) => format!("Error: {message}"),
        None => SEND_FAILURE.to_owned(),
    }
}

// =============================================================================
// BACKEND SEAM
// =============================================================================

#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one user message and return the assistant's reply.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the backend cannot be reached or rejects
    /// the message.
    async fn send(&self, message: &str) -> Result<String, ApiError>;

    /// Stored transcript, oldest first.
    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError>;

    /// Drop the stored transcript.
    async fn clear(&self) -> Result<(), ApiError>;
}

#[async_trait::async_trait]
impl ChatBackend for ApiClient {
    async fn send(&self, message: &str) -> Result<String, ApiError> {
        self.send_chat(message).await
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.chat_history().await
    }

    async fn clear(&self) -> Result<(), ApiError> {
        self.clear_chat_history().await
    }
}

// =============================================================================
// SESSION
// =============================================================================

pub struct ChatSession<B> {
    backend: B,
    messages: Vec<Message>,
    session_expired: bool,
    last_error: Option<ApiError>,
}

impl<B: ChatBackend> ChatSession<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, messages: Vec::new(), session_expired: false, last_error: None }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replace the transcript with the server's history. On failure the
    /// transcript is left as it was and the error is only logged.
    pub async fn load_history(&mut self) {
        match self.backend.history().await {
            Ok(entries) => {
                self.messages = entries.into_iter().map(Message::from).collect();
                tracing::debug!(count = self.messages.len(), "chat history loaded");
            }
            Err(e) => {
                self.note_error(&e);
                tracing::warn!(error = %e, "failed to load chat history");
            }
        }
    }

    /// Append the user's message and exactly one assistant message.
    ///
    /// Blank input is ignored and returns `None`; otherwise the returned
    /// message is the assistant's reply or the failure text. A failure is
    /// also kept for [`Self::last_error`] until the next send.
    pub async fn send(&mut self, input: &str) -> Option<&Message> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        self.messages.push(Message::new(Role::User, text));
        self.last_error = None;

        let reply = match self.backend.send(text).await {
            Ok(reply) => reply,
            Err(e) => {
                self.note_error(&e);
                tracing::warn!(error = %e, "chat send failed");
                let text = failure_text(&e);
                self.last_error = Some(e);
                text
            }
        };
        self.messages.push(Message::new(Role::Assistant, reply));
        self.messages.last()
    }

    /// Clear server history, then the local transcript.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the local transcript is kept in that case.
    pub async fn clear(&mut self) -> Result<(), ApiError> {
        if let Err(e) = self.backend.clear().await {
            self.note_error(&e);
            return Err(e);
        }
        self.messages.clear();
        Ok(())
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether any call so far was rejected for authentication.
    #[must_use]
    pub fn session_expired(&self) -> bool {
        self.session_expired
    }

    /// Error behind the most recent send, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    pub fn take_last_error(&mut self) -> Option<ApiError> {
        self.last_error.take()
    }

    fn note_error(&mut self, err: &ApiError) {
        if err.is_auth() {
            self.session_expired = true;
        }
    }
}
