use super::*;

use std::sync::Mutex;

// =============================================================================
// MockBackend
// =============================================================================

#[derive(Default)]
struct MockBackend {
    replies: Mutex<Vec<Result<String, ApiError>>>,
    history: Mutex<Option<Result<Vec<HistoryEntry>, ApiError>>>,
    clear_result: Mutex<Option<ApiError>>,
    sent: Mutex<Vec<String>>,
}

impl MockBackend {
    fn replying(replies: Vec<Result<String, ApiError>>) -> Self {
        Self { replies: Mutex::new(replies), ..Self::default() }
    }
}

#[async_trait::async_trait]
impl ChatBackend for MockBackend {
    async fn send(&self, message: &str) -> Result<String, ApiError> {
        self.sent.lock().unwrap().push(message.to_owned());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(ApiError::Request("no reply queued".into()));
        }
        replies.remove(0)
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.history.lock().unwrap().take().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn clear(&self) -> Result<(), ApiError> {
        match self.clear_result.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn entry(role: &str, content: &str) -> HistoryEntry {
    HistoryEntry { role: role.into(), content: content.into() }
}

// =============================================================================
// MESSAGES
// =============================================================================

#[test]
fn messages_get_unique_ids() {
    let a = Message::new(Role::User, "hi");
    let b = Message::new(Role::User, "hi");
    assert_ne!(a.id, b.id);
}

#[test]
fn role_from_wire() {
    assert_eq!(Role::from_wire("user"), Role::User);
    assert_eq!(Role::from_wire("USER"), Role::User);
    assert_eq!(Role::from_wire("assistant"), Role::Assistant);
    assert_eq!(Role::from_wire("system"), Role::Assistant);
}

#[test]
fn failure_text_prefers_server_message() {
    let err = ApiError::Status { status: 500, message: Some("model offline".into()) };
    assert_eq!(failure_text(&err), "Error: model offline");
    assert_eq!(failure_text(&ApiError::Request("timeout".into())), SEND_FAILURE);
}

// =============================================================================
// SEND
// =============================================================================

#[tokio::test]
async fn send_appends_user_then_assistant() {
    let mut session = ChatSession::new(MockBackend::replying(vec![Ok("**Hi** there".into())]));
    let reply = session.send("  hello  ").await.unwrap();
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.content, "**Hi** there");

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "hello");
    assert_eq!(session.backend().sent.lock().unwrap().as_slice(), ["hello"]);
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let mut session = ChatSession::new(MockBackend::default());
    assert!(session.send("   ").await.is_none());
    assert!(session.is_empty());
    assert!(session.backend().sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_send_still_appends_one_reply() {
    let mut session = ChatSession::new(MockBackend::replying(vec![
        Err(ApiError::Status { status: 502, message: Some("model offline".into()) }),
        Err(ApiError::Request("connection refused".into())),
    ]));

    session.send("one").await;
    session.send("two").await;

    let contents: Vec<&str> = session.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["one", "Error: model offline", "two", SEND_FAILURE]);
    assert!(!session.session_expired());
}

#[tokio::test]
async fn failed_send_is_kept_until_next_send() {
    let mut session = ChatSession::new(MockBackend::replying(vec![
        Err(ApiError::Status { status: 502, message: Some("model offline".into()) }),
        Ok("back".into()),
    ]));

    session.send("one").await;
    assert!(matches!(session.last_error(), Some(ApiError::Status { status: 502, .. })));

    session.send("two").await;
    assert!(session.last_error().is_none());
    assert_eq!(session.last().unwrap().content, "back");
}

#[tokio::test]
async fn take_last_error_clears_it() {
    let mut session = ChatSession::new(MockBackend::replying(vec![Err(ApiError::Request("timeout".into()))]));
    session.send("hi").await;
    assert!(matches!(session.take_last_error(), Some(ApiError::Request(_))));
    assert!(session.take_last_error().is_none());
}

#[tokio::test]
async fn blank_input_keeps_previous_error() {
    let mut session = ChatSession::new(MockBackend::replying(vec![Err(ApiError::Unauthorized)]));
    session.send("hi").await;
    session.send("  ").await;
    assert!(matches!(session.last_error(), Some(ApiError::Unauthorized)));
}

#[tokio::test]
async fn unauthorized_marks_session_expired() {
    let mut session = ChatSession::new(MockBackend::replying(vec![Err(ApiError::Unauthorized)]));
    session.send("hi").await;
    assert!(session.session_expired());
    assert_eq!(session.last().unwrap().content, SEND_FAILURE);
}

// =============================================================================
// HISTORY + CLEAR
// =============================================================================

#[tokio::test]
async fn load_history_replaces_transcript() {
    let backend = MockBackend::replying(vec![Ok("pong".into())]);
    *backend.history.lock().unwrap() = Some(Ok(vec![entry("user", "old"), entry("assistant", "reply")]));

    let mut session = ChatSession::new(backend);
    session.send("ping").await;
    session.load_history().await;

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "old");
    assert_eq!(messages[1].role, Role::Assistant);
}

#[tokio::test]
async fn failed_history_leaves_transcript() {
    let backend = MockBackend::replying(vec![Ok("pong".into())]);
    *backend.history.lock().unwrap() = Some(Err(ApiError::Request("down".into())));

    let mut session = ChatSession::new(backend);
    session.send("ping").await;
    session.load_history().await;
    assert_eq!(session.messages().len(), 2);
}

#[tokio::test]
async fn clear_empties_transcript_on_success() {
    let mut session = ChatSession::new(MockBackend::replying(vec![Ok("pong".into())]));
    session.send("ping").await;
    session.clear().await.unwrap();
    assert!(session.is_empty());
    assert!(session.last().is_none());
}

#[tokio::test]
async fn failed_clear_keeps_transcript() {
    let backend = MockBackend::replying(vec![Ok("pong".into())]);
    *backend.clear_result.lock().unwrap() = Some(ApiError::Unauthorized);

    let mut session = ChatSession::new(backend);
    session.send("ping").await;
    assert!(matches!(session.clear().await, Err(ApiError::Unauthorized)));
    assert_eq!(session.messages().len(), 2);
    assert!(session.session_expired());
}
