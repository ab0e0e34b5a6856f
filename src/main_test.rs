use super::*;

use std::sync::Mutex;

use api::HistoryEntry;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("career-ai").chain(args.iter().copied())).unwrap()
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[test]
fn global_flags_apply_after_subcommand() {
    let cli = parse(&["get", "skill-gaps", "--base-url", "https://careers.test/api/", "--token", "tok", "--no-color"]);
    assert!(matches!(cli.command, Command::Get { resource: Resource::SkillGaps }));
    assert!(cli.no_color);

    let config = api_config(&cli);
    assert_eq!(config.base_url, "https://careers.test/api");
    assert_eq!(config.token.as_deref(), Some("tok"));
}

#[test]
fn timeouts_flow_into_config() {
    let cli = parse(&["--request-timeout", "5", "--connect-timeout", "2", "history"]);
    assert_eq!(api_config(&cli).timeouts, ApiTimeouts { request_secs: 5, connect_secs: 2 });
}

#[test]
fn ask_joins_words() {
    let cli = parse(&["ask", "what", "should", "I", "learn?"]);
    match cli.command {
        Command::Ask { message } => assert_eq!(message.join(" "), "what should I learn?"),
        other => panic!("expected ask, got {other:?}"),
    }
}

#[test]
fn ask_requires_a_message() {
    assert!(Cli::try_parse_from(["career-ai", "ask"]).is_err());
}

#[test]
fn unknown_resource_is_rejected() {
    let err = Cli::try_parse_from(["career-ai", "get", "payroll"]).unwrap_err();
    assert!(err.to_string().contains("payroll"));
}

#[test]
fn render_flags() {
    let cli = parse(&["render", "--input", "-", "--json"]);
    match cli.command {
        Command::Render(args) => {
            assert_eq!(args.input.as_deref(), Some(std::path::Path::new("-")));
            assert!(args.json);
        }
        other => panic!("expected render, got {other:?}"),
    }
}

#[test]
fn login_takes_email_and_optional_password() {
    let cli = parse(&["login", "--email", "sam@example.com", "--password", "pw"]);
    match cli.command {
        Command::Login(args) => {
            assert_eq!(args.email, "sam@example.com");
            assert_eq!(args.password.as_deref(), Some("pw"));
        }
        other => panic!("expected login, got {other:?}"),
    }
}

// =============================================================================
// HELPERS
// =============================================================================

#[test]
fn authed_client_requires_token() {
    let err = authed_client(ApiConfig::default()).err().unwrap();
    assert!(matches!(err, CliError::MissingToken));
    assert!(authed_client(ApiConfig::default().with_token(Some("tok".into()))).is_ok());
}

#[test]
fn invalid_base_url_surfaces_as_api_error() {
    let config = ApiConfig::new("careers.test").with_token(Some("tok".into()));
    assert!(matches!(authed_client(config), Err(CliError::Api(ApiError::Config(_)))));
}

#[test]
fn read_input_from_file() {
    let path = std::env::temp_dir().join(format!("career-ai-render-{}.md", std::process::id()));
    std::fs::write(&path, "# Title\n").unwrap();
    assert_eq!(read_input(Some(&path)).unwrap(), "# Title\n");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn read_input_missing_file_is_io_error() {
    let path = std::path::Path::new("/definitely/not/here.md");
    assert!(matches!(read_input(Some(path)), Err(CliError::Io(_))));
}

// =============================================================================
// ASK
// =============================================================================

struct QueuedBackend {
    replies: Mutex<Vec<Result<String, ApiError>>>,
}

impl QueuedBackend {
    fn new(replies: Vec<Result<String, ApiError>>) -> Self {
        Self { replies: Mutex::new(replies) }
    }
}

#[async_trait::async_trait]
impl ChatBackend for QueuedBackend {
    async fn send(&self, _message: &str) -> Result<String, ApiError> {
        self.replies.lock().unwrap().remove(0)
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        Ok(Vec::new())
    }

    async fn clear(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

async fn ask_with(reply: Result<String, ApiError>) -> (Result<(), CliError>, String) {
    let mut session = ChatSession::new(QueuedBackend::new(vec![reply]));
    let mut out = Vec::new();
    let result = ask(&mut session, "what next?", Painter::new(false), &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn ask_prints_formatted_reply() {
    let (result, out) = ask_with(Ok("**Learn** SQL".into())).await;
    assert!(result.is_ok());
    assert_eq!(out, "Learn SQL\n");
}

#[tokio::test]
async fn ask_fails_on_server_error_after_printing_it() {
    let (result, out) = ask_with(Err(ApiError::Status { status: 502, message: Some("model offline".into()) })).await;
    assert_eq!(out, "Error: model offline\n");
    assert!(matches!(result, Err(CliError::Api(ApiError::Status { status: 502, .. }))));
}

#[tokio::test]
async fn ask_fails_on_transport_error() {
    let (result, out) = ask_with(Err(ApiError::Request("connection refused".into()))).await;
    assert_eq!(out, format!("{}\n", api::chat::SEND_FAILURE));
    assert!(matches!(result, Err(CliError::Api(ApiError::Request(_)))));
}

#[tokio::test]
async fn ask_fails_on_expired_session() {
    let (result, _) = ask_with(Err(ApiError::Unauthorized)).await;
    assert!(matches!(result, Err(CliError::Api(ApiError::Unauthorized))));
}

#[tokio::test]
async fn ask_rejects_blank_message() {
    let mut session = ChatSession::new(QueuedBackend::new(Vec::new()));
    let mut out = Vec::new();
    let result = ask(&mut session, "   ", Painter::new(false), &mut out).await;
    assert!(matches!(result, Err(CliError::MissingInput("message"))));
    assert!(out.is_empty());
}
