//! `career-ai`: terminal front-end for the Career AI backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Talks to the REST backend through the `api` crate and renders assistant
//! replies with the `formatter` crate. Rendered output goes to stdout; logs
//! go to stderr so output stays pipeable.

mod repl;
mod term;

use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use api::{ApiClient, ApiConfig, ApiError, ApiTimeouts, ChatBackend, ChatSession, Message, Resource};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tokio::io::BufReader;

use crate::term::Painter;

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("not logged in; pass --token or set CAREER_AUTH_TOKEN (run `career-ai login` to get one)")]
    MissingToken,
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing value for {0}")]
    MissingInput(&'static str),
}

#[derive(Parser, Debug)]
#[command(name = "career-ai", about = "Career AI coach in the terminal")]
struct Cli {
    #[arg(long, global = true, env = "CAREER_API_URL", default_value = api::config::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, global = true, env = "CAREER_AUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Whole-request timeout in seconds.
    #[arg(long, global = true, default_value_t = api::config::DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout: u64,

    #[arg(long, global = true, default_value_t = api::config::DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout: u64,

    /// Disable ANSI colours (also honoured via NO_COLOR).
    #[arg(long, global = true)]
    no_color: bool,

    /// Log requests to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the issued token.
    Login(LoginArgs),
    /// Create an account and print the issued token.
    Register(RegisterArgs),
    Me,
    Logout,
    /// Interactive chat with the career assistant.
    Chat,
    /// Send one message and print the formatted reply.
    Ask {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Print the stored chat transcript.
    History,
    /// Clear the stored chat transcript.
    Clear,
    /// Print a read-only listing as JSON.
    Get { resource: Resource },
    /// Format message text from a file or stdin without contacting the backend.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long, env = "CAREER_EMAIL")]
    email: String,
    /// Read from stdin when omitted.
    #[arg(long, env = "CAREER_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "CAREER_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input file; `-` or omitted reads stdin.
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// Print content blocks as JSON instead of terminal text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(level).init();

    let painter = Painter::new(term::color_enabled(
        cli.no_color,
        std::env::var("NO_COLOR").ok().as_deref(),
        io::stdout().is_terminal(),
    ));

    if let Err(e) = run(cli, painter).await {
        eprintln!("{}", painter.error(&format!("error: {e}")));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, painter: Painter) -> Result<(), CliError> {
    let config = api_config(&cli);

    match cli.command {
        Command::Render(args) => run_render(&args, painter)?,
        Command::Login(args) => {
            let password = password_or_prompt(args.password)?;
            let mut client = ApiClient::new(config)?;
            let auth = client.login(&args.email, &password).await?;
            eprintln!("Welcome back, {}!", auth.user.first_name());
            println!("{}", auth.token);
        }
        Command::Register(args) => {
            let password = password_or_prompt(args.password)?;
            let mut client = ApiClient::new(config)?;
            let auth = client.register(&args.name, &args.email, &password).await?;
            eprintln!("Welcome, {}!", auth.user.first_name());
            println!("{}", auth.token);
        }
        Command::Me => {
            let user = authed_client(config)?.me().await?;
            print_json(&serde_json::to_value(user)?)?;
        }
        Command::Logout => {
            authed_client(config)?.logout().await?;
            eprintln!("Logged out.");
        }
        Command::Chat => {
            let client = authed_client(config)?;
            let first_name = match client.me().await {
                Ok(user) => user.first_name().to_owned(),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load profile");
                    "there".to_owned()
                }
            };
            let mut session = ChatSession::new(client);
            let stdin = BufReader::new(tokio::io::stdin());
            repl::run(&mut session, painter, &first_name, stdin, &mut io::stdout()).await?;
        }
        Command::Ask { message } => {
            let mut session = ChatSession::new(authed_client(config)?);
            ask(&mut session, &message.join(" "), painter, &mut io::stdout()).await?;
        }
        Command::History => {
            let entries = authed_client(config)?.chat_history().await?;
            let mut out = io::stdout();
            for entry in entries {
                writeln!(out, "{}\n", repl::format_message(painter, &Message::from(entry)))?;
            }
        }
        Command::Clear => {
            authed_client(config)?.clear_chat_history().await?;
            eprintln!("Conversation cleared.");
        }
        Command::Get { resource } => {
            print_json(&authed_client(config)?.fetch(resource).await?)?;
        }
    }
    Ok(())
}

/// Send one message and print the reply. A failed send still prints the
/// failure text, then returns the error so the exit status reflects it.
async fn ask<B: ChatBackend, W: Write>(
    session: &mut ChatSession<B>,
    text: &str,
    painter: Painter,
    out: &mut W,
) -> Result<(), CliError> {
    let reply = session.send(text).await.ok_or(CliError::MissingInput("message"))?;
    writeln!(out, "{}", painter.blocks(&formatter::render_message(&reply.content)))?;
    match session.take_last_error() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn api_config(cli: &Cli) -> ApiConfig {
    ApiConfig::new(cli.base_url.as_str())
        .with_token(cli.token.clone())
        .with_timeouts(ApiTimeouts { request_secs: cli.request_timeout, connect_secs: cli.connect_timeout })
}

/// Client for commands that need a logged-in user.
fn authed_client(config: ApiConfig) -> Result<ApiClient, CliError> {
    if config.token.is_none() {
        return Err(CliError::MissingToken);
    }
    Ok(ApiClient::new(config)?)
}

fn password_or_prompt(password: Option<String>) -> Result<String, CliError> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let line = line.trim_end_matches(['\r', '\n']).to_owned();
    if line.is_empty() {
        return Err(CliError::MissingInput("password"));
    }
    Ok(line)
}

fn run_render(args: &RenderArgs, painter: Painter) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    if args.json {
        print_json(&serde_json::to_value(formatter::parse(&text))?)?;
    } else {
        println!("{}", painter.blocks(&formatter::render_message(&text)));
    }
    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
