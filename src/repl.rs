//! Interactive chat view.
//!
//! Reads one line at a time and drives a [`ChatSession`]. Slash commands
//! are handled locally; everything else is sent to the assistant. User lines
//! are echoed verbatim, assistant lines go through the formatter.

use std::io::Write;

use api::{ChatBackend, ChatSession, Message, Role, SUGGESTIONS};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::CliError;
use crate::term::Painter;

#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

const PROMPT: &str = "you> ";
const THINKING: &str = "Thinking...";
const EXPIRED: &str = "Your session has expired. Run `career-ai login` and try again.";

const HELP: &str = "\
Commands:
  /1 .. /4   send a suggested prompt
  /clear     clear the conversation
  /help      show this help
  /quit      leave the chat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Message(String),
    /// Zero-based index into [`SUGGESTIONS`].
    Suggestion(usize),
    Clear,
    Help,
    Quit,
    Unknown(String),
}

#[must_use]
pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return Input::Message(line.to_owned());
    };
    match command.to_ascii_lowercase().as_str() {
        "clear" => Input::Clear,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if (1..=SUGGESTIONS.len()).contains(&n) => Input::Suggestion(n - 1),
            _ => Input::Unknown(line.to_owned()),
        },
    }
}

/// Greeting shown on an empty transcript, with numbered suggestions.
#[must_use]
pub fn greeting(painter: Painter, first_name: &str) -> String {
    let mut out = painter.bold(&format!("Hi {first_name}! \u{1F44B}"));
    out.push_str(
        "\nI'm your AI Career Companion. I can help you with career planning, skill development, \
         interview prep, resume reviews, and strategic guidance tailored to your goals.\n",
    );
    for (idx, suggestion) in SUGGESTIONS.iter().enumerate() {
        out.push_str(&format!("\n  {} {suggestion}", painter.dim(&format!("/{}", idx + 1))));
    }
    out
}

/// One transcript entry as terminal text.
#[must_use]
pub fn format_message(painter: Painter, message: &Message) -> String {
    match message.role {
        Role::User => format!("{} {}", painter.dim("you:"), message.content),
        Role::Assistant => {
            let body = painter.blocks(&formatter::render_message(&message.content));
            format!("{}\n{body}", painter.bold("assistant:"))
        }
    }
}

/// Run the chat loop until `/quit` or end of input.
///
/// # Errors
///
/// Returns [`CliError::Io`] when reading input or writing output fails.
/// Backend failures are shown inline and never end the loop.
pub async fn run<B, R, W>(
    session: &mut ChatSession<B>,
    painter: Painter,
    first_name: &str,
    input: R,
    out: &mut W,
) -> Result<(), CliError>
where
    B: ChatBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    session.load_history().await;
    if session.is_empty() {
        writeln!(out, "{}", greeting(painter, first_name))?;
    } else {
        for message in session.messages() {
            writeln!(out, "{}\n", format_message(painter, message))?;
        }
    }
    warn_if_expired(session, painter, out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "\n{}", painter.bold(PROMPT))?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let text = match parse_input(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Input::Unknown(command) => {
                writeln!(out, "{}", painter.error(&format!("unknown command {command}; try /help")))?;
                continue;
            }
            Input::Clear => {
                match session.clear().await {
                    Ok(()) => writeln!(out, "{}", greeting(painter, first_name))?,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to clear chat");
                        writeln!(out, "{}", painter.error(&format!("Failed to clear chat: {e}")))?;
                    }
                }
                warn_if_expired(session, painter, out)?;
                continue;
            }
            Input::Suggestion(idx) => {
                writeln!(out, "{} {}", painter.dim("you:"), SUGGESTIONS[idx])?;
                SUGGESTIONS[idx].to_owned()
            }
            Input::Message(text) => text,
        };

        writeln!(out, "{}", painter.dim(THINKING))?;
        out.flush()?;
        if let Some(reply) = session.send(&text).await {
            writeln!(out, "{}", format_message(painter, reply))?;
        }
        warn_if_expired(session, painter, out)?;
    }
    Ok(())
}

fn warn_if_expired<B: ChatBackend, W: Write>(
    session: &ChatSession<B>,
    painter: Painter,
    out: &mut W,
) -> Result<(), CliError> {
    if session.session_expired() {
        writeln!(out, "{}", painter.error(EXPIRED))?;
    }
    Ok(())
}
