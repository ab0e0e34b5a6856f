//! Inline markup: `**bold**` and `` `code` `` spans.
//!
//! The bold pass runs first over the whole text, then the code pass runs
//! inside every segment the bold pass produced. Matches are lazy and
//! leftmost-first; a marker without a partner stays literal text. Nothing
//! else (links, italics, escapes) is recognized.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

#[cfg(test)]
#[path = "inline_test.rs"]
mod tests;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.*?)`").expect("code pattern is valid"));

/// A run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub code: bool,
}

impl Span {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), bold: false, code: false }
    }

    #[must_use]
    pub fn bold(text: impl Into<String>) -> Self {
        Self { text: text.into(), bold: true, code: false }
    }

    #[must_use]
    pub fn code(text: impl Into<String>) -> Self {
        Self { text: text.into(), bold: false, code: true }
    }

    #[must_use]
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.code
    }
}

/// Split `text` into styled spans. Empty input yields no spans.
#[must_use]
pub fn format_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    for (segment, bold) in split_marked(&BOLD_RE, text) {
        for (piece, code) in split_marked(&CODE_RE, segment) {
            spans.push(Span { text: piece.to_owned(), bold, code });
        }
    }
    spans
}

/// Concatenate the visible text of `spans`, dropping all styling.
#[must_use]
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

/// Alternate unmatched and matched pieces of `text`; matched pieces carry
/// the captured inner text. Empty unmatched pieces are skipped.
fn split_marked<'a>(re: &Regex, text: &'a str) -> Vec<(&'a str, bool)> {
    let mut out = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push((&text[last..whole.start()], false));
        }
        out.push((inner.as_str(), true));
        last = whole.end();
    }
    if last < text.len() {
        out.push((&text[last..], false));
    }
    out
}
