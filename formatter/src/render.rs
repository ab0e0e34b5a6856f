//! Block renderers: raw line runs into typed content blocks.

use serde::Serialize;

use crate::classify::{self, BOLD, DELIMITER};
use crate::segment::{RawBlock, RawKind};

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

/// One structurally distinct unit of message content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading { text: String },
    /// Interior lines joined by newline, unformatted.
    CodeBlock { raw_text: String },
    /// First row is the header; separator rows are already removed.
    Table { rows: Vec<Vec<String>> },
    /// Items with their bullet or number marker stripped.
    List { items: Vec<String>, ordered: bool },
    /// Source lines joined with single spaces.
    Paragraph { text: String },
}

impl ContentBlock {
    /// Header row of a table block.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        match self {
            Self::Table { rows } => rows.first().map(Vec::as_slice),
            _ => None,
        }
    }

    /// Data rows of a table block (everything after the header).
    #[must_use]
    pub fn data_rows(&self) -> &[Vec<String>] {
        match self {
            Self::Table { rows } if !rows.is_empty() => &rows[1..],
            _ => &[],
        }
    }
}

/// Render a raw block. Only tables can come back empty.
#[must_use]
pub fn render(raw: &RawBlock) -> Option<ContentBlock> {
    match raw.kind {
        RawKind::Heading => Some(render_heading(raw.lines.first().map_or("", String::as_str))),
        RawKind::Table => render_table(&raw.lines),
        RawKind::Code => Some(render_code(&raw.lines)),
        RawKind::List => Some(render_list(&raw.lines)),
        RawKind::Paragraph => Some(render_paragraph(&raw.lines)),
    }
}

/// Strip leading `#`s, then one leading bold pair.
#[must_use]
pub fn render_heading(line: &str) -> ContentBlock {
    let text = line.trim().trim_start_matches('#').trim_start();
    let text = strip_leading_bold(text);
    ContentBlock::Heading { text: text.trim().to_owned() }
}

/// `**Title** rest` becomes `Title rest`; anything else is returned as is.
fn strip_leading_bold(text: &str) -> String {
    if let Some(rest) = text.strip_prefix(BOLD) {
        if let Some(end) = rest.find(BOLD) {
            return format!("{}{}", &rest[..end], &rest[end + BOLD.len()..]);
        }
    }
    text.to_owned()
}

/// Returns `None` when no row holds a cell after separator filtering.
#[must_use]
pub fn render_table(lines: &[String]) -> Option<ContentBlock> {
    let mut rows = lines.iter().map(|line| split_cells(line));
    let header = rows.next()?;
    let data: Vec<Vec<String>> = rows.filter(|row| !is_separator_row(row)).collect();

    if header.is_empty() && data.is_empty() {
        return None;
    }

    let mut all = Vec::with_capacity(data.len() + 1);
    all.push(header);
    all.extend(data);
    Some(ContentBlock::Table { rows: all })
}

/// Trimmed, non-empty cells between delimiters.
fn split_cells(line: &str) -> Vec<String> {
    line.split(DELIMITER)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Every cell made only of `-` and `:`, as in `|---|:---:|`. A row with no
/// cells at all counts as a separator too.
fn is_separator_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.chars().all(|c| c == '-' || c == ':'))
}

#[must_use]
pub fn render_code(lines: &[String]) -> ContentBlock {
    ContentBlock::CodeBlock { raw_text: lines.join("\n") }
}

/// Ordering comes from the first item alone.
#[must_use]
pub fn render_list(lines: &[String]) -> ContentBlock {
    let ordered = lines.first().is_some_and(|first| starts_with_number(first));
    let items = lines
        .iter()
        .filter(|line| !classify::is_blank(line))
        .map(|line| strip_marker(line))
        .collect();
    ContentBlock::List { items, ordered }
}

/// Digits then a period, whitespace not required.
fn starts_with_number(line: &str) -> bool {
    let trimmed = line.trim();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && trimmed[digits..].starts_with('.')
}

/// Drop a leading bullet, then a leading `N.`, with following whitespace.
fn strip_marker(line: &str) -> String {
    let mut text = line.trim();
    if let Some(rest) = text.strip_prefix(&['-', '\u{2022}', '*'][..]) {
        text = rest.trim_start();
    }
    let digits = text.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = text[digits..].strip_prefix('.') {
            text = rest.trim_start();
        }
    }
    text.to_owned()
}

#[must_use]
pub fn render_paragraph(lines: &[String]) -> ContentBlock {
    ContentBlock::Paragraph { text: lines.join(" ") }
}
