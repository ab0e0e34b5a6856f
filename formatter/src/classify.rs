//! Per-line classification for assistant message content.
//!
//! Every decision here looks at a single trimmed line, except table
//! detection which needs the following line as well: a table only starts
//! when two consecutive lines both carry the cell delimiter.

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;

/// Cell delimiter for pipe tables.
pub const DELIMITER: char = '|';

/// Code fence marker.
pub const FENCE: &str = "```";

/// Bold marker, also used to wrap a whole line as a heading.
pub const BOLD: &str = "**";

/// Pictographic lead characters that turn a line into a heading.
pub const EMOJI_LEADS: [char; 8] = [
    '\u{1F44B}', // waving hand
    '\u{1F680}', // rocket
    '\u{1F4CA}', // bar chart
    '\u{1F4A1}', // light bulb
    '\u{2728}',  // sparkles
    '\u{1F3AF}', // direct hit
    '\u{1F4D8}', // blue book
    '\u{2705}',  // check mark button
];

/// What a line starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Table,
    CodeFence,
    Heading,
    EmojiHeading,
    ListItem,
    Blank,
    Plain,
}

/// Classify `line`, using `next` as lookahead for table detection.
///
/// Never fails: anything unrecognized is [`LineKind::Plain`].
#[must_use]
pub fn classify(line: &str, next: Option<&str>) -> LineKind {
    if has_delimiter(line) && next.is_some_and(has_delimiter) {
        return LineKind::Table;
    }
    if is_code_fence(line) {
        return LineKind::CodeFence;
    }
    if is_heading_start(line) {
        return LineKind::Heading;
    }
    if is_emoji_heading(line) {
        return LineKind::EmojiHeading;
    }
    if is_list_item(line) {
        return LineKind::ListItem;
    }
    if is_blank(line) {
        return LineKind::Blank;
    }
    LineKind::Plain
}

#[must_use]
pub fn has_delimiter(line: &str) -> bool {
    line.contains(DELIMITER)
}

#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[must_use]
pub fn is_code_fence(line: &str) -> bool {
    line.trim().starts_with(FENCE)
}

/// `#`-prefixed lines, or a line entirely wrapped in one bold pair.
#[must_use]
pub fn is_heading_start(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('#') || is_bold_wrapped(trimmed)
}

/// `**Title**` qualifies; `**bold** and more` does not.
fn is_bold_wrapped(trimmed: &str) -> bool {
    let Some(inner) = trimmed
        .strip_prefix(BOLD)
        .and_then(|rest| rest.strip_suffix(BOLD))
    else {
        return false;
    };
    !inner.trim().is_empty() && !inner.contains(BOLD)
}

#[must_use]
pub fn is_emoji_heading(line: &str) -> bool {
    line.trim()
        .chars()
        .next()
        .is_some_and(|first| EMOJI_LEADS.contains(&first))
}

/// Bulleted (`- `, `• `, `* `) or numbered (`1. `) list item.
#[must_use]
pub fn is_list_item(line: &str) -> bool {
    is_bullet_item(line) || is_ordered_item(line)
}

#[must_use]
pub fn is_bullet_item(line: &str) -> bool {
    let mut chars = line.trim().chars();
    matches!(chars.next(), Some('-' | '\u{2022}' | '*'))
        && chars.next().is_some_and(char::is_whitespace)
}

/// Decimal number, a period, then whitespace.
#[must_use]
pub fn is_ordered_item(line: &str) -> bool {
    let trimmed = line.trim();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return false;
    }
    let mut rest = trimmed[digits..].chars();
    rest.next() == Some('.') && rest.next().is_some_and(char::is_whitespace)
}
