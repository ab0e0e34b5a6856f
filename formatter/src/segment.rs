//! Groups message lines into raw blocks.
//!
//! DESIGN
//! ======
//! One forward pass over the line slice with an explicit index. Each
//! iteration consumes at least one line, so the pass is linear in the number
//! of lines and always terminates. Blank lines end paragraphs and lists but
//! never produce a block of their own.

use crate::classify::{self, LineKind};

#[cfg(test)]
#[path = "segment_test.rs"]
mod tests;

/// The block type a run of lines was grouped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    Table,
    Code,
    Heading,
    List,
    Paragraph,
}

/// A run of source lines that has not been rendered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub kind: RawKind,
    pub lines: Vec<String>,
}

impl RawBlock {
    fn new(kind: RawKind, lines: Vec<&str>) -> Self {
        Self {
            kind,
            lines: lines.into_iter().map(ToOwned::to_owned).collect(),
        }
    }
}

/// Split message text into raw blocks in source order.
#[must_use]
pub fn segment(text: &str) -> Vec<RawBlock> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut pos = 0;

    while pos < lines.len() {
        let line = lines[pos];
        let next = lines.get(pos + 1).copied();

        match classify::classify(line, next) {
            LineKind::Table => {
                blocks.push(take_table(&lines, &mut pos));
            }
            LineKind::CodeFence => {
                blocks.push(take_code(&lines, &mut pos));
            }
            LineKind::Heading | LineKind::EmojiHeading => {
                blocks.push(RawBlock::new(RawKind::Heading, vec![line]));
                pos += 1;
            }
            LineKind::ListItem => {
                blocks.push(take_list(&lines, &mut pos));
            }
            LineKind::Blank => {
                pos += 1;
            }
            LineKind::Plain => {
                blocks.push(take_paragraph(&lines, &mut pos));
            }
        }
    }

    blocks
}

/// Delimited lines plus any blank lines between them; blanks are dropped.
fn take_table(lines: &[&str], pos: &mut usize) -> RawBlock {
    let mut rows = Vec::new();
    while *pos < lines.len() {
        let line = lines[*pos];
        if classify::has_delimiter(line) {
            rows.push(line);
        } else if !classify::is_blank(line) {
            break;
        }
        *pos += 1;
    }
    RawBlock::new(RawKind::Table, rows)
}

/// Interior lines up to the closing fence, or to the end of input when the
/// fence is never closed.
fn take_code(lines: &[&str], pos: &mut usize) -> RawBlock {
    *pos += 1;
    let mut body = Vec::new();
    while *pos < lines.len() && !classify::is_code_fence(lines[*pos]) {
        body.push(lines[*pos]);
        *pos += 1;
    }
    // Step over the closing fence; a no-op past the end.
    *pos += 1;
    RawBlock::new(RawKind::Code, body)
}

fn take_list(lines: &[&str], pos: &mut usize) -> RawBlock {
    let mut items = Vec::new();
    while *pos < lines.len() {
        let line = lines[*pos];
        if classify::is_list_item(line) {
            items.push(line);
        } else if !classify::is_blank(line) {
            break;
        }
        *pos += 1;
    }
    RawBlock::new(RawKind::List, items)
}

/// The first line is always taken; later lines stop at a blank line or at
/// anything that could open a table, heading, or list.
fn take_paragraph(lines: &[&str], pos: &mut usize) -> RawBlock {
    let mut body = vec![lines[*pos]];
    *pos += 1;
    while *pos < lines.len() {
        let line = lines[*pos];
        if classify::is_blank(line)
            || classify::has_delimiter(line)
            || classify::is_heading_start(line)
            || classify::is_list_item(line)
        {
            break;
        }
        body.push(line);
        *pos += 1;
    }
    RawBlock::new(RawKind::Paragraph, body)
}
