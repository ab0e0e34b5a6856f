//! Terminal rendering of formatted chat content.
//!
//! Turns [`DisplayBlock`]s into plain lines with optional ANSI styling. Table
//! columns are padded by display width so CJK text and emoji line up.

use formatter::{DisplayBlock, ListItem, Span};
use unicode_width::UnicodeWidthStr;

#[cfg(test)]
#[path = "term_test.rs"]
mod tests;

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

const CODE_INDENT: &str = "    ";
const COLUMN_GAP: &str = "  ";

/// Colour is on unless disabled by flag, by a non-empty `NO_COLOR`, or
/// because stdout is not a terminal.
#[must_use]
pub fn color_enabled(no_color_flag: bool, no_color_env: Option<&str>, is_tty: bool) -> bool {
    !no_color_flag && no_color_env.is_none_or(str::is_empty) && is_tty
}

#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(self, style: &str, text: &str) -> String {
        if self.color { format!("{style}{text}{RESET}") } else { text.to_owned() }
    }

    #[must_use]
    pub fn bold(self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    #[must_use]
    pub fn dim(self, text: &str) -> String {
        self.paint(DIM, text)
    }

    #[must_use]
    pub fn error(self, text: &str) -> String {
        self.paint(RED, text)
    }

    /// Render blocks separated by one blank line. No trailing newline.
    #[must_use]
    pub fn blocks(self, blocks: &[DisplayBlock]) -> String {
        blocks.iter().map(|b| self.block(b)).collect::<Vec<_>>().join("\n\n")
    }

    #[must_use]
    pub fn block(self, block: &DisplayBlock) -> String {
        match block {
            DisplayBlock::Heading { text } => self.bold(text),
            DisplayBlock::Paragraph { spans } => self.spans(spans),
            DisplayBlock::List { items } => self.list(items),
            DisplayBlock::Table { header, rows } => self.table(header, rows),
            DisplayBlock::Code { label, text } => {
                let mut out = self.dim(label);
                for line in text.lines() {
                    out.push('\n');
                    out.push_str(CODE_INDENT);
                    out.push_str(&self.paint(CYAN, line));
                }
                out
            }
        }
    }

    /// Without colour, code spans keep their backticks so they stay visible.
    #[must_use]
    pub fn spans(self, spans: &[Span]) -> String {
        spans.iter().map(|s| self.span(s)).collect()
    }

    fn span(self, span: &Span) -> String {
        match (self.color, span.bold, span.code) {
            (true, true, false) => format!("{BOLD}{}{RESET}", span.text),
            (true, false, true) => format!("{CYAN}{}{RESET}", span.text),
            (true, true, true) => format!("{BOLD}{CYAN}{}{RESET}", span.text),
            (false, _, true) => format!("`{}`", span.text),
            _ => span.text.clone(),
        }
    }

    fn list(self, items: &[ListItem]) -> String {
        items
            .iter()
            .map(|item| format!("  {} {}", item.marker, self.spans(&item.spans)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn table(self, header: &[String], rows: &[Vec<String>]) -> String {
        let widths = column_widths(header, rows);
        let mut lines = Vec::with_capacity(rows.len() + 2);
        if !header.is_empty() {
            lines.push(self.bold(&pad_row(header, &widths)));
            let rule: Vec<String> = widths.iter().map(|w| "\u{2500}".repeat(*w)).collect();
            lines.push(self.dim(&rule.join(COLUMN_GAP)));
        }
        for row in rows {
            lines.push(pad_row(row, &widths));
        }
        lines.join("\n")
    }
}

/// Widest cell per column across header and rows; ragged rows count too.
fn column_widths(header: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        for (idx, cell) in row.iter().enumerate() {
            let width = UnicodeWidthStr::width(cell.as_str());
            match widths.get_mut(idx) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }
    widths
}

/// Left-align cells to `widths`; the last cell is not padded.
fn pad_row(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    let mut out = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        out.push_str(cell);
        if idx < last {
            let fill = widths[idx].saturating_sub(UnicodeWidthStr::width(cell.as_str()));
            out.push_str(&" ".repeat(fill));
            out.push_str(COLUMN_GAP);
        }
    }
    out
}
