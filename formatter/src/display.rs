//! Display elements: content blocks with inline formatting applied.
//!
//! This is the last step before a UI layer draws anything. List markers are
//! regenerated here (sequential numerals or a fixed bullet), so the glyphs a
//! message used in its source never reach the screen.

use serde::Serialize;

use crate::inline::{Span, format_inline};
use crate::render::ContentBlock;

#[cfg(test)]
#[path = "display_test.rs"]
mod tests;

/// Bullet shown for unordered list items.
pub const BULLET: &str = "\u{2022}";

/// Label shown above every code block.
pub const CODE_LABEL: &str = "Code";

/// A block ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayBlock {
    Heading { text: String },
    Paragraph { spans: Vec<Span> },
    List { items: Vec<ListItem> },
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
    Code { label: &'static str, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub marker: String,
    pub spans: Vec<Span>,
}

#[must_use]
pub fn display(block: &ContentBlock) -> DisplayBlock {
    match block {
        ContentBlock::Heading { text } => DisplayBlock::Heading { text: text.clone() },
        ContentBlock::Paragraph { text } => DisplayBlock::Paragraph { spans: format_inline(text) },
        ContentBlock::CodeBlock { raw_text } => {
            DisplayBlock::Code { label: CODE_LABEL, text: raw_text.clone() }
        }
        ContentBlock::Table { .. } => DisplayBlock::Table {
            header: block.header().map(<[String]>::to_vec).unwrap_or_default(),
            rows: block.data_rows().to_vec(),
        },
        ContentBlock::List { items, ordered } => DisplayBlock::List {
            items: items
                .iter()
                .enumerate()
                .map(|(idx, item)| ListItem {
                    marker: list_marker(idx, *ordered),
                    spans: format_inline(item),
                })
                .collect(),
        },
    }
}

/// `1.`, `2.`, ... for ordered lists, [`BULLET`] otherwise.
#[must_use]
pub fn list_marker(idx: usize, ordered: bool) -> String {
    if ordered {
        format!("{}.", idx + 1)
    } else {
        BULLET.to_owned()
    }
}
