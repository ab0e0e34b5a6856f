//! Chat message content formatter.
//!
//! Turns assistant-authored text with lightweight markup (headings, lists,
//! pipe tables, fenced code, `**bold**` and `` `code` ``) into an ordered
//! sequence of typed blocks.
//!
//! PIPELINE
//! ========
//! `text -> segment::segment -> RawBlock* -> render::render -> ContentBlock*
//! -> display::display -> DisplayBlock*`
//!
//! Every stage is pure and total: any input, including the empty string,
//! yields a (possibly empty) block sequence, and the same input always yields
//! the same output.

pub mod classify;
pub mod display;
pub mod inline;
pub mod render;
pub mod segment;

pub use display::{DisplayBlock, ListItem, display};
pub use inline::{Span, format_inline, plain_text};
pub use render::ContentBlock;
pub use segment::{RawBlock, RawKind, segment};

/// Parse message text into content blocks in source order.
#[must_use]
pub fn parse(text: &str) -> Vec<ContentBlock> {
    segment(text).iter().filter_map(render::render).collect()
}

/// Parse message text and apply inline formatting, ready to draw.
#[must_use]
pub fn render_message(text: &str) -> Vec<DisplayBlock> {
    parse(text).iter().map(display).collect()
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
