use super::*;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn empty_string_yields_no_blocks() {
    assert!(parse("").is_empty());
    assert!(render_message("").is_empty());
}

#[test]
fn parsing_is_deterministic() {
    let inputs = [
        "# Title\n\nSome **bold** text\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n```\ncode\n```\n- x\n- y",
        "",
        "1.",
        "**",
        "****",
        "||\n||",
        "```\n```\n```",
        "**a**b**",
        "\r\n\r\n",
        "- \n1. \n\u{2022} ",
        "\u{1F680}",
    ];
    for text in inputs {
        assert_eq!(parse(text), parse(text), "parse differs for {text:?}");
        assert_eq!(render_message(text), render_message(text), "render differs for {text:?}");
    }
}

#[test]
fn single_hash_heading() {
    assert_eq!(parse("# Title"), vec![ContentBlock::Heading { text: "Title".into() }]);
}

#[test]
fn two_delimited_lines_make_a_table() {
    let blocks = parse("a | b\n1 | 2");
    assert_eq!(
        blocks,
        vec![ContentBlock::Table { rows: vec![strings(&["a", "b"]), strings(&["1", "2"])] }]
    );
}

#[test]
fn lone_delimited_line_is_a_paragraph() {
    assert_eq!(parse("a | b"), vec![ContentBlock::Paragraph { text: "a | b".into() }]);
}

#[test]
fn bullet_list() {
    assert_eq!(
        parse("- one\n- two"),
        vec![ContentBlock::List { items: strings(&["one", "two"]), ordered: false }]
    );
}

#[test]
fn numbered_list() {
    assert_eq!(
        parse("1. first\n2. second"),
        vec![ContentBlock::List { items: strings(&["first", "second"]), ordered: true }]
    );
}

#[test]
fn unterminated_fence_is_one_code_block() {
    assert_eq!(
        parse("```\nlet a = 1;\n\nlet b = 2;"),
        vec![ContentBlock::CodeBlock { raw_text: "let a = 1;\n\nlet b = 2;".into() }]
    );
}

#[test]
fn paragraph_inline_spans() {
    let blocks = render_message("**bold** and `code`");
    assert_eq!(
        blocks,
        vec![DisplayBlock::Paragraph {
            spans: vec![Span::bold("bold"), Span::plain(" and "), Span::code("code")],
        }]
    );
}

#[test]
fn separator_only_data_row_leaves_header() {
    let blocks = parse("a | b\n--- | ---");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].header().unwrap(), ["a", "b"]);
    assert!(blocks[0].data_rows().is_empty());
}

#[test]
fn empty_tables_are_skipped_without_breaking_order() {
    let blocks = parse("before\n\n|\n|\n\nafter");
    assert_eq!(
        blocks,
        vec![
            ContentBlock::Paragraph { text: "before".into() },
            ContentBlock::Paragraph { text: "after".into() },
        ]
    );
}

#[test]
fn assistant_reply_end_to_end() {
    let text = "\u{1F44B} Hey Sam!\n\nHere is your **career snapshot**:\n\n| Skill | Level |\n|-------|-------|\n| Rust | Advanced |\n\n## Next steps\n1. Ship a `tokio` project\n2. Apply to 3 roles\n";
    let blocks = render_message(text);
    assert_eq!(blocks.len(), 5);
    assert!(matches!(&blocks[0], DisplayBlock::Heading { text } if text.starts_with('\u{1F44B}')));
    assert!(matches!(&blocks[1], DisplayBlock::Paragraph { spans } if spans.len() == 3));
    assert!(matches!(&blocks[2], DisplayBlock::Table { rows, .. } if rows.len() == 1));
    assert!(matches!(&blocks[3], DisplayBlock::Heading { text } if text == "Next steps"));
    let DisplayBlock::List { items } = &blocks[4] else {
        panic!("expected list");
    };
    assert_eq!(items[0].marker, "1.");
    assert_eq!(plain_text(&items[0].spans), "Ship a tokio project");
}
