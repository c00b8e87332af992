// tests/snapshot_tests.rs
//! Snapshot tests for the block wire format.
//!
//! Uses inline `insta` snapshots of the compact JSON so field order is part
//! of what is checked. Review changes with `cargo insta review`.

use insta::assert_snapshot;
use md2blocks::{markdown_to_block_objects, Block, RenderOptions};

fn render(markdown: &str) -> String {
    let blocks: Vec<Block> =
        markdown_to_block_objects(markdown, &RenderOptions::default()).expect("render failed");
    serde_json::to_string(&blocks).expect("serialize failed")
}

#[test]
fn snapshot_heading_section_divider() {
    assert_snapshot!(
        render("# Title\n\nSome **bold** text.\n\n---"),
        @r#"[{"type":"header","text":{"type":"plain_text","text":"Title"}},{"type":"section","text":{"type":"mrkdwn","text":"Some *bold* text."}},{"type":"divider"}]"#
    );
}

#[test]
fn snapshot_nested_bullet_list() {
    assert_snapshot!(
        render("- one\n- two\n  - nested\n- three"),
        @r#"[{"type":"rich_text","elements":[{"type":"rich_text_list","style":"bullet","indent":0,"elements":[{"type":"rich_text_section","elements":[{"type":"text","text":"one"}]},{"type":"rich_text_section","elements":[{"type":"text","text":"two"}]}]},{"type":"rich_text_list","style":"bullet","indent":1,"elements":[{"type":"rich_text_section","elements":[{"type":"text","text":"nested"}]}]},{"type":"rich_text_list","style":"bullet","indent":0,"elements":[{"type":"rich_text_section","elements":[{"type":"text","text":"three"}]}]}]}]"#
    );
}

#[test]
fn snapshot_ordered_list_offset() {
    assert_snapshot!(
        render("5. five\n6. six"),
        @r#"[{"type":"rich_text","elements":[{"type":"rich_text_list","style":"ordered","indent":0,"offset":4,"elements":[{"type":"rich_text_section","elements":[{"type":"text","text":"five"}]},{"type":"rich_text_section","elements":[{"type":"text","text":"six"}]}]}]}]"#
    );
}

#[test]
fn snapshot_quote_with_styling() {
    assert_snapshot!(
        render("> **Note:** read this"),
        @r#"[{"type":"rich_text","elements":[{"type":"rich_text_quote","elements":[{"type":"text","text":"Note:","style":{"bold":true}},{"type":"text","text":" read this"}]}]}]"#
    );
}

#[test]
fn snapshot_code_block_with_language() {
    assert_snapshot!(
        render("```python\nprint('hi')\n```"),
        @r#"[{"type":"rich_text","elements":[{"type":"rich_text_preformatted","elements":[{"type":"text","text":"print('hi')"}],"language":"python"}]}]"#
    );
}

#[test]
fn snapshot_aligned_table() {
    assert_snapshot!(
        render("| Name | Value |\n|:-----|------:|\n| Test | 123 |"),
        @r#"[{"type":"table","rows":[[{"type":"raw_text","text":"Name"},{"type":"raw_text","text":"Value"}],[{"type":"raw_text","text":"Test"},{"type":"raw_text","text":"123"}]],"column_settings":[{"align":"left"},{"align":"right"}]}]"#
    );
}
