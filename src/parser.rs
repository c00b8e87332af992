// src/parser.rs
//! CommonMark parser adapter.
//!
//! Folds the `pulldown-cmark` event stream into a [`Document`] tree using two
//! stacks: one for open block frames and one for open inline spans. The tree
//! it produces is normalized (ordered lists start at 1 or later, code blocks
//! carry no trailing newline, adjacent text spans are merged).
//!
//! Nesting is capped while the tree is built: quotes and lists deeper than
//! [`MAX_NESTING_DEPTH`] and styling spans deeper than [`MAX_INLINE_DEPTH`] are
//! not opened, and their content joins the innermost open frame.

use crate::constants::{MAX_INLINE_DEPTH, MAX_NESTING_DEPTH};
use crate::formatting::inline::to_plain_text;
use crate::model::{
    CodeBlockNode, ColumnAlignment, Document, Inline, ListItem, ListNode, Node, TableNode,
};
use crate::pipeline::DocumentParser;
use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Parses markdown with tables and strikethrough enabled.
#[derive(Debug, Clone, Copy)]
pub struct CommonMarkParser {
    options: Options,
}

impl Default for CommonMarkParser {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH,
        }
    }
}

impl CommonMarkParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom set of parser extensions.
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl DocumentParser for CommonMarkParser {
    fn parse(&self, text: &str) -> Document {
        let mut builder = TreeBuilder::new();
        for event in Parser::new_ext(text, self.options) {
            builder.handle(event);
        }
        let document = builder.finish();
        log::debug!(
            "Parsed {} bytes into {} top-level nodes",
            text.len(),
            document.children.len()
        );
        document
    }
}

/// Parses markdown text with the default extensions.
pub fn parse_markdown(text: &str) -> Document {
    CommonMarkParser::default().parse(text)
}

// --- Tree construction ---

enum BlockFrame {
    Root(Vec<Node>),
    Quote(Vec<Node>),
    Item(Vec<Node>),
    Footnote(Vec<Node>),
    List(ListNode),
    /// `implicit` marks inline content of a tight list item, which arrives
    /// without paragraph events.
    Paragraph { spans: Vec<Inline>, implicit: bool },
    Heading { level: u8, spans: Vec<Inline> },
    Code(CodeBlockNode),
    Html(String),
    Table { node: TableNode, row: Vec<Vec<Inline>> },
    Cell(Vec<Inline>),
}

enum InlineFrame {
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link { url: String, children: Vec<Inline> },
    Image { url: String, alt: String },
}

impl InlineFrame {
    fn push(&mut self, inline: Inline) {
        match self {
            InlineFrame::Strong(children)
            | InlineFrame::Emphasis(children)
            | InlineFrame::Strikethrough(children)
            | InlineFrame::Link { children, .. } => push_span(children, inline),
            InlineFrame::Image { alt, .. } => {
                alt.push_str(&to_plain_text(std::slice::from_ref(&inline)))
            }
        }
    }

    fn into_inline(self) -> Inline {
        match self {
            InlineFrame::Strong(children) => Inline::Strong(children),
            InlineFrame::Emphasis(children) => Inline::Emphasis(children),
            InlineFrame::Strikethrough(children) => Inline::Strikethrough(children),
            InlineFrame::Link { url, children } => Inline::Link { url, children },
            InlineFrame::Image { url, alt } => Inline::Image { url, alt },
        }
    }
}

struct TreeBuilder {
    blocks: Vec<BlockFrame>,
    inlines: Vec<InlineFrame>,
    /// Open quote, list and item tags past the nesting cap. They are always
    /// the innermost containers, so a count is enough to match their ends.
    skipped_containers: usize,
    /// Open styling tags past the inline cap.
    skipped_inlines: usize,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            blocks: vec![BlockFrame::Root(Vec::new())],
            inlines: Vec::new(),
            skipped_containers: 0,
            skipped_inlines: 0,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) | Event::InlineMath(code) | Event::DisplayMath(code) => {
                self.push_inline(Inline::Code(code.into_string()))
            }
            Event::Html(html) => {
                if let Some(BlockFrame::Html(buffer)) = self.blocks.last_mut() {
                    buffer.push_str(&html);
                } else {
                    self.push_inline(Inline::Text(html.into_string()));
                }
            }
            Event::InlineHtml(html) => self.push_inline(Inline::Text(html.into_string())),
            Event::FootnoteReference(label) => {
                self.push_inline(Inline::Text(format!("[^{}]", label)))
            }
            Event::SoftBreak | Event::HardBreak => self.push_inline(Inline::LineBreak),
            Event::Rule => {
                self.close_implicit_paragraph();
                self.attach(Node::ThematicBreak);
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "☑ " } else { "☐ " };
                self.push_inline(Inline::text(marker));
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open_block(BlockFrame::Paragraph {
                spans: Vec::new(),
                implicit: false,
            }),
            Tag::Heading { level, .. } => self.open_block(BlockFrame::Heading {
                level: level as u8,
                spans: Vec::new(),
            }),
            Tag::BlockQuote(_) => {
                if self.at_nesting_cap() {
                    self.skip_container();
                } else {
                    self.open_block(BlockFrame::Quote(Vec::new()));
                }
            }
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_string)
                    }
                    CodeBlockKind::Indented => None,
                };
                self.open_block(BlockFrame::Code(CodeBlockNode {
                    language,
                    literal: String::new(),
                }));
            }
            Tag::HtmlBlock => self.open_block(BlockFrame::Html(String::new())),
            Tag::List(_) if self.at_nesting_cap() => self.skip_container(),
            Tag::List(start) => {
                let list = match start {
                    Some(start) => ListNode::numbered(start, Vec::new()),
                    None => ListNode::bulleted(Vec::new()),
                };
                self.open_block(BlockFrame::List(list));
            }
            // Items of a skipped list are skipped with it.
            Tag::Item => {
                if matches!(self.blocks.last(), Some(BlockFrame::List(_))) {
                    self.open_block(BlockFrame::Item(Vec::new()));
                } else {
                    self.skip_container();
                }
            }
            Tag::FootnoteDefinition(_) => self.open_block(BlockFrame::Footnote(Vec::new())),
            Tag::Table(alignments) => self.open_block(BlockFrame::Table {
                node: TableNode {
                    alignments: alignments.iter().map(|a| convert_alignment(*a)).collect(),
                    ..Default::default()
                },
                row: Vec::new(),
            }),
            Tag::TableHead | Tag::TableRow => {}
            Tag::TableCell => self.blocks.push(BlockFrame::Cell(Vec::new())),
            Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
                if self.inlines.len() >= MAX_INLINE_DEPTH =>
            {
                self.skipped_inlines += 1;
            }
            Tag::Emphasis => self.inlines.push(InlineFrame::Emphasis(Vec::new())),
            Tag::Strong => self.inlines.push(InlineFrame::Strong(Vec::new())),
            Tag::Strikethrough => self.inlines.push(InlineFrame::Strikethrough(Vec::new())),
            Tag::Link { dest_url, .. } => self.inlines.push(InlineFrame::Link {
                url: dest_url.into_string(),
                children: Vec::new(),
            }),
            Tag::Image { dest_url, .. } => self.inlines.push(InlineFrame::Image {
                url: dest_url.into_string(),
                alt: String::new(),
            }),
            other => log::debug!("Ignoring unsupported tag {:?}", other),
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::BlockQuote(_) | TagEnd::List(_) | TagEnd::Item
                if self.skipped_containers > 0 =>
            {
                self.close_implicit_paragraph();
                self.skipped_containers -= 1;
            }
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image
                if self.skipped_inlines > 0 =>
            {
                self.skipped_inlines -= 1;
            }
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::CodeBlock
            | TagEnd::HtmlBlock
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::FootnoteDefinition
            | TagEnd::Table => {
                self.close_implicit_paragraph();
                if self.blocks.len() > 1 {
                    if let Some(frame) = self.blocks.pop() {
                        self.close_block(frame);
                    }
                }
            }
            TagEnd::TableCell => {
                if let Some(BlockFrame::Cell(spans)) = self.blocks.pop() {
                    if let Some(BlockFrame::Table { row, .. }) = self.blocks.last_mut() {
                        row.push(spans);
                    }
                }
            }
            TagEnd::TableHead => {
                if let Some(BlockFrame::Table { node, row }) = self.blocks.last_mut() {
                    node.header = std::mem::take(row);
                }
            }
            TagEnd::TableRow => {
                if let Some(BlockFrame::Table { node, row }) = self.blocks.last_mut() {
                    node.rows.push(std::mem::take(row));
                }
            }
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image => {
                if let Some(frame) = self.inlines.pop() {
                    self.push_inline(frame.into_inline());
                }
            }
            _ => {}
        }
    }

    fn at_nesting_cap(&self) -> bool {
        let depth = self
            .blocks
            .iter()
            .filter(|frame| matches!(frame, BlockFrame::Quote(_) | BlockFrame::List(_)))
            .count();
        depth >= MAX_NESTING_DEPTH
    }

    fn skip_container(&mut self) {
        if self.skipped_containers == 0 {
            log::debug!(
                "Nesting deeper than {} levels is flattened",
                MAX_NESTING_DEPTH
            );
        }
        self.close_implicit_paragraph();
        self.skipped_containers += 1;
    }

    fn text(&mut self, text: &str) {
        if self.inlines.is_empty() {
            match self.blocks.last_mut() {
                Some(BlockFrame::Code(code)) => {
                    code.literal.push_str(text);
                    return;
                }
                Some(BlockFrame::Html(html)) => {
                    html.push_str(text);
                    return;
                }
                _ => {}
            }
        }
        self.push_inline(Inline::text(text));
    }

    fn push_inline(&mut self, inline: Inline) {
        if let Some(frame) = self.inlines.last_mut() {
            frame.push(inline);
            return;
        }

        let needs_paragraph = matches!(
            self.blocks.last(),
            Some(
                BlockFrame::Root(_)
                    | BlockFrame::Quote(_)
                    | BlockFrame::Item(_)
                    | BlockFrame::Footnote(_)
            )
        );
        if needs_paragraph {
            self.blocks.push(BlockFrame::Paragraph {
                spans: Vec::new(),
                implicit: true,
            });
        }

        match self.blocks.last_mut() {
            Some(
                BlockFrame::Paragraph { spans, .. }
                | BlockFrame::Heading { spans, .. }
                | BlockFrame::Cell(spans),
            ) => push_span(spans, inline),
            Some(BlockFrame::Code(code)) => {
                code.literal
                    .push_str(&to_plain_text(std::slice::from_ref(&inline)))
            }
            _ => log::debug!("Dropping inline content outside a text block"),
        }
    }

    fn open_block(&mut self, frame: BlockFrame) {
        self.close_implicit_paragraph();
        self.blocks.push(frame);
    }

    fn close_implicit_paragraph(&mut self) {
        if matches!(
            self.blocks.last(),
            Some(BlockFrame::Paragraph { implicit: true, .. })
        ) {
            if let Some(frame) = self.blocks.pop() {
                self.close_block(frame);
            }
        }
    }

    fn close_block(&mut self, frame: BlockFrame) {
        match frame {
            BlockFrame::Paragraph { spans, .. } => self.attach(Node::Paragraph(spans)),
            BlockFrame::Heading { level, spans } => self.attach(Node::Heading {
                level,
                children: spans,
            }),
            BlockFrame::Quote(children) => self.attach(Node::Quote(children)),
            BlockFrame::Code(mut code) => {
                if code.literal.ends_with('\n') {
                    code.literal.pop();
                }
                self.attach(Node::CodeBlock(code));
            }
            BlockFrame::Html(html) => self.attach(Node::Html(html)),
            BlockFrame::List(list) => self.attach(Node::List(list)),
            BlockFrame::Item(children) => {
                if let Some(BlockFrame::List(list)) = self.blocks.last_mut() {
                    list.items.push(ListItem::new(children));
                }
            }
            BlockFrame::Footnote(_) => self.attach(Node::Unsupported {
                kind: "footnote_definition".to_string(),
            }),
            BlockFrame::Table { node, .. } => self.attach(Node::Table(node)),
            BlockFrame::Cell(_) | BlockFrame::Root(_) => {}
        }
    }

    fn attach(&mut self, node: Node) {
        match self.blocks.last_mut() {
            Some(
                BlockFrame::Root(children)
                | BlockFrame::Quote(children)
                | BlockFrame::Item(children)
                | BlockFrame::Footnote(children),
            ) => children.push(node),
            _ => log::debug!("Dropping {} node with no container", node.kind()),
        }
    }

    fn finish(mut self) -> Document {
        self.close_implicit_paragraph();
        while self.blocks.len() > 1 {
            if let Some(frame) = self.blocks.pop() {
                self.close_block(frame);
            }
        }
        match self.blocks.pop() {
            Some(BlockFrame::Root(children)) => Document::new(children),
            _ => Document::default(),
        }
    }
}

/// Appends a span, merging it into a preceding text span.
fn push_span(spans: &mut Vec<Inline>, inline: Inline) {
    if let (Some(Inline::Text(last)), Inline::Text(next)) = (spans.last_mut(), &inline) {
        last.push_str(next);
        return;
    }
    spans.push(inline);
}

fn convert_alignment(alignment: Alignment) -> ColumnAlignment {
    match alignment {
        Alignment::None => ColumnAlignment::None,
        Alignment::Left => ColumnAlignment::Left,
        Alignment::Center => ColumnAlignment::Center,
        Alignment::Right => ColumnAlignment::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(parse_markdown("").is_empty());
        assert!(parse_markdown("   \n\n  ").is_empty());
    }

    #[test]
    fn test_heading_and_paragraph() {
        let doc = parse_markdown("# Title\n\nThis is **bold** text.");
        assert_eq!(
            doc.children,
            vec![
                Node::heading(1, "Title"),
                Node::Paragraph(vec![
                    Inline::text("This is "),
                    Inline::Strong(vec![Inline::text("bold")]),
                    Inline::text(" text."),
                ]),
            ]
        );
    }

    #[test]
    fn test_tight_list_items_get_paragraphs() {
        let doc = parse_markdown("- one\n- two\n  - nested");
        let Node::List(list) = &doc.children[0] else {
            panic!("expected list, got {:?}", doc.children);
        };
        assert!(!list.ordered);
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0], ListItem::text("one"));

        let second = &list.items[1].children;
        assert_eq!(second[0], Node::paragraph("two"));
        let Node::List(nested) = &second[1] else {
            panic!("expected nested list, got {:?}", second);
        };
        assert_eq!(nested.items, vec![ListItem::text("nested")]);
    }

    #[test]
    fn test_ordered_list_start() {
        let doc = parse_markdown("5. five\n6. six");
        let Node::List(list) = &doc.children[0] else {
            panic!("expected list");
        };
        assert!(list.ordered);
        assert_eq!(list.start, 5);
        assert_eq!(list.items.len(), 2);
    }

    #[test]
    fn test_fenced_code_keeps_language() {
        let doc = parse_markdown("```bash\ncurl https://api.example.com\n```");
        assert_eq!(
            doc.children,
            vec![Node::CodeBlock(CodeBlockNode {
                language: Some("bash".to_string()),
                literal: "curl https://api.example.com".to_string(),
            })]
        );
    }

    #[test]
    fn test_quote_with_two_paragraphs() {
        let doc = parse_markdown("> first\n>\n> second");
        assert_eq!(
            doc.children,
            vec![Node::Quote(vec![
                Node::paragraph("first"),
                Node::paragraph("second")
            ])]
        );
    }

    #[test]
    fn test_table_with_alignment() {
        let doc = parse_markdown("| Name | Value |\n|:-----|------:|\n| Test | 123 |");
        let Node::Table(table) = &doc.children[0] else {
            panic!("expected table, got {:?}", doc.children);
        };
        assert_eq!(
            table.alignments,
            vec![ColumnAlignment::Left, ColumnAlignment::Right]
        );
        assert_eq!(
            table.header,
            vec![vec![Inline::text("Name")], vec![Inline::text("Value")]]
        );
        assert_eq!(
            table.rows,
            vec![vec![vec![Inline::text("Test")], vec![Inline::text("123")]]]
        );
    }

    #[test]
    fn test_links_images_and_breaks() {
        let doc = parse_markdown("[docs](https://example.com) ![alt *text*](https://img/x.png)\n~~gone~~");
        let Node::Paragraph(spans) = &doc.children[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            spans,
            &vec![
                Inline::link("https://example.com", "docs"),
                Inline::text(" "),
                Inline::Image {
                    url: "https://img/x.png".to_string(),
                    alt: "alt text".to_string()
                },
                Inline::LineBreak,
                Inline::Strikethrough(vec![Inline::text("gone")]),
            ]
        );
    }

    #[test]
    fn test_rule_and_html_block() {
        let doc = parse_markdown("---\n\n<div>hi</div>\n");
        assert_eq!(doc.children[0], Node::ThematicBreak);
        assert!(matches!(doc.children[1], Node::Html(_)));
    }

    fn quote_depth(nodes: &[Node]) -> usize {
        let mut depth = 0;
        let mut current = nodes;
        while let Some(Node::Quote(children)) = current.first() {
            depth += 1;
            current = children;
        }
        depth
    }

    fn list_depth(nodes: &[Node]) -> usize {
        let mut depth = 0;
        let mut current = nodes;
        loop {
            let Some(Node::List(list)) = current.iter().find(|n| matches!(n, Node::List(_))) else {
                return depth;
            };
            depth += 1;
            match list.items.last() {
                Some(item) => current = &item.children,
                None => return depth,
            }
        }
    }

    fn inline_depth(spans: &[Inline]) -> usize {
        spans
            .iter()
            .map(|span| match span {
                Inline::Strong(children)
                | Inline::Emphasis(children)
                | Inline::Strikethrough(children)
                | Inline::Link { children, .. } => 1 + inline_depth(children),
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_deep_quotes_are_flattened_at_cap() {
        let doc = parse_markdown(&format!("{} deep", ">".repeat(20_000)));
        assert_eq!(quote_depth(&doc.children), MAX_NESTING_DEPTH);

        let mut innermost = &doc.children;
        while let Some(Node::Quote(children)) = innermost.first() {
            innermost = children;
        }
        assert_eq!(innermost, &vec![Node::paragraph("deep")]);
    }

    #[test]
    fn test_deep_lists_are_flattened_at_cap() {
        let doc = parse_markdown(&format!("{}x", "- ".repeat(5_000)));
        assert_eq!(list_depth(&doc.children), MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_skipped_items_keep_their_text() {
        let mut markdown = String::new();
        for level in 0..MAX_NESTING_DEPTH + 1 {
            markdown.push_str(&"  ".repeat(level));
            markdown.push_str(&format!("- level {}\n", level));
        }
        markdown.push_str(&"  ".repeat(MAX_NESTING_DEPTH));
        markdown.push_str("- sibling\n");

        let doc = parse_markdown(&markdown);
        assert_eq!(list_depth(&doc.children), MAX_NESTING_DEPTH);

        let mut item = &doc.children;
        for _ in 0..MAX_NESTING_DEPTH {
            let Some(Node::List(list)) = item.iter().find(|n| matches!(n, Node::List(_))) else {
                panic!("expected list");
            };
            item = &list.items[0].children;
        }
        assert_eq!(
            item,
            &vec![
                Node::paragraph(format!("level {}", MAX_NESTING_DEPTH - 1)),
                Node::paragraph(format!("level {}", MAX_NESTING_DEPTH)),
                Node::paragraph("sibling"),
            ]
        );
    }

    #[test]
    fn test_deep_emphasis_is_capped() {
        let doc = parse_markdown(&format!("{}a{}", "*".repeat(2_000), "*".repeat(2_000)));
        let Node::Paragraph(spans) = &doc.children[0] else {
            panic!("expected paragraph");
        };
        assert!(inline_depth(spans) <= MAX_INLINE_DEPTH);
        assert!(to_plain_text(spans).contains('a'));
    }
}
