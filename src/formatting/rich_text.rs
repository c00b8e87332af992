// src/formatting/rich_text.rs
//! Builds rich-text elements for lists, quotes and code.
//!
//! Lists recurse through their items: a nested list sits inside the item
//! that holds it, one level deeper, keeping its own ordering and start
//! number. Depth is clamped to the deepest indent the platform renders.

use super::constraints::{clamp_list_depth, enforce_runs, enforce_text};
use super::inline::{to_plain_text, to_runs};
use crate::model::{CodeBlockNode, ListItem, ListNode, Node, RichTextElement, RichTextList, StyledRun};

/// Separator placed between paragraphs of a quote.
const PARAGRAPH_BREAK: &str = "\n\n";

/// Assembles the rich-text element for a list, quote or code block.
///
/// Returns `None` for node kinds that have no rich-text form.
pub fn assemble(node: &Node) -> Option<RichTextElement> {
    assemble_at(node, 0)
}

fn assemble_at(node: &Node, depth: usize) -> Option<RichTextElement> {
    match node {
        Node::List(list) => Some(RichTextElement::List(assemble_list(list, depth))),
        Node::Quote(children) => Some(RichTextElement::Quote(enforce_runs(quote_runs(children)))),
        Node::CodeBlock(code) => Some(preformatted(code)),
        Node::Paragraph(spans) => Some(RichTextElement::Section(enforce_runs(to_runs(spans)))),
        Node::Heading { children, .. } => Some(RichTextElement::Section(enforce_runs(
            emphasize(to_runs(children)),
        ))),
        _ => None,
    }
}

fn assemble_list(list: &ListNode, depth: usize) -> RichTextList {
    let offset = if list.ordered { list.start.max(1) } else { 1 };
    RichTextList {
        ordered: list.ordered,
        depth: clamp_list_depth(depth),
        offset,
        items: list
            .items
            .iter()
            .map(|item| assemble_item(item, depth))
            .collect(),
    }
}

/// An item's non-list children become elements at the item's own level;
/// a nested list goes one level deeper.
fn assemble_item(item: &ListItem, depth: usize) -> Vec<RichTextElement> {
    item.children
        .iter()
        .filter_map(|child| match child {
            Node::List(nested) => Some(RichTextElement::List(assemble_list(nested, depth + 1))),
            other => {
                let element = assemble_at(other, depth);
                if element.is_none() {
                    log::debug!("Skipping {} inside list item", other.kind());
                }
                element
            }
        })
        .collect()
}

fn preformatted(code: &CodeBlockNode) -> RichTextElement {
    RichTextElement::Preformatted {
        text: enforce_text(code.literal.clone()),
        language: code.language.clone().filter(|lang| !lang.is_empty()),
    }
}

/// Runs for every child of a quote, paragraphs separated by a blank line.
fn quote_runs(children: &[Node]) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    for child in children {
        let child_runs = match child {
            Node::Paragraph(spans) => to_runs(spans),
            Node::Heading { children, .. } => emphasize(to_runs(children)),
            Node::Quote(nested) => quote_runs(nested),
            Node::CodeBlock(code) if !code.literal.is_empty() => vec![StyledRun {
                text: code.literal.clone(),
                code: true,
                ..Default::default()
            }],
            other => {
                let text = node_plain_text(other);
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![StyledRun::plain(text)]
                }
            }
        };

        if child_runs.is_empty() {
            continue;
        }
        if !runs.is_empty() {
            extend_runs(&mut runs, vec![StyledRun::plain(PARAGRAPH_BREAK)]);
        }
        extend_runs(&mut runs, child_runs);
    }
    runs
}

/// Appends runs, merging across the seam when the styles match.
fn extend_runs(runs: &mut Vec<StyledRun>, more: Vec<StyledRun>) {
    let mut more = more.into_iter();
    if let Some(first) = more.next() {
        match runs.last_mut() {
            Some(last) if last.same_style(&first) => last.text.push_str(&first.text),
            _ => runs.push(first),
        }
    }
    runs.extend(more);
}

fn emphasize(runs: Vec<StyledRun>) -> Vec<StyledRun> {
    runs.into_iter()
        .map(|run| StyledRun { bold: true, ..run })
        .collect()
}

/// Plain-text rendering of block nodes that have no run form inside a quote.
fn node_plain_text(node: &Node) -> String {
    match node {
        Node::List(list) => list
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let marker = if list.ordered {
                    format!("{}. ", list.start.max(1) + index as u64)
                } else {
                    "• ".to_string()
                };
                let text = item
                    .children
                    .iter()
                    .map(node_plain_text)
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{}{}", marker, text)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Node::Paragraph(spans) | Node::Heading { children: spans, .. } => to_plain_text(spans),
        Node::Quote(children) => children
            .iter()
            .map(node_plain_text)
            .collect::<Vec<_>>()
            .join(PARAGRAPH_BREAK),
        Node::CodeBlock(code) => code.literal.clone(),
        Node::Table(table) => std::iter::once(&table.header)
            .chain(table.rows.iter())
            .map(|row| {
                row.iter()
                    .map(|cell| to_plain_text(cell))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Node::ThematicBreak | Node::Html(_) | Node::Unsupported { .. } => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::LIST_MAX_INDENT;
    use crate::model::Inline;
    use pretty_assertions::assert_eq;

    fn item_with(text: &str, nested: Option<ListNode>) -> ListItem {
        let mut children = vec![Node::paragraph(text)];
        if let Some(list) = nested {
            children.push(Node::List(list));
        }
        ListItem::new(children)
    }

    fn section_text(element: &RichTextElement) -> String {
        match element {
            RichTextElement::Section(runs) => runs.iter().map(|r| r.text.as_str()).collect(),
            other => panic!("expected section, got {:?}", other),
        }
    }

    fn as_list(element: &RichTextElement) -> &RichTextList {
        match element {
            RichTextElement::List(list) => list,
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_three_level_bullet_list_depths() {
        let level3 = ListNode::bulleted(vec![ListItem::text("Level 3")]);
        let level2 = ListNode::bulleted(vec![item_with("Level 2", Some(level3))]);
        let level1 = ListNode::bulleted(vec![item_with("Level 1", Some(level2))]);

        let element = assemble(&Node::List(level1)).unwrap();
        let top = as_list(&element);
        assert_eq!(top.depth, 0);
        assert!(!top.ordered);
        assert_eq!(section_text(&top.items[0][0]), "Level 1");

        let second = as_list(&top.items[0][1]);
        assert_eq!(second.depth, 1);
        assert_eq!(section_text(&second.items[0][0]), "Level 2");

        let third = as_list(&second.items[0][1]);
        assert_eq!(third.depth, 2);
        assert_eq!(section_text(&third.items[0][0]), "Level 3");
    }

    #[test]
    fn test_ordered_list_keeps_start_as_offset() {
        let list = ListNode::numbered(
            5,
            vec![ListItem::text("five"), ListItem::text("six")],
        );

        let element = assemble(&Node::List(list)).unwrap();
        let list = as_list(&element);
        assert!(list.ordered);
        assert_eq!(list.offset, 5);
        assert_eq!(list.items.len(), 2);
    }

    #[test]
    fn test_nested_list_keeps_its_own_ordering() {
        let nested = ListNode::numbered(3, vec![ListItem::text("three")]);
        let outer = ListNode::bulleted(vec![item_with("parent", Some(nested))]);

        let element = assemble(&Node::List(outer)).unwrap();
        let inner = as_list(&as_list(&element).items[0][1]);
        assert!(inner.ordered);
        assert_eq!(inner.offset, 3);
        assert_eq!(inner.depth, 1);
    }

    #[test]
    fn test_depth_clamps_at_platform_maximum() {
        let mut list = ListNode::bulleted(vec![ListItem::text("deepest")]);
        for level in 0..LIST_MAX_INDENT + 3 {
            list = ListNode::bulleted(vec![item_with(&format!("level {}", level), Some(list))]);
        }

        let element = assemble(&Node::List(list)).unwrap();
        let mut current = as_list(&element);
        let mut deepest = current.depth;
        while let Some(RichTextElement::List(next)) = current.items[0].get(1) {
            current = next;
            deepest = deepest.max(current.depth);
        }
        assert_eq!(deepest, LIST_MAX_INDENT);
        assert_eq!(section_text(&current.items[0][0]), "deepest");
    }

    #[test]
    fn test_item_code_and_quote_children() {
        let item = ListItem::new(vec![
            Node::paragraph("run this"),
            Node::CodeBlock(CodeBlockNode {
                language: Some("bash".to_string()),
                literal: "make".to_string(),
            }),
            Node::Quote(vec![Node::paragraph("noted")]),
        ]);
        let element = assemble(&Node::List(ListNode::bulleted(vec![item]))).unwrap();
        let children = &as_list(&element).items[0];

        assert_eq!(children.len(), 3);
        assert_eq!(
            children[1],
            RichTextElement::Preformatted {
                text: "make".to_string(),
                language: Some("bash".to_string())
            }
        );
        assert_eq!(
            children[2],
            RichTextElement::Quote(vec![StyledRun::plain("noted")])
        );
    }

    #[test]
    fn test_quote_joins_paragraphs_with_blank_line() {
        let quote = Node::Quote(vec![
            Node::Paragraph(vec![Inline::Strong(vec![Inline::text("Important")])]),
            Node::paragraph("Second paragraph"),
        ]);

        let element = assemble(&quote).unwrap();
        assert_eq!(
            element,
            RichTextElement::Quote(vec![
                StyledRun {
                    text: "Important".to_string(),
                    bold: true,
                    ..Default::default()
                },
                StyledRun::plain("\n\nSecond paragraph"),
            ])
        );
    }

    #[test]
    fn test_code_block_becomes_preformatted() {
        let code = Node::CodeBlock(CodeBlockNode {
            language: None,
            literal: "fn main() {}".to_string(),
        });
        assert_eq!(
            assemble(&code),
            Some(RichTextElement::Preformatted {
                text: "fn main() {}".to_string(),
                language: None
            })
        );
    }

    #[test]
    fn test_long_quote_is_truncated() {
        let quote = Node::Quote(vec![Node::paragraph("q".repeat(5000))]);
        let RichTextElement::Quote(runs) = assemble(&quote).unwrap() else {
            panic!("expected quote");
        };
        let total: usize = runs.iter().map(|r| r.text.chars().count()).sum();
        assert_eq!(total, 3000);
        assert!(runs.last().unwrap().text.ends_with("..."));
    }

    #[test]
    fn test_non_rich_nodes_are_none() {
        assert_eq!(assemble(&Node::ThematicBreak), None);
        assert_eq!(
            assemble(&Node::Unsupported {
                kind: "footnote".to_string()
            }),
            None
        );
    }
}
