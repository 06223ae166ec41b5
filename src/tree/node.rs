//! Document tree node definitions.

use serde::Serialize;
use std::ops::Range;

/// A node of the parsed document tree.
///
/// Nodes are produced once by the front-end and only read afterwards;
/// the renderer never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// What kind of node this is, with kind-specific data
    pub kind: NodeKind,
    /// Byte range of the node in the original Markdown source
    pub span: Range<usize>,
    /// Child nodes in document order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a childless node.
    pub fn new(kind: NodeKind, span: Range<usize>) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children.
    pub fn with_children(kind: NodeKind, span: Range<usize>, children: Vec<Node>) -> Self {
        Self {
            kind,
            span,
            children,
        }
    }

    /// Creates a plain text leaf.
    pub fn text(value: impl Into<String>, span: Range<usize>) -> Self {
        Self::new(
            NodeKind::Text {
                value: value.into(),
            },
            span,
        )
    }

    /// Returns the number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Returns the number of nested levels below this node.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Concatenates the values of the direct `Text` children.
    pub fn direct_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match &c.kind {
                NodeKind::Text { value } => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// The closed set of node kinds the renderer understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of the tree
    Document,
    /// ATX or setext heading, level 1-6
    Heading { level: u8 },
    /// Paragraph (absent inside tight list items)
    Paragraph,
    /// Run of literal text
    Text { value: String },
    /// Line ending inside a paragraph
    SoftBreak,
    /// Explicit line break (two trailing spaces or a backslash)
    HardBreak,
    /// Emphasis; level 1 is a single delimiter, level 2 a double one
    Emphasis { level: u8 },
    /// GFM strikethrough
    Strikethrough,
    /// Inline code span
    CodeSpan { value: String },
    /// Fenced or indented code block with its raw lines
    CodeBlock {
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        literal: String,
        fenced: bool,
    },
    /// Inline or reference link
    Link { destination: String },
    /// `<scheme:...>` or `<user@host>` autolink
    AutoLink { url: String },
    /// Image; alt text lives in the children
    Image { destination: String },
    /// Ordered or bullet list
    List { ordered: bool, tight: bool },
    /// Item of a list
    ListItem,
    /// GFM task list marker
    TaskCheckBox { checked: bool },
    /// Horizontal rule
    ThematicBreak,
    /// Block quotation
    BlockQuote,
    /// Block-level raw HTML
    HtmlBlock { html: String },
    /// Span-level raw HTML
    RawHtml { html: String },
    /// Inline content of a tight list item
    TextBlock,
    /// GFM table
    Table,
    /// Header row of a table; holds cells directly
    TableHeader,
    /// Body row of a table
    TableRow,
    /// Table cell; `header` is true inside the header row
    TableCell { header: bool },
    /// Anything the front-end does not classify
    Other { name: String },
}

impl NodeKind {
    /// Returns true for kinds that live inside a paragraph.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            NodeKind::Text { .. }
                | NodeKind::SoftBreak
                | NodeKind::HardBreak
                | NodeKind::Emphasis { .. }
                | NodeKind::Strikethrough
                | NodeKind::CodeSpan { .. }
                | NodeKind::Link { .. }
                | NodeKind::AutoLink { .. }
                | NodeKind::Image { .. }
                | NodeKind::RawHtml { .. }
                | NodeKind::TaskCheckBox { .. }
        )
    }

    /// Short snake_case name, used in logs.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Heading { .. } => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Text { .. } => "text",
            NodeKind::SoftBreak => "soft_break",
            NodeKind::HardBreak => "hard_break",
            NodeKind::Emphasis { .. } => "emphasis",
            NodeKind::Strikethrough => "strikethrough",
            NodeKind::CodeSpan { .. } => "code_span",
            NodeKind::CodeBlock { .. } => "code_block",
            NodeKind::Link { .. } => "link",
            NodeKind::AutoLink { .. } => "auto_link",
            NodeKind::Image { .. } => "image",
            NodeKind::List { .. } => "list",
            NodeKind::ListItem => "list_item",
            NodeKind::TaskCheckBox { .. } => "task_check_box",
            NodeKind::ThematicBreak => "thematic_break",
            NodeKind::BlockQuote => "block_quote",
            NodeKind::HtmlBlock { .. } => "html_block",
            NodeKind::RawHtml { .. } => "raw_html",
            NodeKind::TextBlock => "text_block",
            NodeKind::Table => "table",
            NodeKind::TableHeader => "table_header",
            NodeKind::TableRow => "table_row",
            NodeKind::TableCell { .. } => "table_cell",
            NodeKind::Other { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_count_and_depth() {
        let doc = Node::with_children(
            NodeKind::Document,
            0..10,
            vec![Node::with_children(
                NodeKind::Paragraph,
                0..10,
                vec![Node::text("hello", 0..5), Node::text("world", 5..10)],
            )],
        );
        assert_eq!(doc.node_count(), 4);
        assert_eq!(doc.depth(), 2);
    }

    #[test]
    fn test_direct_text_skips_nested_nodes() {
        let image = Node::with_children(
            NodeKind::Image {
                destination: "a.png".to_string(),
            },
            0..20,
            vec![
                Node::text("alt ", 2..6),
                Node::with_children(
                    NodeKind::Emphasis { level: 1 },
                    6..12,
                    vec![Node::text("hidden", 7..11)],
                ),
                Node::text("text", 12..16),
            ],
        );
        assert_eq!(image.direct_text(), "alt text");
    }

    #[test]
    fn test_inline_classification() {
        assert!(NodeKind::SoftBreak.is_inline());
        assert!(NodeKind::TaskCheckBox { checked: true }.is_inline());
        assert!(!NodeKind::Paragraph.is_inline());
        assert!(!NodeKind::List {
            ordered: false,
            tight: true
        }
        .is_inline());
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let node = Node::new(NodeKind::Heading { level: 2 }, 0..5);
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"type\":\"heading\""));
        assert!(json.contains("\"level\":2"));
        assert!(!json.contains("children"));
    }
}
