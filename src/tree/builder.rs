//! Builds a [`Node`] tree from Markdown text.
//!
//! `pulldown-cmark` produces a flat event stream; this module folds it back
//! into a tree with a stack of open nodes. Start events push, end events pop
//! and attach to the parent, everything else becomes a leaf.

use super::{linkify, Node, NodeKind};
use log::{debug, trace};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser, Tag};
use std::ops::Range;

/// Parser extensions enabled for every conversion (GFM subset).
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Parses Markdown text into a document tree.
///
/// # Example
///
/// ```
/// use md2jira::tree::{parse, NodeKind};
///
/// let doc = parse("# Title");
/// assert_eq!(doc.kind, NodeKind::Document);
/// assert_eq!(doc.children[0].kind, NodeKind::Heading { level: 1 });
/// ```
pub fn parse(markdown: &str) -> Node {
    let parser = Parser::new_ext(markdown, parser_options()).into_offset_iter();

    let mut builder = TreeBuilder::new(markdown.len());
    for (event, range) in parser {
        builder.push(event, range);
    }

    let doc = builder.finish();
    debug!(
        "parsed {} bytes into {} nodes (depth {})",
        markdown.len(),
        doc.node_count(),
        doc.depth()
    );
    doc
}

/// Stack-based event folder.
struct TreeBuilder {
    stack: Vec<Node>,
}

impl TreeBuilder {
    fn new(source_len: usize) -> Self {
        Self {
            stack: vec![Node::new(NodeKind::Document, 0..source_len)],
        }
    }

    fn push(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => {
                let kind = self.open_kind(tag);
                trace!("open {} at {:?}", kind.name(), range);
                self.stack.push(Node::new(kind, range));
            }
            Event::End(_) => self.close(),
            Event::Text(text) => {
                // Code and HTML blocks collect their raw lines instead of children.
                match self.top_kind_mut() {
                    NodeKind::CodeBlock { literal, .. } => literal.push_str(&text),
                    NodeKind::HtmlBlock { html } => html.push_str(&text),
                    _ => self.leaf(Node::text(text.into_string(), range)),
                }
            }
            Event::Code(code) => self.leaf(Node::new(
                NodeKind::CodeSpan {
                    value: code.into_string(),
                },
                range,
            )),
            Event::Html(html) => match self.top_kind_mut() {
                NodeKind::HtmlBlock { html: block } => block.push_str(&html),
                _ => self.leaf(Node::new(
                    NodeKind::HtmlBlock {
                        html: html.into_string(),
                    },
                    range,
                )),
            },
            Event::InlineHtml(html) => self.leaf(Node::new(
                NodeKind::RawHtml {
                    html: html.into_string(),
                },
                range,
            )),
            Event::SoftBreak => self.leaf(Node::new(NodeKind::SoftBreak, range)),
            Event::HardBreak => self.leaf(Node::new(NodeKind::HardBreak, range)),
            Event::Rule => self.leaf(Node::new(NodeKind::ThematicBreak, range)),
            Event::TaskListMarker(checked) => {
                self.leaf(Node::new(NodeKind::TaskCheckBox { checked }, range))
            }
            other => debug!("ignoring unsupported event {:?}", other),
        }
    }

    /// Maps an opening tag to the node kind it starts.
    fn open_kind(&self, tag: Tag<'_>) -> NodeKind {
        match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading { level, .. } => NodeKind::Heading {
                level: heading_level(level),
            },
            Tag::BlockQuote(_) => NodeKind::BlockQuote,
            Tag::CodeBlock(kind) => match kind {
                CodeBlockKind::Fenced(info) => NodeKind::CodeBlock {
                    language: info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.to_string()),
                    literal: String::new(),
                    fenced: true,
                },
                CodeBlockKind::Indented => NodeKind::CodeBlock {
                    language: None,
                    literal: String::new(),
                    fenced: false,
                },
            },
            Tag::HtmlBlock => NodeKind::HtmlBlock {
                html: String::new(),
            },
            Tag::List(start) => NodeKind::List {
                ordered: start.is_some(),
                // Settled when the list closes.
                tight: true,
            },
            Tag::Item => NodeKind::ListItem,
            Tag::Table(_) => NodeKind::Table,
            Tag::TableHead => NodeKind::TableHeader,
            Tag::TableRow => NodeKind::TableRow,
            Tag::TableCell => NodeKind::TableCell {
                header: matches!(self.stack.last().map(|n| &n.kind), Some(NodeKind::TableHeader)),
            },
            Tag::Emphasis => NodeKind::Emphasis { level: 1 },
            Tag::Strong => NodeKind::Emphasis { level: 2 },
            Tag::Strikethrough => NodeKind::Strikethrough,
            Tag::Link {
                link_type,
                dest_url,
                ..
            } => match link_type {
                LinkType::Autolink => NodeKind::AutoLink {
                    url: dest_url.into_string(),
                },
                LinkType::Email => NodeKind::AutoLink {
                    url: mailto(&dest_url),
                },
                _ => NodeKind::Link {
                    destination: dest_url.into_string(),
                },
            },
            Tag::Image { dest_url, .. } => NodeKind::Image {
                destination: dest_url.into_string(),
            },
            Tag::FootnoteDefinition(_) => NodeKind::Other {
                name: "footnote_definition".to_string(),
            },
            Tag::MetadataBlock(_) => NodeKind::Other {
                name: "metadata_block".to_string(),
            },
            #[allow(unreachable_patterns)]
            _ => NodeKind::Other {
                name: "unknown".to_string(),
            },
        }
    }

    fn top_kind_mut(&mut self) -> &mut NodeKind {
        // The document root is never popped, so the stack is never empty here.
        let last = self.stack.len() - 1;
        &mut self.stack[last].kind
    }

    fn leaf(&mut self, node: Node) {
        self.attach(node);
    }

    fn attach(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    fn close(&mut self) {
        if self.stack.len() < 2 {
            debug!("unbalanced end event ignored");
            return;
        }
        if let Some(mut node) = self.stack.pop() {
            settle(&mut node);
            trace!("close {}", node.kind.name());
            self.attach(node);
        }
    }

    fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack
            .pop()
            .unwrap_or_else(|| Node::new(NodeKind::Document, 0..0))
    }
}

/// Post-processing applied once a node's children are complete.
fn settle(node: &mut Node) {
    if !matches!(
        node.kind,
        NodeKind::Link { .. } | NodeKind::Image { .. } | NodeKind::AutoLink { .. }
    ) {
        linkify::linkify_children(node);
    }

    match node.kind {
        NodeKind::ListItem => wrap_inline_runs(node),
        NodeKind::List { ref mut tight, .. } => {
            // Loose lists are the ones whose items hold real paragraphs.
            *tight = !node.children.iter().any(|item| {
                item.children
                    .iter()
                    .any(|c| matches!(c.kind, NodeKind::Paragraph))
            });
        }
        _ => {}
    }
}

/// Groups consecutive inline children of a tight list item into `TextBlock`s,
/// so item content always consists of block nodes.
fn wrap_inline_runs(item: &mut Node) {
    if !item.children.iter().any(|c| c.kind.is_inline()) {
        return;
    }

    let children = std::mem::take(&mut item.children);
    let mut run: Vec<Node> = Vec::new();

    for child in children {
        if child.kind.is_inline() {
            run.push(child);
        } else {
            flush_run(&mut run, &mut item.children);
            item.children.push(child);
        }
    }
    flush_run(&mut run, &mut item.children);
}

fn flush_run(run: &mut Vec<Node>, into: &mut Vec<Node>) {
    if run.is_empty() {
        return;
    }
    let start = run.first().map(|n| n.span.start).unwrap_or(0);
    let end = run.last().map(|n| n.span.end).unwrap_or(start);
    into.push(Node::with_children(
        NodeKind::TextBlock,
        start..end,
        std::mem::take(run),
    ));
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn mailto(address: &str) -> String {
    if address.starts_with("mailto:") {
        address.to_string()
    } else {
        format!("mailto:{}", address)
    }
}
