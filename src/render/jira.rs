//! JIRA markup renderer implementation.

use super::list::ListStack;
use super::Rendered;
use crate::html;
use crate::language::code_macro_language;
use crate::options::ConvertOptions;
use crate::tree::{Node, NodeKind};
use log::{debug, trace};

/// Warning recorded for every downgraded or preserved HTML block.
pub const HTML_BLOCK_WARNING: &str = "HTML block found - converted with best effort";

/// Which side of a node the traversal is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Enter,
    Exit,
}

/// Mutable state of a single conversion.
///
/// Created by [`JiraRenderer::render`] and dropped when it returns, so
/// independent conversions never share anything.
#[derive(Debug)]
struct RenderContext {
    out: String,
    lists: ListStack,
    tight_list: bool,
    warn_on_unsupported: bool,
    warnings: Vec<String>,
}

impl RenderContext {
    fn new(options: &ConvertOptions, capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            lists: ListStack::new(),
            tight_list: false,
            warn_on_unsupported: options.warn_on_unsupported,
            warnings: Vec::new(),
        }
    }

    fn in_tight_list(&self) -> bool {
        self.tight_list && !self.lists.is_empty()
    }

    fn warn(&mut self, message: &str) {
        if self.warn_on_unsupported {
            self.warnings.push(message.to_string());
        }
    }
}

/// JIRA renderer.
///
/// A depth-first enter/exit traversal: each node gets an enter action, then
/// its children (unless it is a leaf or renders its own children), then an
/// exit action.
#[derive(Debug, Clone)]
pub struct JiraRenderer {
    options: ConvertOptions,
}

impl JiraRenderer {
    /// Creates a new renderer with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Renders a document tree to raw (not yet normalized) JIRA markup.
    pub fn render(&self, doc: &Node) -> Rendered {
        let mut ctx = RenderContext::new(&self.options, doc.span.len() + doc.span.len() / 4);

        self.walk(doc, true, &mut ctx);

        debug_assert!(ctx.lists.is_empty(), "list stack not empty after traversal");

        Rendered {
            output: ctx.out,
            warnings: ctx.warnings,
        }
    }

    fn walk(&self, node: &Node, last: bool, ctx: &mut RenderContext) {
        trace!("enter {}", node.kind.name());
        self.visit(node, Phase::Enter, last, ctx);
        if !is_leaf(&node.kind) && !manages_children(&node.kind) {
            self.walk_children(node, ctx);
        }
        self.visit(node, Phase::Exit, last, ctx);
    }

    fn walk_children(&self, node: &Node, ctx: &mut RenderContext) {
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            self.walk(child, i + 1 == count, ctx);
        }
    }

    /// Emission rule for one side of one node.
    fn visit(&self, node: &Node, phase: Phase, last: bool, ctx: &mut RenderContext) {
        use Phase::{Enter, Exit};

        match (&node.kind, phase) {
            // Blocks
            (NodeKind::Heading { level }, Enter) => {
                ctx.out.push_str(&format!("h{}. ", level));
            }
            (NodeKind::Heading { .. }, Exit) => ctx.out.push_str("\n\n"),
            (NodeKind::Paragraph, Exit) => {
                if !ctx.in_tight_list() {
                    ctx.out.push_str("\n\n");
                }
            }
            (NodeKind::ThematicBreak, Enter) => ctx.out.push_str("----\n\n"),
            (NodeKind::BlockQuote, Enter) => ctx.out.push_str("{quote}\n"),
            (NodeKind::BlockQuote, Exit) => ctx.out.push_str("{quote}\n\n"),
            (
                NodeKind::CodeBlock {
                    language, literal, ..
                },
                Enter,
            ) => render_code_block(language.as_deref(), literal, ctx),
            (NodeKind::HtmlBlock { html }, Enter) => self.render_html_block(html, ctx),

            // Lists
            (NodeKind::List { ordered, tight }, Enter) => {
                if !ctx.lists.is_empty() {
                    ctx.out.push('\n');
                }
                ctx.lists.push(*ordered);
                ctx.tight_list = *tight;
            }
            (NodeKind::List { .. }, Exit) => {
                ctx.lists.pop();
                if ctx.lists.is_empty() {
                    ctx.tight_list = false;
                    ctx.out.push('\n');
                }
            }
            (NodeKind::ListItem, Enter) => {
                ctx.out.push_str(&ctx.lists.prefix());
                ctx.out.push(' ');
            }
            (NodeKind::ListItem, Exit) => ctx.out.push('\n'),
            (NodeKind::TaskCheckBox { checked }, Enter) => {
                ctx.out.push_str(if *checked { "(/) " } else { "( ) " });
            }

            // Tables
            (NodeKind::Table | NodeKind::TableHeader | NodeKind::TableRow, Exit) => {
                ctx.out.push('\n');
            }
            (NodeKind::TableCell { header }, Enter) => ctx.out.push_str(cell_marker(*header)),
            (NodeKind::TableCell { header }, Exit) if last => {
                ctx.out.push_str(cell_marker(*header));
            }

            // Inlines
            (NodeKind::Text { value }, Enter) => ctx.out.push_str(value),
            (NodeKind::SoftBreak, Enter) => ctx.out.push('\n'),
            (NodeKind::HardBreak, Enter) => ctx.out.push_str("\\\\\n"),
            (NodeKind::Emphasis { level }, _) => ctx.out.push_str(emphasis_delimiter(*level)),
            (NodeKind::Strikethrough, _) => ctx.out.push('-'),
            (NodeKind::CodeSpan { value }, Enter) => {
                ctx.out.push_str("{{");
                ctx.out.push_str(value);
                ctx.out.push_str("}}");
            }
            (NodeKind::Link { destination }, Enter) => render_link(node, destination, ctx),
            (NodeKind::AutoLink { url }, Enter) => {
                ctx.out.push_str(&format!("[{}]", url));
            }
            (NodeKind::Image { destination }, Enter) => render_image(node, destination, ctx),
            (NodeKind::RawHtml { html }, Enter) => ctx.out.push_str(&html::downgrade(html)),

            (NodeKind::Other { name }, Enter) => {
                debug!("no emission rule for {}, rendering children", name);
            }
            // Document, text blocks and the remaining sides emit nothing.
            _ => {}
        }
    }

    fn render_html_block(&self, html: &str, ctx: &mut RenderContext) {
        if self.options.preserve_raw_html {
            ctx.out.push_str(html);
        } else {
            debug!("downgrading {} bytes of block HTML", html.len());
            ctx.out.push_str(&html::downgrade(html));
        }
        ctx.warn(HTML_BLOCK_WARNING);
    }
}

impl Default for JiraRenderer {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

/// Kinds whose content is taken from the node itself rather than from
/// a child traversal.
fn is_leaf(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Text { .. }
            | NodeKind::SoftBreak
            | NodeKind::HardBreak
            | NodeKind::CodeSpan { .. }
            | NodeKind::CodeBlock { .. }
            | NodeKind::ThematicBreak
            | NodeKind::HtmlBlock { .. }
            | NodeKind::RawHtml { .. }
            | NodeKind::TaskCheckBox { .. }
    )
}

/// Kinds that render their own children with a restricted rule set.
fn manages_children(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Link { .. } | NodeKind::Image { .. } | NodeKind::AutoLink { .. }
    )
}

fn emphasis_delimiter(level: u8) -> &'static str {
    match level {
        1 => "_",
        2 => "*",
        _ => "",
    }
}

fn cell_marker(header: bool) -> &'static str {
    if header {
        "||"
    } else {
        "|"
    }
}

fn render_code_block(language: Option<&str>, literal: &str, ctx: &mut RenderContext) {
    match code_macro_language(language) {
        Some(lang) => ctx.out.push_str(&format!("{{code:{}}}\n", lang)),
        None => ctx.out.push_str("{code}\n"),
    }

    ctx.out.push_str(literal);
    if !literal.is_empty() && !literal.ends_with('\n') {
        ctx.out.push('\n');
    }

    ctx.out.push_str("{code}\n\n");
}

fn render_link(node: &Node, destination: &str, ctx: &mut RenderContext) {
    let mut text = String::new();
    for child in &node.children {
        link_text(child, &mut text);
    }

    if text.is_empty() || text == destination {
        ctx.out.push_str(&format!("[{}]", destination));
    } else {
        ctx.out.push_str(&format!("[{}|{}]", text, destination));
    }
}

/// Inline renderer used for link labels.
fn link_text(node: &Node, buf: &mut String) {
    match &node.kind {
        NodeKind::Text { value } => buf.push_str(value),
        NodeKind::CodeSpan { value } => {
            buf.push_str("{{");
            buf.push_str(value);
            buf.push_str("}}");
        }
        NodeKind::Emphasis { level } => {
            let delimiter = if *level == 1 { "_" } else { "*" };
            buf.push_str(delimiter);
            for child in &node.children {
                link_text(child, buf);
            }
            buf.push_str(delimiter);
        }
        NodeKind::SoftBreak | NodeKind::HardBreak => buf.push(' '),
        _ => {
            for child in &node.children {
                link_text(child, buf);
            }
        }
    }
}

fn render_image(node: &Node, destination: &str, ctx: &mut RenderContext) {
    let alt = node.direct_text();
    if alt.is_empty() {
        ctx.out.push_str(&format!("!{}!", destination));
    } else {
        ctx.out.push_str(&format!("!{}|alt={}!", destination, alt));
    }
}
