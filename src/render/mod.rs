//! JIRA rendering for document trees.
//!
//! The renderer walks a [`Node`] tree once and produces raw markup plus
//! the warnings collected along the way. The raw markup still needs
//! [`crate::cleanup::normalize`] before it is handed to callers.

mod jira;
mod list;

pub use jira::{JiraRenderer, HTML_BLOCK_WARNING};
pub use list::{ListContext, ListStack};

use crate::options::ConvertOptions;
use crate::tree::Node;
use serde::Serialize;

/// Raw renderer output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rendered {
    /// Unnormalized JIRA markup
    pub output: String,
    /// Warnings in the order they were raised
    pub warnings: Vec<String>,
}

/// Renders a document tree to raw JIRA markup.
pub fn render(root: &Node, options: &ConvertOptions) -> Rendered {
    JiraRenderer::new(*options).render(root)
}
