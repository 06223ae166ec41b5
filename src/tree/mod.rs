//! Markdown document tree.
//!
//! The tree is the contract between parsing and rendering: the front-end
//! in [`builder`] turns Markdown text into [`Node`]s, the renderer only
//! reads them.

mod builder;
mod linkify;
mod node;

pub use builder::{parse, parser_options};
pub use linkify::{find_links, FoundLink};
pub use node::{Node, NodeKind};
