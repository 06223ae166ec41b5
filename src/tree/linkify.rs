//! Extended autolinks.
//!
//! Bare `http://`, `https://`, `ftp://` and `www.` URLs and plain email
//! addresses in running text become [`NodeKind::AutoLink`] nodes, as GFM
//! does. Trailing punctuation and an unbalanced closing parenthesis are left
//! outside the link. `www.` links get an `http://` scheme, emails `mailto:`.

use super::{Node, NodeKind};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static RE_LINK_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:https?|ftp)://|\bwww\.)[^\s<]+|[a-z0-9._+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)+",
    )
    .unwrap()
});

const URL_PREFIXES: [&str; 4] = ["http://", "https://", "ftp://", "www."];

/// A link found in plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundLink {
    /// Byte range of the link text
    pub range: Range<usize>,
    /// Resolved destination
    pub url: String,
}

/// Finds the extended autolinks in `text`.
///
/// # Example
///
/// ```
/// use md2jira::tree::find_links;
///
/// let links = find_links("see www.example.com.");
/// assert_eq!(links[0].url, "http://www.example.com");
/// assert_eq!(links[0].range, 4..19);
/// ```
pub fn find_links(text: &str) -> Vec<FoundLink> {
    RE_LINK_CANDIDATE
        .find_iter(text)
        .filter_map(|m| {
            let (len, url) = resolve(m.as_str())?;
            Some(FoundLink {
                range: m.start()..m.start() + len,
                url,
            })
        })
        .collect()
}

/// Returns the accepted length of a candidate and its destination.
fn resolve(candidate: &str) -> Option<(usize, String)> {
    let lower = candidate.to_ascii_lowercase();
    let Some(prefix) = URL_PREFIXES.iter().find(|p| lower.starts_with(**p)) else {
        if candidate.ends_with(['-', '_', '.']) {
            return None;
        }
        return Some((candidate.len(), format!("mailto:{}", candidate)));
    };

    let link = trim_trailing(candidate);
    let host_start = link.get(prefix.len()..)?.chars().next()?;
    if !host_start.is_ascii_alphanumeric() {
        return None;
    }

    let url = if *prefix == "www." {
        format!("http://{}", link)
    } else {
        link.to_string()
    };
    Some((link.len(), url))
}

/// Drops trailing punctuation and unbalanced closing parentheses.
fn trim_trailing(link: &str) -> &str {
    let mut end = link.len();
    loop {
        let current = &link[..end];
        match current.chars().last() {
            Some('?' | '!' | '.' | ',' | ':' | ';' | '*' | '_' | '~' | '\'' | '"') => end -= 1,
            Some(')') if current.matches(')').count() > current.matches('(').count() => end -= 1,
            _ => return current,
        }
    }
}

/// Merges adjacent text children and splits them around extended autolinks.
pub(super) fn linkify_children(node: &mut Node) {
    if !node
        .children
        .iter()
        .any(|c| matches!(c.kind, NodeKind::Text { .. }))
    {
        return;
    }

    let children = std::mem::take(&mut node.children);
    let mut pending: Option<(String, Range<usize>)> = None;

    for child in children {
        if let NodeKind::Text { value } = &child.kind {
            match pending.as_mut() {
                Some((text, span)) => {
                    text.push_str(value);
                    span.end = span.end.max(child.span.end);
                }
                None => pending = Some((value.clone(), child.span.clone())),
            }
            continue;
        }
        flush_text(&mut pending, &mut node.children);
        node.children.push(child);
    }
    flush_text(&mut pending, &mut node.children);
}

fn flush_text(pending: &mut Option<(String, Range<usize>)>, into: &mut Vec<Node>) {
    if let Some((text, span)) = pending.take() {
        split_text(&text, span, into);
    }
}

fn split_text(text: &str, span: Range<usize>, into: &mut Vec<Node>) {
    // Sub-spans are only exact when no escapes or entities were decoded.
    let exact = span.len() == text.len();
    let sub_span = |range: &Range<usize>| {
        if exact {
            span.start + range.start..span.start + range.end
        } else {
            span.clone()
        }
    };

    let mut last = 0;
    for link in find_links(text) {
        if link.range.start > last {
            let before = last..link.range.start;
            into.push(Node::text(&text[before.clone()], sub_span(&before)));
        }
        let link_span = sub_span(&link.range);
        into.push(Node::with_children(
            NodeKind::AutoLink { url: link.url },
            link_span.clone(),
            vec![Node::text(&text[link.range.clone()], link_span)],
        ));
        last = link.range.end;
    }

    if last < text.len() {
        let rest = last..text.len();
        into.push(Node::text(&text[rest.clone()], sub_span(&rest)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(text: &str) -> Vec<String> {
        find_links(text).into_iter().map(|l| l.url).collect()
    }

    #[test]
    fn test_scheme_urls() {
        assert_eq!(urls("Visit https://example.com today"), vec!["https://example.com"]);
        assert_eq!(urls("http://a.b/c?d=e#f"), vec!["http://a.b/c?d=e#f"]);
        assert_eq!(urls("ftp://files.example.org/x"), vec!["ftp://files.example.org/x"]);
    }

    #[test]
    fn test_www_gets_scheme() {
        assert_eq!(urls("go to www.example.com"), vec!["http://www.example.com"]);
        assert_eq!(urls("WWW.Example.com"), vec!["http://WWW.Example.com"]);
    }

    #[test]
    fn test_trailing_punctuation_excluded() {
        let links = find_links("see https://example.com/path.");
        assert_eq!(links[0].url, "https://example.com/path");
        assert_eq!(links[0].range, 4..28);
        assert_eq!(urls("(https://example.com)"), vec!["https://example.com"]);
        assert_eq!(
            urls("https://en.wikipedia.org/wiki/Rust_(language)"),
            vec!["https://en.wikipedia.org/wiki/Rust_(language)"]
        );
    }

    #[test]
    fn test_emails() {
        assert_eq!(urls("mail me@example.com now"), vec!["mailto:me@example.com"]);
        assert!(urls("user@localhost").is_empty());
    }

    #[test]
    fn test_not_links() {
        assert!(urls("plain text").is_empty());
        assert!(urls("www. is not a link").is_empty());
        assert!(urls("https:// nothing").is_empty());
        assert!(urls("awww.example.com").is_empty());
        assert!(urls("www..").is_empty());
    }

    #[test]
    fn test_split_text_nodes() {
        let mut para = Node::with_children(
            NodeKind::Paragraph,
            0..31,
            vec![
                Node::text("Visit https://", 0..14),
                Node::text("example.com today", 14..31),
            ],
        );
        linkify_children(&mut para);

        let kinds: Vec<&str> = para.children.iter().map(|c| c.kind.name()).collect();
        assert_eq!(kinds, vec!["text", "auto_link", "text"]);
        assert_eq!(para.children[1].span, 6..25);
        assert_eq!(
            para.children[1].kind,
            NodeKind::AutoLink {
                url: "https://example.com".to_string()
            }
        );
    }
}
