//! # Output Cleanup
//!
//! Final normalization applied once to the rendered buffer.
//!
//! 1. Trailing spaces, tabs and carriage returns are removed from every line
//! 2. Runs of three or more newlines collapse to exactly two
//! 3. Leading and trailing whitespace of the whole text is removed
//!
//! Line trimming runs before collapsing so whitespace-only lines cannot
//! reintroduce long blank runs; this keeps `normalize` idempotent.

use regex::Regex;
use std::sync::LazyLock;

static RE_MULTIPLE_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalizes rendered JIRA markup.
///
/// # Example
///
/// ```
/// use md2jira::cleanup::normalize;
///
/// assert_eq!(normalize("\n\na  \n\n\n\nb\n"), "a\n\nb");
/// ```
pub fn normalize(output: &str) -> String {
    let trimmed = trim_line_ends(output);
    let collapsed = RE_MULTIPLE_NEWLINES.replace_all(&trimmed, "\n\n");
    collapsed.trim().to_string()
}

/// Removes trailing horizontal whitespace from each line.
fn trim_line_ends(input: &str) -> String {
    input
        .split('\n')
        .map(|line| line.trim_end_matches([' ', '\t', '\r']))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_newlines() {
        assert_eq!(normalize("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\nb"), "a\nb");
    }

    #[test]
    fn test_trailing_whitespace_per_line() {
        assert_eq!(normalize("a  \nb\t\nc"), "a\nb\nc");
        assert_eq!(normalize("crlf\r\nline\r\n"), "crlf\nline");
    }

    #[test]
    fn test_leading_whitespace_inside_lines_is_kept() {
        assert_eq!(normalize("{code}\n    indented\n{code}"), "{code}\n    indented\n{code}");
    }

    #[test]
    fn test_whole_text_trimmed() {
        assert_eq!(normalize("\n\n  h1. Title\n\n"), "h1. Title");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n \n "), "");
    }

    #[test]
    fn test_whitespace_only_lines_collapse() {
        assert_eq!(normalize("a\n\n \n\nb"), "a\n\nb");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "h1. Title\n\n\n\nparagraph   \n* item\n\n\n",
            "  {quote}\n \t\nquoted\n{quote}\n\n\n\n----\n\n",
            "a\n\n \n\n\t\n\nb",
            "||H1||H2||\n|C1|C2|\n\n",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
