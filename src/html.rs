//! # Inline-HTML Downgrade
//!
//! Raw HTML has no place in JIRA markup. A fixed subset of inline tags is
//! rewritten into its JIRA equivalent and every other tag is dropped.
//!
//! ## Stages
//!
//! 1. `<sup>` → `^x^`
//! 2. `<sub>` → `~x~`
//! 3. `<br>`, `<br/>` → `\\`
//! 4. `<strong>`, `<b>` → `*x*`
//! 5. `<em>`, `<i>` → `_x_`
//! 6. `<code>` → `{{x}}`
//! 7. `<del>`, `<s>` → `-x-`
//! 8. `<u>` → `+x+`
//! 9. Any remaining `<...>` is removed
//!
//! Stage order is part of the contract: the final strip must run last, or
//! the tags above would vanish before their content is wrapped. Stages only
//! match tag pairs without another tag in between.

use regex::Regex;
use std::sync::LazyLock;

/// One substitution of the pipeline.
struct Stage {
    pattern: Regex,
    replacement: &'static str,
}

impl Stage {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }
}

static STAGES: LazyLock<[Stage; 9]> = LazyLock::new(|| {
    [
        Stage::new(r"<sup>([^<]*)</sup>", "^${1}^"),
        Stage::new(r"<sub>([^<]*)</sub>", "~${1}~"),
        Stage::new(r"<br\s*/?>", r"\\"),
        Stage::new(r"<(?:strong|b)>([^<]*)</(?:strong|b)>", "*${1}*"),
        Stage::new(r"<(?:em|i)>([^<]*)</(?:em|i)>", "_${1}_"),
        Stage::new(r"<code>([^<]*)</code>", "{{${1}}}"),
        Stage::new(r"<(?:del|s)>([^<]*)</(?:del|s)>", "-${1}-"),
        Stage::new(r"<u>([^<]*)</u>", "+${1}+"),
        // Must stay last
        Stage::new(r"<[^>]+>", ""),
    ]
});

/// Converts common inline HTML to JIRA markup and strips the rest.
///
/// # Example
///
/// ```
/// use md2jira::html::downgrade;
///
/// assert_eq!(downgrade("E = mc<sup>2</sup>"), "E = mc^2^");
/// assert_eq!(downgrade("<div class=\"x\"><b>bold</b></div>"), "*bold*");
/// ```
pub fn downgrade(html: &str) -> String {
    let mut result = html.to_string();
    for stage in STAGES.iter() {
        result = stage
            .pattern
            .replace_all(&result, stage.replacement)
            .into_owned();
    }
    result
}
