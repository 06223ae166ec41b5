//! Code-fence language names.
//!
//! JIRA's `{code}` macro only understands a fixed set of language names,
//! so informal Markdown tags (`js`, `sh`, `yml`, ...) are mapped onto them.

/// Sentinel meaning "emit no language tag".
pub const NO_LANGUAGE: &str = "none";

/// Markdown fence tag to JIRA language name.
const LANGUAGE_MAP: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("javascript", "javascript"),
    ("ts", "typescript"),
    ("typescript", "typescript"),
    ("py", "python"),
    ("python", "python"),
    ("rb", "ruby"),
    ("ruby", "ruby"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("shell", "bash"),
    ("json", "json"),
    ("xml", "xml"),
    ("html", "html"),
    ("css", "css"),
    ("sql", "sql"),
    ("java", "java"),
    ("go", "go"),
    ("golang", "go"),
    ("rust", "rust"),
    ("c", "cpp"),
    ("cpp", "cpp"),
    ("c++", "cpp"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("php", "php"),
    ("swift", "swift"),
    ("kotlin", "kotlin"),
    ("scala", "scala"),
    ("r", "r"),
    ("perl", "perl"),
    ("groovy", "groovy"),
    ("powershell", "powershell"),
    ("ps1", "powershell"),
    ("dockerfile", "dockerfile"),
    ("makefile", "makefile"),
    // Prose formats have no highlighting
    ("markdown", NO_LANGUAGE),
    ("md", NO_LANGUAGE),
    ("text", NO_LANGUAGE),
    ("txt", NO_LANGUAGE),
    ("plaintext", NO_LANGUAGE),
];

/// Maps a fence language tag to its JIRA name.
///
/// Lookup is case-insensitive and ignores surrounding whitespace. Unknown
/// names pass through lower-cased.
///
/// # Example
///
/// ```
/// use md2jira::language::map_language;
///
/// assert_eq!(map_language("JS"), "javascript");
/// assert_eq!(map_language("txt"), "none");
/// assert_eq!(map_language("elixir"), "elixir");
/// ```
pub fn map_language(lang: &str) -> String {
    let key = lang.trim().to_lowercase();
    LANGUAGE_MAP
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or(key)
}

/// Returns the language tag for a `{code:...}` macro, if one should be emitted.
pub fn code_macro_language(lang: Option<&str>) -> Option<String> {
    let mapped = map_language(lang?);
    if mapped.is_empty() || mapped == NO_LANGUAGE {
        None
    } else {
        Some(mapped)
    }
}

/// Returns the full mapping table.
pub fn languages() -> &'static [(&'static str, &'static str)] {
    LANGUAGE_MAP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(map_language("sh"), "bash");
        assert_eq!(map_language("shell"), "bash");
        assert_eq!(map_language("golang"), "go");
        assert_eq!(map_language("c++"), "cpp");
        assert_eq!(map_language("yml"), "yaml");
        assert_eq!(map_language("ps1"), "powershell");
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(map_language("  Python "), "python");
        assert_eq!(map_language("TypeScript"), "typescript");
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(map_language("Haskell"), "haskell");
        assert_eq!(map_language(""), "");
    }

    #[test]
    fn test_code_macro_language() {
        assert_eq!(code_macro_language(Some("js")), Some("javascript".to_string()));
        assert_eq!(code_macro_language(Some("md")), None);
        assert_eq!(code_macro_language(Some("")), None);
        assert_eq!(code_macro_language(Some("none")), None);
        assert_eq!(code_macro_language(None), None);
    }

    #[test]
    fn test_every_target_is_lowercase() {
        for (from, to) in languages() {
            assert_eq!(*from, from.to_lowercase());
            assert_eq!(*to, to.to_lowercase());
        }
    }
}
