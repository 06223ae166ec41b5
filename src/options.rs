//! Conversion options.

use serde::{Deserialize, Serialize};

/// Options controlling a Markdown to JIRA conversion.
///
/// Options are read-only for the duration of a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Emit block-level raw HTML verbatim instead of downgrading it.
    pub preserve_raw_html: bool,

    /// Record a warning for every construct converted on a best-effort basis.
    pub warn_on_unsupported: bool,

    /// Caller-facing flag; does not change the output.
    pub verbose: bool,
}

impl ConvertOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps raw HTML blocks as-is.
    pub fn with_preserved_html(mut self) -> Self {
        self.preserve_raw_html = true;
        self
    }

    /// Enables warnings for best-effort conversions.
    pub fn with_warnings(mut self) -> Self {
        self.warn_on_unsupported = true;
        self
    }

    /// Marks the conversion as verbose.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}
