//! # md2jira
//!
//! A Rust library for converting CommonMark/GFM Markdown into JIRA wiki markup.
//!
//! ## Pipeline
//!
//! 1. [`tree::parse`] builds a document tree with `pulldown-cmark`
//! 2. [`render::render`] walks the tree once and emits raw JIRA markup
//! 3. [`cleanup::normalize`] tidies blank lines and trailing whitespace
//!
//! Conversion never fails: unsupported constructs are degraded on a
//! best-effort basis and, when requested, reported as warnings.
//!
//! ## Quick Start
//!
//! ```
//! use md2jira::{convert, convert_with_options, ConvertOptions};
//!
//! assert_eq!(convert("**bold** and *italic*"), "*bold* and _italic_");
//!
//! let options = ConvertOptions::new().with_warnings();
//! let result = convert_with_options("<div>x</div>\n", &options);
//! assert_eq!(result.warnings.len(), 1);
//! ```
//!
//! ## Features
//!
//! - `async`: Async file and reader conversion with Tokio

pub mod cleanup;
pub mod error;
pub mod html;
pub mod language;
pub mod options;
pub mod render;
pub mod tree;

#[cfg(feature = "async")]
pub mod async_api;

// Re-exports
pub use cleanup::normalize;
pub use error::{Error, Result};
pub use options::ConvertOptions;
pub use render::{JiraRenderer, Rendered};
pub use tree::{Node, NodeKind};

use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Final output of a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// Normalized JIRA markup
    pub output: String,
    /// Best-effort conversion warnings (empty unless enabled)
    pub warnings: Vec<String>,
}

impl From<Rendered> for ConversionResult {
    fn from(rendered: Rendered) -> Self {
        Self {
            output: normalize(&rendered.output),
            warnings: rendered.warnings,
        }
    }
}

/// Converts Markdown to JIRA markup with default options.
///
/// # Example
///
/// ```
/// use md2jira::convert;
///
/// assert_eq!(convert("# Title"), "h1. Title");
/// assert_eq!(convert("[text](url)"), "[text|url]");
/// ```
pub fn convert(markdown: &str) -> String {
    convert_with_options(markdown, &ConvertOptions::default()).output
}

/// Converts Markdown to JIRA markup, returning the output and any warnings.
///
/// # Example
///
/// ```
/// use md2jira::{convert_with_options, ConvertOptions};
///
/// let options = ConvertOptions::new().with_preserved_html();
/// let result = convert_with_options("<table>\n</table>\n", &options);
/// assert_eq!(result.output, "<table>\n</table>");
/// ```
pub fn convert_with_options(markdown: &str, options: &ConvertOptions) -> ConversionResult {
    let doc = tree::parse(markdown);
    let result = ConversionResult::from(render::render(&doc, options));
    debug!(
        "converted {} bytes of Markdown into {} bytes ({} warnings)",
        markdown.len(),
        result.output.len(),
        result.warnings.len()
    );
    result
}

/// Converts a Markdown file.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
///
/// # Example
///
/// ```no_run
/// use md2jira::convert_file;
///
/// let jira = convert_file("README.md")?;
/// println!("{}", jira);
/// # Ok::<(), md2jira::Error>(())
/// ```
pub fn convert_file(path: impl AsRef<Path>) -> Result<String> {
    Converter::new().convert_file(path).map(|result| result.output)
}

/// Converts a Markdown file and writes the result to another file.
pub fn convert_file_to_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    let jira = convert_file(input)?;
    std::fs::write(output, jira)?;
    Ok(())
}

/// Converts several files in parallel.
///
/// Results are returned in input order; each conversion runs with its own
/// render state.
pub fn convert_files<P>(paths: &[P], options: &ConvertOptions) -> Vec<Result<ConversionResult>>
where
    P: AsRef<Path> + Sync,
{
    let converter = Converter::new().with_options(*options);
    paths
        .par_iter()
        .map(|path| converter.convert_file(path))
        .collect()
}

/// Returns the conventional output path for a converted file: the input's
/// stem with a `.jira` extension, inside `dir` or next to the input.
pub fn output_path(input: impl AsRef<Path>, dir: Option<&Path>) -> PathBuf {
    let input = input.as_ref();
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = PathBuf::from(stem);
    name.set_extension("jira");

    match dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Builder for configuring conversions.
///
/// # Example
///
/// ```
/// use md2jira::Converter;
///
/// let result = Converter::new()
///     .with_warnings()
///     .convert_with_warnings("<div>\n<b>x</b>\n</div>\n");
/// assert_eq!(result.output, "*x*");
/// assert_eq!(result.warnings.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Creates a new converter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all options at once.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Keeps block HTML verbatim.
    pub fn with_preserved_html(mut self) -> Self {
        self.options = self.options.with_preserved_html();
        self
    }

    /// Collects warnings for best-effort conversions.
    pub fn with_warnings(mut self) -> Self {
        self.options = self.options.with_warnings();
        self
    }

    /// Returns the options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converts Markdown text, discarding warnings.
    pub fn convert(&self, markdown: &str) -> String {
        self.convert_with_warnings(markdown).output
    }

    /// Converts Markdown text.
    pub fn convert_with_warnings(&self, markdown: &str) -> ConversionResult {
        convert_with_options(markdown, &self.options)
    }

    /// Converts raw bytes, replacing invalid UTF-8.
    pub fn convert_bytes(&self, data: &[u8]) -> ConversionResult {
        self.convert_with_warnings(&String::from_utf8_lossy(data))
    }

    /// Converts raw bytes, rejecting invalid UTF-8.
    pub fn convert_bytes_strict(&self, data: &[u8]) -> Result<ConversionResult> {
        let markdown = std::str::from_utf8(data)?;
        Ok(self.convert_with_warnings(markdown))
    }

    /// Converts a file.
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<ConversionResult> {
        let path = path.as_ref();
        debug!("reading {}", path.display());
        let data = std::fs::read(path)?;
        Ok(self.convert_bytes(&data))
    }

    /// Reads Markdown from `reader` and writes JIRA markup to `writer`.
    pub fn convert_reader<R: Read, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<Vec<String>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let result = self.convert_bytes(&data);
        writer.write_all(result.output.as_bytes())?;
        writer.flush()?;
        Ok(result.warnings)
    }
}
