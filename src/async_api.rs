//! Async API for non-blocking conversion.
//!
//! Enable the `async` feature to use these APIs:
//!
//! ```toml
//! [dependencies]
//! md2jira = { version = "1.0", features = ["async"] }
//! ```

use crate::error::{Error, Result};
use crate::options::ConvertOptions;
use crate::ConversionResult;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Asynchronously converts a Markdown file with default options.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> md2jira::Result<()> {
/// let jira = md2jira::async_api::convert_file("README.md").await?;
/// println!("{}", jira);
/// # Ok(())
/// # }
/// ```
pub async fn convert_file(path: impl AsRef<Path>) -> Result<String> {
    let result = convert_file_with_options(path, &ConvertOptions::default()).await?;
    Ok(result.output)
}

/// Asynchronously converts a Markdown file with custom options.
pub async fn convert_file_with_options(
    path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConversionResult> {
    let data = fs::read(path).await?;
    convert_bytes(data, options).await
}

/// Asynchronously converts Markdown read from an async reader.
pub async fn convert_reader<R: AsyncRead + Unpin>(
    mut reader: R,
    options: &ConvertOptions,
) -> Result<ConversionResult> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).await?;
    convert_bytes(data, options).await
}

/// Asynchronously converts a Markdown file and writes the result to another file.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> md2jira::Result<()> {
/// md2jira::async_api::convert_file_to_file("notes.md", "notes.jira").await?;
/// # Ok(())
/// # }
/// ```
pub async fn convert_file_to_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<()> {
    let jira = convert_file(input).await?;
    fs::write(output, jira).await?;
    Ok(())
}

/// Runs the CPU-bound conversion on the blocking pool.
async fn convert_bytes(data: Vec<u8>, options: &ConvertOptions) -> Result<ConversionResult> {
    let options = *options;
    tokio::task::spawn_blocking(move || {
        crate::convert_with_options(&String::from_utf8_lossy(&data), &options)
    })
    .await
    .map_err(|e| Error::Task(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_convert_reader() {
        let input: &[u8] = b"# Title\n\n**bold**";
        let result = convert_reader(input, &ConvertOptions::default())
            .await
            .unwrap();
        assert_eq!(result.output, "h1. Title\n\n*bold*");
    }

    #[tokio::test]
    async fn test_convert_file_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.md");
        let output = dir.path().join("out.jira");
        std::fs::write(&input, "- [x] done").unwrap();

        convert_file_to_file(&input, &output).await.unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "* (/) done");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = convert_file("/nonexistent/path/to/file.md").await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
