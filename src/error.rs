//! Error types for md2jira library.
//!
//! Conversion itself never fails; these errors come from the I/O-facing
//! entry points.

use std::io;
use thiserror::Error;

/// Result type alias for md2jira operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for md2jira library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input bytes are not valid UTF-8.
    #[error("Text encoding error: {0}")]
    Encoding(String),

    /// A background conversion task could not be completed.
    #[error("Conversion task failed: {0}")]
    Task(String),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
