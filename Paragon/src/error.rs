//! Error types for `Paragon`

use thiserror::Error;

/// A failure raised while scanning a dialogue script.
///
/// This is the only error kind produced by the game and pretty script parsers
/// and by the quick-script generator. A malformed script never yields a partial
/// command sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("error at line {line}, column {column}: {message}")]
pub struct ScannerError {
    /// 1-based line of the character that could not be scanned.
    pub line: usize,
    /// 0-based column within `line`.
    pub column: usize,
    /// Human readable description of what went wrong.
    pub message: String,
}

impl ScannerError {
    /// Create a new scanner error at the given position.
    #[must_use]
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    /// Render the offending source line followed by a caret under `column`.
    ///
    /// Returns `None` if `line` lies outside `source`.
    #[must_use]
    pub fn render_context(&self, source: &str) -> Option<String> {
        let text = source.lines().nth(self.line.checked_sub(1)?)?;
        let width = text.chars().count().min(self.column);
        Some(format!("{text}\n{}^", " ".repeat(width)))
    }
}

/// The error type for `Paragon` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// A dialogue script could not be parsed.
    #[error("script error: {0}")]
    Scanner(#[from] ScannerError),

    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config parsing error.
    #[error("TOML config error: {0}")]
    TomlConfig(#[from] toml::de::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Config file extension is neither `.toml` nor `.json`.
    #[error("unsupported config format: {0}")]
    UnsupportedConfigFormat(String),
}

/// A specialized Result type for `Paragon` operations.
pub type Result<T> = std::result::Result<T, Error>;
