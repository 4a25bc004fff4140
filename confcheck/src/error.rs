//! Error types for configuration file validation.
//!
//! Two layers are kept apart here. Run-level errors (`ConfigError`,
//! `ValidateError`) abort a validation call and reach the caller. Per-file
//! errors (`FetchError`, `DecodeError`, `SyntaxError`) never abort anything:
//! the orchestrator folds them into the file's `Validation` record.

use thiserror::Error;

/// A malformed include pattern.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid include pattern '{pattern}': {message}")]
pub struct PatternError {
    /// The pattern as it was supplied.
    pub pattern: String,
    /// Parser message describing what is wrong with it.
    pub message: String,
}

/// Startup configuration failures. Fatal, reported before any file is touched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("[Configuration] Missing GitHub access token")]
    MissingToken,
    #[error("[Configuration] {0}")]
    InvalidPattern(#[from] PatternError),
}

/// Failure reported by a content source while fetching a single file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("failed to reach host: {0}")]
    Transport(String),
    /// The host answered with a non-success status.
    #[error("host responded with status {status}: {message}")]
    Status { status: u16, message: String },
    /// The file does not exist at the requested revision.
    #[error("file not found: {0}")]
    NotFound(String),
    /// The response body could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Failure to turn fetched content into raw bytes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("unsupported content encoding '{0}'")]
    UnsupportedEncoding(String),
    #[error("invalid base64 content: {0}")]
    Base64(String),
}

/// A checker's verdict that content is not a well-formed document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {format}: {message}")]
pub struct SyntaxError {
    /// Short format name (`JSON`, `YAML`, ...).
    pub format: &'static str,
    /// The parser's own message.
    pub message: String,
}

impl SyntaxError {
    #[must_use]
    pub fn new(format: &'static str, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

/// Run-level failures of `validate_files`.
///
/// A call either returns a complete `ValidationSet` or one of these;
/// partial result sets are never handed out. Malformed include patterns are
/// rejected earlier, when the `Configuration` is built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidateError {
    #[error("validation cancelled before all files were checked")]
    Cancelled,
}
