//! Content fetching and transfer decoding.
//!
//! The engine never talks to a source-control host directly. It asks a
//! [`ContentSource`] for a file by path and decodes whatever transfer
//! encoding the source reports.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{DecodeError, FetchError};

/// A changed file as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Repository-relative path.
    pub filename: String,
}

impl ChangedFile {
    #[must_use]
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// Raw file content plus the transfer encoding the host reported for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedContent {
    pub raw: Vec<u8>,
    /// Encoding tag, e.g. `base64`. Empty when the host sent none.
    pub encoding: String,
}

impl FetchedContent {
    /// Content sent as-is, without a transfer encoding.
    #[must_use]
    pub fn plain(raw: impl Into<Vec<u8>>) -> Self {
        Self {
            raw: raw.into(),
            encoding: String::new(),
        }
    }

    #[must_use]
    pub fn with_encoding(raw: impl Into<Vec<u8>>, encoding: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            encoding: encoding.into(),
        }
    }

    /// Decode the raw payload according to its encoding tag.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::UnsupportedEncoding` for tags other than
    /// `base64`, `none`, `plain`, `utf-8` or the empty tag, and
    /// `DecodeError::Base64` when a base64 payload is corrupt.
    pub fn decode(&self) -> Result<Vec<u8>, DecodeError> {
        match Encoding::parse(&self.encoding)? {
            Encoding::Plain => Ok(self.raw.clone()),
            Encoding::Base64 => {
                // Hosts wrap base64 payloads at a fixed column width.
                let compact: Vec<u8> = self
                    .raw
                    .iter()
                    .copied()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();
                STANDARD
                    .decode(compact)
                    .map_err(|e| DecodeError::Base64(e.to_string()))
            }
        }
    }
}

/// Transfer encodings the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    Base64,
}

impl Encoding {
    /// Interpret an encoding tag. Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::UnsupportedEncoding` for unknown tags.
    pub fn parse(tag: &str) -> Result<Self, DecodeError> {
        let tag = tag.trim();
        if tag.is_empty()
            || ["none", "plain", "utf-8", "utf8"]
                .iter()
                .any(|known| tag.eq_ignore_ascii_case(known))
        {
            return Ok(Self::Plain);
        }
        if tag.eq_ignore_ascii_case("base64") {
            return Ok(Self::Base64);
        }
        Err(DecodeError::UnsupportedEncoding(tag.to_owned()))
    }
}

/// Capability that retrieves a file's content from the host.
///
/// Authentication, rate limiting, pagination and retries are the
/// implementor's business. Implementations must be cheap to share across
/// tasks; the orchestrator holds them behind an `Arc`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the content of `path` at the revision under review.
    async fn get_file_content(&self, path: &str) -> Result<FetchedContent, FetchError>;
}
