//! # confcheck
//!
//! Syntax and trailing-newline validation for configuration files changed in
//! a pull request.
//!
//! The crate is the **validation engine** only. It never talks to a
//! source-control host itself: callers hand it the list of changed files and
//! a [`ContentSource`] that knows how to fetch a file by path.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use confcheck::{
//!     ChangedFile, Configuration, ContentSource, FetchError, FetchedContent, validate_files,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! struct Inline;
//!
//! #[async_trait]
//! impl ContentSource for Inline {
//!     async fn get_file_content(&self, _path: &str) -> Result<FetchedContent, FetchError> {
//!         Ok(FetchedContent::plain(b"key: value\n".to_vec()))
//!     }
//! }
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Configuration::new(Some("token".to_owned()), true, None)?;
//! let files = vec![ChangedFile::new("deploy/app.yaml"), ChangedFile::new("logo.png")];
//!
//! let set = validate_files(&config, Arc::new(Inline), &files, &CancellationToken::new()).await?;
//! println!("Files checked: {}", set.len());
//! println!("Invalid: {}", set.invalid().len());
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
pub mod fetch;
pub mod format;
pub mod newline;
pub mod output;
pub mod pattern;
mod report;
mod validate;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

pub use config::{Configuration, DEFAULT_INCLUDE};
pub use error::{
    ConfigError, DecodeError, FetchError, PatternError, SyntaxError, ValidateError,
};
pub use fetch::{ChangedFile, ContentSource, Encoding, FetchedContent};
pub use format::{Checker, FormatRegistry};
pub use pattern::IncludePattern;
pub use report::{Check, Validation, ValidationSet};
pub use validate::{Validator, inspect_content};

/// Validate changed files with the built-in format checkers.
///
/// Convenience wrapper over [`Validator::validate_files`].
///
/// # Errors
///
/// Returns `ValidateError::Cancelled` if `cancel` fires before every in-scope
/// file has been checked.
pub async fn validate_files(
    config: &Configuration,
    source: Arc<dyn ContentSource>,
    files: &[ChangedFile],
    cancel: &CancellationToken,
) -> Result<ValidationSet, ValidateError> {
    Validator::new(config, source)
        .validate_files(files, cancel)
        .await
}
