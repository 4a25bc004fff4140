//! Format-specific syntax checkers and the extension registry.
//!
//! Each sub-module exposes one checker for one format:
//! - `json`: any JSON value, strict grammar
//! - `yaml`: one or more YAML documents
//! - `toml`: a TOML document (top-level table)
//! - `hcl`: an HCL body (attributes and blocks)
//! - `ini`: INI sections and key/value pairs
//!
//! A checker only answers "does this parse"; it never inspects the parsed
//! value. New formats are added by registering a checker under an extension,
//! not by extending a dispatch `match`.

pub mod hcl;
pub mod ini;
pub mod json;
pub mod toml;
pub mod yaml;

use std::collections::HashMap;
use std::path::Path;

use crate::error::SyntaxError;

/// A pure function deciding whether bytes form a well-formed document.
pub type Checker = fn(&[u8]) -> Result<(), SyntaxError>;

/// Extension to checker lookup table.
///
/// `Default` yields the built-in formats; [`FormatRegistry::empty`] starts
/// from nothing. Extensions are stored lowercase without the leading dot.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    checkers: HashMap<String, Checker>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("json", json::check_json);
        registry.register("yaml", yaml::check_yaml);
        registry.register("yml", yaml::check_yaml);
        registry.register("toml", toml::check_toml);
        registry.register("hcl", hcl::check_hcl);
        registry.register("ini", ini::check_ini);
        registry
    }
}

impl FormatRegistry {
    /// A registry with no checkers at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            checkers: HashMap::new(),
        }
    }

    /// Register `checker` for `extension`, replacing any previous entry.
    ///
    /// Returns the replaced checker, if there was one.
    pub fn register(&mut self, extension: &str, checker: Checker) -> Option<Checker> {
        self.checkers.insert(normalize_extension(extension), checker)
    }

    /// Look up the checker for an extension (`"json"`, `".JSON"`, ...).
    #[must_use]
    pub fn checker_for(&self, extension: &str) -> Option<Checker> {
        self.checkers.get(&normalize_extension(extension)).copied()
    }

    /// Look up the checker for a file path by its final extension.
    #[must_use]
    pub fn checker_for_path(&self, path: &str) -> Option<Checker> {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.checker_for(ext))
    }

    /// Registered extensions, sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.checkers.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

/// View content as UTF-8 text, reporting invalid bytes as a syntax failure.
pub(crate) fn as_text<'a>(
    format: &'static str,
    content: &'a [u8],
) -> Result<&'a str, SyntaxError> {
    std::str::from_utf8(content)
        .map_err(|e| SyntaxError::new(format, format!("content is not valid UTF-8: {e}")))
}

/// Collapse a multi-line parser diagnostic into a single line.
pub(crate) fn squash(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}
