//! Include-pattern matching for changed file paths.
//!
//! Standard glob syntax plus brace alternation (`{json,yaml}`) and the
//! recursive wildcard (`**`). A single `*` never crosses a `/`, and a leading
//! `**/` also matches files at the repository root.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::PatternError;

/// A compiled include pattern.
#[derive(Debug, Clone)]
pub struct IncludePattern {
    source: String,
    matcher: GlobMatcher,
}

impl IncludePattern {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// Returns `PatternError` if the pattern is malformed, e.g. a dangling
    /// escape (`\`), an unclosed character class or an unclosed brace group.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|e| PatternError {
                pattern: pattern.to_owned(),
                message: e.to_string(),
            })?;

        Ok(Self {
            source: pattern.to_owned(),
            matcher: glob.compile_matcher(),
        })
    }

    /// Whether `path` (repository-relative, `/`-separated) is in scope.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// The pattern text this matcher was compiled from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// One-shot form of [`IncludePattern::matches`].
///
/// # Errors
///
/// Returns `PatternError` if `pattern` does not compile.
pub fn matches(pattern: &str, path: &str) -> Result<bool, PatternError> {
    Ok(IncludePattern::new(pattern)?.matches(path))
}
