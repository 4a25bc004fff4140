//! Validation orchestrator.
//!
//! Filters the changed files through the include pattern, fans out one task
//! per in-scope file (fetch, decode, syntax check, newline check) and joins
//! the results back into input order.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span, info, warn};

use crate::config::Configuration;
use crate::error::ValidateError;
use crate::fetch::{ChangedFile, ContentSource};
use crate::format::FormatRegistry;
use crate::newline::{MISSING_NEWLINE, has_trailing_newline};
use crate::pattern::IncludePattern;
use crate::report::{Check, Validation, ValidationSet};

/// Validates changed files against a content source.
///
/// Holds only shared, read-only state; one validator may serve any number of
/// `validate_files` calls.
#[derive(Clone)]
pub struct Validator {
    source: Arc<dyn ContentSource>,
    registry: Arc<FormatRegistry>,
    include: IncludePattern,
    newline: bool,
}

impl Validator {
    /// Build a validator with the built-in format checkers.
    #[must_use]
    pub fn new(config: &Configuration, source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            registry: Arc::new(FormatRegistry::default()),
            include: config.include().clone(),
            newline: config.newline(),
        }
    }

    /// Replace the format registry.
    #[must_use]
    pub fn with_registry(mut self, registry: FormatRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Validate every changed file matching the include pattern.
    ///
    /// Files outside the pattern produce no entry. The returned set is in the
    /// order the files were given, whatever order the checks finish in. Fetch,
    /// decode, syntax and newline failures are recorded per file and never
    /// abort the batch.
    ///
    /// # Errors
    ///
    /// Returns `ValidateError::Cancelled` if `cancel` fires before every
    /// in-scope file has a final record. Outstanding fetches are aborted and
    /// no partial set is returned.
    pub async fn validate_files(
        &self,
        files: &[ChangedFile],
        cancel: &CancellationToken,
    ) -> Result<ValidationSet, ValidateError> {
        if cancel.is_cancelled() {
            return Err(ValidateError::Cancelled);
        }

        let in_scope: Vec<&str> = files
            .iter()
            .map(|f| f.filename.as_str())
            .filter(|path| self.include.matches(path))
            .collect();
        debug!(
            changed = files.len(),
            in_scope = in_scope.len(),
            include = self.include.as_str(),
            "Filtered changed files"
        );

        let mut tasks = JoinSet::new();
        let mut positions = HashMap::with_capacity(in_scope.len());
        for (index, path) in in_scope.iter().enumerate() {
            let source = Arc::clone(&self.source);
            let registry = Arc::clone(&self.registry);
            let newline = self.newline;
            let path = (*path).to_owned();
            let span = debug_span!("check_file", file = %path);
            let handle = tasks.spawn(
                async move { check_file(source.as_ref(), &registry, newline, path).await }
                    .instrument(span),
            );
            positions.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<Validation>> = vec![None; in_scope.len()];
        loop {
            let joined = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tasks.abort_all();
                    warn!(outstanding = tasks.len(), "Validation cancelled");
                    return Err(ValidateError::Cancelled);
                }
                joined = tasks.join_next_with_id() => joined,
            };
            let Some(joined) = joined else {
                break;
            };

            let (id, validation) = match joined {
                Ok((id, validation)) => (id, validation),
                Err(join_err) => {
                    let id = join_err.id();
                    let Some(&index) = positions.get(&id) else {
                        continue;
                    };
                    warn!(file = in_scope[index], error = %join_err, "Check task failed");
                    let validation = Validation::failed(
                        in_scope[index],
                        Check::Internal,
                        format!("validation task failed: {join_err}"),
                    );
                    (id, validation)
                }
            };
            if let Some(&index) = positions.get(&id) {
                slots[index] = Some(validation);
            }
        }

        let set: ValidationSet = slots.into_iter().flatten().collect();
        debug_assert_eq!(set.len(), in_scope.len());
        info!(
            checked = set.len(),
            invalid = set.invalid_count(),
            "Validation finished"
        );
        Ok(set)
    }
}

/// Fetch, decode and inspect one file.
async fn check_file(
    source: &dyn ContentSource,
    registry: &FormatRegistry,
    newline: bool,
    path: String,
) -> Validation {
    let fetched = match source.get_file_content(&path).await {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!(error = %e, "Failed to fetch file");
            return Validation::failed(path, Check::Fetch, e.to_string());
        }
    };

    let content = match fetched.decode() {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Failed to decode file");
            return Validation::failed(path, Check::Decode, e.to_string());
        }
    };

    let failures = inspect_content(registry, newline, &path, &content);
    let validation = Validation::from_failures(path, failures);
    debug!(valid = validation.valid, reason = ?validation.reason, "Checked file");
    validation
}

/// Run the syntax and newline checks on decoded content.
///
/// Empty content is not handed to a syntax checker: there is no document to
/// parse, so only the newline policy can reject it. Files whose extension has
/// no registered checker are likewise judged on the newline policy alone.
#[must_use]
pub fn inspect_content(
    registry: &FormatRegistry,
    newline: bool,
    path: &str,
    content: &[u8],
) -> Vec<(Check, String)> {
    let mut failures = Vec::new();

    if !content.is_empty()
        && let Some(check) = registry.checker_for_path(path)
        && let Err(e) = check(content)
    {
        failures.push((Check::Syntax, e.to_string()));
    }

    if newline && !has_trailing_newline(content) {
        failures.push((Check::Newline, MISSING_NEWLINE.to_owned()));
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checks(failures: &[(Check, String)]) -> Vec<Check> {
        failures.iter().map(|(check, _)| *check).collect()
    }

    #[test]
    fn test_valid_json_with_newline() {
        let registry = FormatRegistry::default();
        assert!(inspect_content(&registry, true, "a.json", b"{}\n").is_empty());
    }

    #[test]
    fn test_newline_policy_is_independent_of_format() {
        let registry = FormatRegistry::default();
        let failures = inspect_content(&registry, true, "a.json", b"{}");
        assert_eq!(checks(&failures), vec![Check::Newline]);
        assert!(inspect_content(&registry, false, "a.json", b"{}").is_empty());
    }

    #[test]
    fn test_syntax_and_newline_both_reported() {
        let registry = FormatRegistry::default();
        let failures = inspect_content(&registry, true, "a.json", b"{");
        assert_eq!(checks(&failures), vec![Check::Syntax, Check::Newline]);
        assert!(failures[0].1.starts_with("invalid JSON"));
        assert_eq!(failures[1].1, MISSING_NEWLINE);
    }

    #[test]
    fn test_empty_content_skips_syntax_check() {
        let registry = FormatRegistry::default();
        let failures = inspect_content(&registry, true, "empty.json", b"");
        assert_eq!(checks(&failures), vec![Check::Newline]);
        assert!(inspect_content(&registry, false, "empty.json", b"").is_empty());
    }

    #[test]
    fn test_unregistered_extension_only_checks_newline() {
        let registry = FormatRegistry::default();
        assert!(inspect_content(&registry, true, "notes.txt", b"{{{ not json\n").is_empty());
        let failures = inspect_content(&registry, true, "notes.txt", b"text");
        assert_eq!(checks(&failures), vec![Check::Newline]);
    }

    #[test]
    fn test_custom_registry_is_used() {
        let registry = FormatRegistry::empty();
        // without a JSON checker, broken JSON passes the syntax stage
        assert!(inspect_content(&registry, true, "a.json", b"{\n").is_empty());
    }
}
