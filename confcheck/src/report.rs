//! Validation record and report types.

use serde::Serialize;

/// The check that rejected a file.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Check {
    /// The content could not be fetched from the host.
    Fetch,
    /// The content used an unknown or corrupt transfer encoding.
    Decode,
    /// The content is not a well-formed document in its format.
    Syntax,
    /// The content does not end with a newline while the policy requires one.
    Newline,
    /// The task checking the file died before producing a verdict.
    Internal,
}

/// Outcome for a single in-scope file. Created once, never revised.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Validation {
    /// Repository-relative path of the file.
    pub file: String,
    /// Whether every applicable check passed.
    pub valid: bool,
    /// Why the file is invalid; `None` when `valid` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Checks that failed, in the order they ran.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_checks: Vec<Check>,
}

impl Validation {
    #[must_use]
    pub fn passed(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            valid: true,
            reason: None,
            failed_checks: Vec::new(),
        }
    }

    #[must_use]
    pub fn failed(file: impl Into<String>, check: Check, reason: impl Into<String>) -> Self {
        Self::from_failures(file, vec![(check, reason.into())])
    }

    /// Build a record from every failure a file accumulated.
    ///
    /// No failures means the file passed. Several failures are joined into a
    /// single reason so each rejecting check stays visible.
    #[must_use]
    pub fn from_failures(file: impl Into<String>, failures: Vec<(Check, String)>) -> Self {
        if failures.is_empty() {
            return Self::passed(file);
        }

        let (failed_checks, reasons): (Vec<Check>, Vec<String>) = failures.into_iter().unzip();
        Self {
            file: file.into(),
            valid: false,
            reason: Some(reasons.join("; ")),
            failed_checks,
        }
    }

    /// `{file}: {reason}` for invalid files, `{file}: ok` otherwise.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        match &self.reason {
            Some(reason) => format!("{}: {reason}", self.file),
            None => format!("{}: ok", self.file),
        }
    }
}

/// Ordered validation results, one entry per in-scope file, in the order the
/// files were listed.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationSet(Vec<Validation>);

impl ValidationSet {
    #[must_use]
    pub fn new(validations: Vec<Validation>) -> Self {
        Self(validations)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Validation> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Validation] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Validation> {
        self.0
    }

    /// The invalid-only view, in report order.
    #[must_use]
    pub fn invalid(&self) -> Vec<&Validation> {
        self.0.iter().filter(|v| !v.valid).collect()
    }

    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.0.iter().filter(|v| !v.valid).count()
    }

    /// Logical AND of every `valid` flag. An empty set is ok.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.0.iter().all(|v| v.valid)
    }
}

impl<'a> IntoIterator for &'a ValidationSet {
    type Item = &'a Validation;
    type IntoIter = std::slice::Iter<'a, Validation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Validation> for ValidationSet {
    fn from_iter<I: IntoIterator<Item = Validation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
