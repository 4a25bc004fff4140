//! Pull-request event payload.
//!
//! Only the fields needed to locate the pull request and its head revision
//! are modelled; everything else in the payload is ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("[Event] Failed to read event file")]
    Read(#[source] std::io::Error),
    #[error("[Event] Failed to parse event file")]
    Parse(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Event {
    #[serde(default)]
    pub action: String,
    pub number: u64,
    pub pull_request: PullRequest,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    pub head: Branch,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Branch {
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default)]
    pub sha: Option<String>,
}

impl Branch {
    /// Revision to read file contents at: the head commit when known,
    /// otherwise the branch name.
    #[must_use]
    pub fn revision(&self) -> &str {
        self.sha
            .as_deref()
            .filter(|sha| !sha.is_empty())
            .unwrap_or(&self.git_ref)
    }
}

impl Event {
    /// Parse an event payload from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Parse` if the payload is not a pull-request event.
    pub fn from_json(payload: &str) -> Result<Self, EventError> {
        serde_json::from_str(payload).map_err(EventError::Parse)
    }

    /// Read and parse the event file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Read` if the file cannot be read and
    /// `EventError::Parse` if its content is not a pull-request event.
    pub fn read(path: &Path) -> Result<Self, EventError> {
        let payload = fs::read_to_string(path).map_err(EventError::Read)?;
        Self::from_json(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_event() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("event.json");
        fs::write(
            &path,
            r#"{ "action": "opened", "number": 1, "pull_request": { "head": { "ref": "sample-branch" } } }"#,
        )
        .unwrap();

        let event = Event::read(&path).unwrap();
        assert_eq!(
            event,
            Event {
                action: "opened".to_owned(),
                number: 1,
                pull_request: PullRequest {
                    head: Branch {
                        git_ref: "sample-branch".to_owned(),
                        sha: None,
                    },
                },
            }
        );
        assert_eq!(event.pull_request.head.revision(), "sample-branch");
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = Event::read(&tmp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, EventError::Read(_)));
        assert_eq!(err.to_string(), "[Event] Failed to read event file");
    }

    #[test]
    fn test_malformed_payload() {
        let err = Event::from_json(r#"{ foo: "bar" }"#).unwrap_err();
        assert!(matches!(err, EventError::Parse(_)));
        assert_eq!(err.to_string(), "[Event] Failed to parse event file");
    }

    #[test]
    fn test_non_pull_request_event() {
        let err = Event::from_json(r#"{ "ref": "refs/heads/main", "commits": [] }"#).unwrap_err();
        assert!(matches!(err, EventError::Parse(_)));
    }

    #[test]
    fn test_revision_prefers_head_sha() {
        let event = Event::from_json(
            r#"{ "number": 7, "pull_request": { "head": { "ref": "feature", "sha": "abc123" } } }"#,
        )
        .unwrap();
        assert_eq!(event.action, "");
        assert_eq!(event.pull_request.head.revision(), "abc123");
    }
}
