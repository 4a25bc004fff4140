//! YAML syntax checker.
//!
//! Multi-document streams (`---` separated) are parsed as a whole; one
//! malformed document fails the file. Documents are walked without being
//! mapped onto any data model, so complex and null keys are accepted.

use serde::de::IgnoredAny;

use crate::error::SyntaxError;
use crate::format::{as_text, squash};

/// Check that `content` is a well-formed YAML stream.
///
/// # Errors
///
/// Returns `SyntaxError` if the content is not UTF-8 or fails to parse.
pub fn check_yaml(content: &[u8]) -> Result<(), SyntaxError> {
    let text = as_text("YAML", content)?;
    let parsed: Result<Vec<IgnoredAny>, _> = serde_saphyr::from_multiple(text);
    parsed
        .map(|_| ())
        .map_err(|e| SyntaxError::new("YAML", squash(&e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mapping() {
        assert!(check_yaml(b"key: value\n").is_ok());
        assert!(check_yaml(b"key: value").is_ok());
    }

    #[test]
    fn test_multi_document_stream() {
        let content = b"name: first\n---\nname: second\nitems:\n  - a\n  - b\n";
        assert!(check_yaml(content).is_ok());
    }

    #[test]
    fn test_non_string_keys() {
        assert!(check_yaml(b"? [a, b]\n: value\n").is_ok());
        assert!(check_yaml(b"~: x\n").is_ok());
    }

    #[test]
    fn test_unclosed_flow_sequence() {
        let err = check_yaml(b"key: [a, b\nother: c\n").unwrap_err();
        assert_eq!(err.format, "YAML");
        assert!(!err.message.contains('\n'));
    }

    #[test]
    fn test_unterminated_quoted_scalar() {
        assert!(check_yaml(b"name: 'unclosed\nother: 1\n").is_err());
    }
}
