//! End-of-file newline policy.

/// Reason recorded when the newline policy is violated.
pub const MISSING_NEWLINE: &str = "missing trailing newline at end of file";

/// Whether the last byte of `content` is `\n`.
///
/// Empty content has no trailing newline. `\r\n` endings pass because their
/// last byte is `\n`.
#[must_use]
pub fn has_trailing_newline(content: &[u8]) -> bool {
    content.last() == Some(&b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_newline() {
        assert!(has_trailing_newline(b"key: value\n"));
        assert!(has_trailing_newline(b"a = 1\r\n"));
        assert!(has_trailing_newline(b"\n"));
    }

    #[test]
    fn test_missing_newline() {
        assert!(!has_trailing_newline(b"key: value"));
        assert!(!has_trailing_newline(b"key: value\n "));
        assert!(!has_trailing_newline(b"a = 1\r"));
    }

    #[test]
    fn test_empty_content_fails() {
        assert!(!has_trailing_newline(b""));
    }
}
