//! TOML syntax checker.

use crate::error::SyntaxError;
use crate::format::{as_text, squash};

/// Check that `content` parses as a TOML document.
///
/// # Errors
///
/// Returns `SyntaxError` if the content is not UTF-8 or fails to parse.
pub fn check_toml(content: &[u8]) -> Result<(), SyntaxError> {
    let text = as_text("TOML", content)?;
    ::toml::from_str::<::toml::Table>(text)
        .map(|_| ())
        .map_err(|e| SyntaxError::new("TOML", squash(e.message())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_document() {
        let content = b"key = \"value\"\n\n[server]\nport = 8080\nhosts = [\"a\", \"b\"]\n";
        assert!(check_toml(content).is_ok());
    }

    #[test]
    fn test_unterminated_string() {
        let err = check_toml(b"key = \"value\n").unwrap_err();
        assert_eq!(err.format, "TOML");
    }

    #[test]
    fn test_duplicate_key() {
        assert!(check_toml(b"a = 1\na = 2\n").is_err());
    }
}
