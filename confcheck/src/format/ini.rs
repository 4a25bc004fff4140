//! INI syntax checker.

use ::ini::Ini;

use crate::error::SyntaxError;
use crate::format::{as_text, squash};

/// Check that `content` parses as INI sections and key/value pairs.
///
/// # Errors
///
/// Returns `SyntaxError` if the content is not UTF-8 or fails to parse.
pub fn check_ini(content: &[u8]) -> Result<(), SyntaxError> {
    let text = as_text("INI", content)?;
    Ini::load_from_str(text)
        .map(|_| ())
        .map_err(|e| SyntaxError::new("INI", squash(&e.to_string())))
}
