//! HCL syntax checker.

use hcl_edit::parser::parse_body;

use crate::error::SyntaxError;
use crate::format::{as_text, squash};

/// Check that `content` parses as an HCL body.
///
/// # Errors
///
/// Returns `SyntaxError` if the content is not UTF-8 or fails to parse.
pub fn check_hcl(content: &[u8]) -> Result<(), SyntaxError> {
    let text = as_text("HCL", content)?;
    parse_body(text)
        .map(|_| ())
        .map_err(|e| SyntaxError::new("HCL", squash(&e.to_string())))
}
