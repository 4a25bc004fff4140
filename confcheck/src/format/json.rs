//! JSON syntax checker.

use serde_json::Value;

use crate::error::SyntaxError;

/// Check that `content` is exactly one well-formed JSON value.
///
/// Any value is accepted at the top level (object, array or scalar), the way
/// a strict JSON validator does. Trailing garbage after the value fails.
///
/// # Errors
///
/// Returns `SyntaxError` carrying serde's message (with line and column).
pub fn check_json(content: &[u8]) -> Result<(), SyntaxError> {
    serde_json::from_slice::<Value>(content)
        .map(|_| ())
        .map_err(|e| SyntaxError::new("JSON", e.to_string()))
}
