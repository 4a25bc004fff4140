//! Shared output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for `ValidationSet`.
//! Color/terminal formatting is left to the CLI layer.

use std::io::Write;

use serde::Serialize;

use crate::report::{Validation, ValidationSet};

#[derive(Serialize)]
struct JsonReport<'a> {
    ok: bool,
    checked: usize,
    invalid: usize,
    validations: &'a [Validation],
}

/// Format a `ValidationSet` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(set: &ValidationSet, writer: &mut dyn Write) -> anyhow::Result<()> {
    let report = JsonReport {
        ok: set.is_ok(),
        checked: set.len(),
        invalid: set.invalid_count(),
        validations: set.as_slice(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ValidationSet` as human-readable plain text to a writer.
///
/// Only invalid files are listed individually.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(set: &ValidationSet, writer: &mut dyn Write) -> anyhow::Result<()> {
    let invalid = set.invalid();

    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  CONFIGURATION FILE VALIDATOR")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Files checked:  {}", set.len())?;
    writeln!(writer, "  Files invalid:  {}", invalid.len())?;
    writeln!(writer)?;

    if !invalid.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  INVALID FILES")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for validation in &invalid {
            writeln!(writer, "{}", validation.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if set.is_ok() {
        writeln!(writer, "\u{2713} All {} files passed validation", set.len())?;
    } else {
        writeln!(
            writer,
            "\u{2717} {} of {} file(s) failed validation",
            invalid.len(),
            set.len()
        )?;
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}
