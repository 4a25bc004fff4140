//! Pull-request wrapper around the `confcheck` validation engine.
//!
//! Reads the triggering event, lists the changed files through the GitHub
//! REST API and prints the validation report.

pub mod cli;
pub mod event;
pub mod github;
pub mod logging;
pub mod metadata;
