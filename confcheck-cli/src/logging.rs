//! Tracing setup for the binary.
//!
//! Logs go to stderr so stdout carries only the report.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count: warn, info, debug, then trace.
#[must_use]
pub fn default_directive(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("confcheck={level},confcheck_cli={level}")
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose` when set.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_directive(0), "confcheck=warn,confcheck_cli=warn");
        assert_eq!(default_directive(1), "confcheck=info,confcheck_cli=info");
        assert_eq!(default_directive(2), "confcheck=debug,confcheck_cli=debug");
        assert_eq!(default_directive(9), "confcheck=trace,confcheck_cli=trace");
    }

    #[test]
    fn test_init_twice() {
        init(0);
        init(2);
    }
}
