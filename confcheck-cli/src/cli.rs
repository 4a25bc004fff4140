use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use confcheck::output::{write_human, write_json};
use confcheck::{Configuration, validate_files};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::event::Event;
use crate::github::{DEFAULT_API_URL, GitHubClient};
use crate::logging;
use crate::metadata::RepositoryMetadata;

/// Report format written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Check configuration files changed in a pull request for syntax errors and
/// a trailing newline.
///
/// Every option can also be supplied through the environment, which is how a
/// CI workflow passes them.
#[derive(Debug, Parser)]
#[command(name = "confcheck", version, about)]
pub struct Cli {
    /// Access token for the GitHub API
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Require every checked file to end with a newline
    #[arg(
        long,
        env = "INPUT_NEWLINE",
        action = ArgAction::Set,
        default_value = "false",
        value_parser = BoolishValueParser::new()
    )]
    pub newline: bool,

    /// Glob selecting the changed files to check
    #[arg(long, env = "INPUT_INCLUDE")]
    pub include: Option<String>,

    /// Path to the pull-request event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: PathBuf,

    /// Repository in owner/name form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Give up after this many seconds of validation
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parse arguments, run the checks and print the report.
///
/// Returns whether every checked file is valid.
///
/// # Errors
///
/// Returns an error for configuration problems, unreadable events, API
/// failures while listing files, or a run that timed out.
pub async fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut stdout = std::io::stdout();
    execute(&cli, &mut stdout).await
}

/// Run the checks described by `cli`, writing the report to `out`.
///
/// # Errors
///
/// See [`run`].
pub async fn execute(cli: &Cli, out: &mut dyn Write) -> Result<bool> {
    let config = Configuration::new(cli.token.clone(), cli.newline, cli.include.clone())?;
    let event = Event::read(&cli.event_path)?;
    let repository: RepositoryMetadata = cli.repository.parse()?;
    info!(
        repository = %repository,
        pull_request = event.number,
        include = config.include().as_str(),
        newline = config.newline(),
        "Checking pull request"
    );

    let client = GitHubClient::new(
        &cli.api_url,
        config.token(),
        repository,
        event.pull_request.head.revision(),
    )?;
    let files = client
        .list_pull_request_files(event.number)
        .await
        .context("Failed to list pull request files")?;

    let cancel = CancellationToken::new();
    let watchdog = tokio::spawn(cancel_on_deadline_or_interrupt(
        cancel.clone(),
        Duration::from_secs(cli.timeout),
    ));
    let result = validate_files(&config, Arc::new(client), &files, &cancel).await;
    watchdog.abort();
    let set = result.context("Validation did not complete")?;

    match cli.format {
        OutputFormat::Human => write_human(&set, out)?,
        OutputFormat::Json => write_json(&set, out)?,
    }

    Ok(set.is_ok())
}

async fn cancel_on_deadline_or_interrupt(cancel: CancellationToken, timeout: Duration) {
    tokio::select! {
        () = tokio::time::sleep(timeout) => {
            warn!(timeout_secs = timeout.as_secs(), "Deadline reached, cancelling validation");
        }
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("Interrupted, cancelling validation");
        }
    }
    cancel.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["confcheck", "--event-path", "event.json", "--repository", "o/r"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--token", "t"]);
        assert!(!cli.newline);
        assert_eq!(cli.api_url, DEFAULT_API_URL);
        assert_eq!(cli.format, OutputFormat::Human);
        assert_eq!(cli.timeout, 120);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_boolish_newline() {
        assert!(parse(&["--newline", "true"]).newline);
        assert!(parse(&["--newline", "yes"]).newline);
        assert!(!parse(&["--newline", "false"]).newline);
    }

    #[test]
    fn test_format_and_verbosity() {
        let cli = parse(&["--format", "json", "-vv"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }
}
