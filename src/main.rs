//! Websupport ACME DNS-01 Hook
//!
//! Invoked by an ACME client to publish or remove the `_acme-challenge`
//! TXT record for a domain hosted at Websupport.
//!
//! # Usage
//! ```bash
//! # Publish the challenge record
//! websupport-acme-hook present _acme-challenge.example.com. <token>
//!
//! # Remove it again
//! websupport-acme-hook cleanup _acme-challenge.example.com. <token>
//! ```

use std::ffi::OsString;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use websupport_acme_hook::config::{DEFAULT_API_ROOT, DEFAULT_TIMEOUT_SECS};
use websupport_acme_hook::{
    ChallengeController, ChallengeRequest, CleanupOutcome, Command, Config, Credential, Outcome,
    WebsupportClient,
};

// ============================================================
// CLI Definition
// ============================================================

#[derive(Parser, Debug)]
#[command(name = "websupport-acme-hook")]
#[command(about = "ACME DNS-01 hook for Websupport DNS", long_about = None)]
#[command(version)]
struct Cli {
    /// Hook command: present or cleanup
    command: String,

    /// Challenge FQDN with trailing dot (e.g. _acme-challenge.example.com.)
    fqdn: String,

    /// Validation token to publish as TXT content
    #[arg(allow_hyphen_values = true)]
    token: String,

    /// Further arguments from the ACME client are ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    extra: Vec<String>,

    /// Websupport REST API root
    #[arg(long, env = "WEBSUPPORT_API_ROOT", default_value = DEFAULT_API_ROOT)]
    api_root: String,

    /// Websupport API key
    #[arg(long, env = "WEBSUPPORT_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Websupport API secret
    #[arg(long, env = "WEBSUPPORT_API_SECRET", default_value = "", hide_env_values = true)]
    api_secret: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "WEBSUPPORT_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

// ============================================================
// Main Entry Point
// ============================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    // Logs go to stderr so stdout stays free for the ACME client
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let command: Command = cli.command.parse()?;

    let config = Config::new(
        &cli.api_root,
        Credential::new(cli.api_key, cli.api_secret),
        Duration::from_secs(cli.timeout),
    );
    debug!(api_root = %config.api_root, key = %config.credential.key(), "Configuration loaded");

    let client = WebsupportClient::new(&config).context("Failed to build HTTP client")?;
    let controller = ChallengeController::new(client);
    let request = ChallengeRequest::new(cli.fqdn, cli.token);

    info!(command = %command, fqdn = %request.fqdn, "Running hook");

    let outcome = controller
        .run(command, &request)
        .await
        .with_context(|| format!("{} failed for {}", command, request.fqdn))?;

    match outcome {
        Outcome::Presented => info!("Challenge record published"),
        Outcome::Cleanup(CleanupOutcome::Deleted { id }) => {
            info!(id, "Challenge record removed")
        }
        Outcome::Cleanup(CleanupOutcome::NotFound) => info!("Nothing to clean up"),
    }

    Ok(())
}

/// Options that consume the following argument as their value
const VALUE_OPTIONS: &[&str] = &["--api-root", "--api-key", "--api-secret", "--timeout"];

/// Drop every literal `--` argument, then re-insert one before the token
///
/// Tokens are base64url and may look like a flag (`-v`, `-h`). Everything
/// from the third positional on is passed to clap as a plain value.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter().filter(|arg| arg != "--");
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let mut positionals = 0;

    while let Some(arg) = args.next() {
        if positionals == 2 {
            normalized.push(OsString::from("--"));
            normalized.push(arg);
            normalized.extend(args.by_ref());
            break;
        }

        let (takes_value, is_flag) = match arg.to_str() {
            Some(a) => (VALUE_OPTIONS.contains(&a), a.len() > 1 && a.starts_with('-')),
            None => (false, false),
        };

        normalized.push(arg);
        if takes_value {
            normalized.extend(args.next());
        } else if !is_flag {
            positionals += 1;
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_positional_arguments() {
        let cli = parse(&["hook", "present", "_acme-challenge.example.com.", "abc123"]).unwrap();
        assert_eq!(cli.command, "present");
        assert_eq!(cli.fqdn, "_acme-challenge.example.com.");
        assert_eq!(cli.token, "abc123");
    }

    #[test]
    fn test_separators_are_ignored() {
        let cli = parse(&[
            "hook",
            "--",
            "cleanup",
            "--",
            "_acme-challenge.example.com.",
            "--",
            "abc123",
        ])
        .unwrap();
        assert_eq!(cli.command, "cleanup");
        assert_eq!(cli.fqdn, "_acme-challenge.example.com.");
        assert_eq!(cli.token, "abc123");
    }

    #[test]
    fn test_token_may_start_with_hyphen() {
        let cli = parse(&["hook", "present", "_acme-challenge.example.com.", "-x9_Yz"]).unwrap();
        assert_eq!(cli.token, "-x9_Yz");
    }

    #[test]
    fn test_missing_arguments_is_usage_error() {
        assert!(parse(&["hook", "present", "_acme-challenge.example.com."]).is_err());
        assert!(parse(&["hook", "--", "present"]).is_err());
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        let cli = parse(&[
            "hook",
            "present",
            "_acme-challenge.example.com.",
            "abc123",
            "extra",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.command, "present");
        assert_eq!(cli.token, "abc123");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_token_matching_a_flag_is_a_value() {
        for token in ["-v", "--verbose", "-h", "--help", "--timeout"] {
            let cli = parse(&["hook", "cleanup", "_acme-challenge.example.com.", token]).unwrap();
            assert_eq!(cli.token, token);
            assert!(!cli.verbose);
        }
    }

    #[test]
    fn test_options_before_positionals() {
        let cli = parse(&[
            "hook",
            "-v",
            "--api-root",
            "http://localhost:8080",
            "--timeout=5",
            "present",
            "_acme-challenge.example.com.",
            "-abc",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.api_root, "http://localhost:8080");
        assert_eq!(cli.timeout, 5);
        assert_eq!(cli.command, "present");
        assert_eq!(cli.token, "-abc");
    }
}
