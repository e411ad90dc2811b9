//! # Command Line Interface
//!
//! Defines the CLI for prdigest. Every input can also be supplied through the
//! `INPUT_*` environment variables a CI action runner sets.

use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser};
use prdigest_core::ColorMode;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ", ", env!("TARGET"), ")");

/// Post a digest of a repository's open pull requests to Slack
#[derive(Parser, Debug)]
#[command(name = "prdigest")]
#[command(about = "Post a digest of a repository's open pull requests to a Slack webhook")]
#[command(
  long_about = "Fetches the open, non-draft pull requests of a GitHub repository, looks up\n\
        their comment counts at a rate the GitHub API tolerates, and posts a summary\n\
        message to a Slack incoming webhook."
)]
#[command(version = env!("CARGO_PKG_VERSION"), long_version = LONG_VERSION)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
)]
pub struct Cli {
  /// Token used to authenticate against the GitHub API
  #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
  pub github_token: Option<String>,

  /// Repository to summarize (owner/name, github.com/owner/name or a URL)
  #[arg(long, env = "INPUT_REPO")]
  pub repo: Option<String>,

  /// Header line of the posted message [default: "Open PRs:"]
  #[arg(long, env = "INPUT_HEADER")]
  pub header: Option<String>,

  /// Slack incoming webhook URL
  #[arg(long, env = "INPUT_WEBHOOK_URL", hide_env_values = true)]
  pub webhook_url: Option<String>,

  /// GitHub API base URL, for GitHub Enterprise Server
  #[arg(long, env = "INPUT_API_URL")]
  pub api_url: Option<String>,

  /// Path to a configuration file
  #[arg(long, short = 'c', value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Print the message instead of posting it
  #[arg(long, short = 'n')]
  pub dry_run: bool,

  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,
}

impl Cli {
  /// Tracing level selected by the number of `-v` flags
  pub fn log_level(&self) -> tracing::Level {
    match self.verbose {
      0 => tracing::Level::WARN,  // Default: warnings and errors
      1 => tracing::Level::INFO,  // -v: info, warnings, and errors
      2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
      _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
    }
  }
}
