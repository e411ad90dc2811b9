//! # Output Formatting
//!
//! Provides formatted output functions with colors and emojis for
//! user-facing messages, plus the helpers used to report results back to the
//! CI host (GitHub Actions outputs and workflow commands).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use {clap, emojis};

use crate::consts::{ENV_GITHUB_ACTIONS, ENV_GITHUB_OUTPUT};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply the color mode to all subsequent output
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      // Leave detection to owo-colors
      ColorMode::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  eprintln!("{} {}", check.green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  eprintln!("{} {}", warning.yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  eprintln!("{} {}", info.blue().bold(), message);
}

/// Format a repository name
pub fn format_repo_name(name: &str) -> String {
  name.bright_cyan().bold().to_string()
}

/// Whether the process runs inside a GitHub Actions job
pub fn in_github_actions() -> bool {
  std::env::var(ENV_GITHUB_ACTIONS).is_ok_and(|value| value == "true")
}

/// Publish a named output value for downstream steps.
///
/// Appends `name=value` to the file named by `GITHUB_OUTPUT` when set,
/// otherwise prints the value on stdout.
pub fn write_output(name: &str, value: &str) -> Result<()> {
  match std::env::var_os(ENV_GITHUB_OUTPUT) {
    Some(path) => append_output(Path::new(&path), name, value),
    None => {
      println!("{value}");
      Ok(())
    }
  }
}

/// Append an output entry to a GitHub Actions output file.
///
/// Multi-line values use the heredoc form with a delimiter that does not
/// occur in the value.
pub fn append_output(path: &Path, name: &str, value: &str) -> Result<()> {
  let mut file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("Failed to open output file {}", path.display()))?;

  let entry = if value.contains('\n') {
    let mut delimiter = "PRDIGEST_EOF".to_string();
    while value.contains(&delimiter) {
      delimiter.push('_');
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
  } else {
    format!("{name}={value}\n")
  };

  file
    .write_all(entry.as_bytes())
    .with_context(|| format!("Failed to write output to {}", path.display()))
}

/// Report a terminal failure to the user and, under GitHub Actions, to the
/// workflow log as an error annotation
pub fn report_failure(message: &str) {
  print_error(message);
  if in_github_actions() {
    println!("::error::{}", escape_workflow_data(message));
  }
}

/// Escape a message for use as workflow command data
fn escape_workflow_data(message: &str) -> String {
  message.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}
