//! # prdigest Entry Point
//!
//! Parses inputs, sets up tracing, runs one digest and reports the outcome
//! through the exit code and the CI host's output channels.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use prdigest_cli::cli::Cli;
use prdigest_cli::{DigestSettings, RunReport, run};
use prdigest_core::consts::OUTPUT_PRS;
use prdigest_core::output::{format_repo_name, report_failure, write_output};
use prdigest_core::{DigestConfig, print_info, print_success, print_warning};
use tokio::runtime::Runtime;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
  let cli = Cli::parse();
  cli.colors.apply();

  // Initialize the tracing subscriber with the level selected by -v
  let level = cli.log_level();
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  match execute(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      report_failure(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}

fn execute(cli: &Cli) -> Result<()> {
  let config = DigestConfig::load(cli.config.as_deref())?;
  let settings = DigestSettings::from_cli(cli, config)?;

  let rt = Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(run(&settings))?;

  publish(&report)
}

fn publish(report: &RunReport) -> Result<()> {
  if report.posted {
    print_success(&format!(
      "Posted {} open PRs for {}",
      report.summaries.len(),
      format_repo_name(&report.repo.full_name())
    ));
  } else {
    let payload = serde_json::to_string_pretty(&report.message).context("Failed to serialize Slack message")?;
    println!("{payload}");
    print_info("Dry run, message not posted");
  }

  let missing = report.summaries.iter().filter(|s| s.comment_count.is_none()).count();
  if missing > 0 {
    print_warning(&format!("Comment counts unavailable for {missing} PRs"));
  }

  let prs = serde_json::to_string(&report.summaries).context("Failed to serialize PR summaries")?;
  write_output(OUTPUT_PRS, &prs)
}
