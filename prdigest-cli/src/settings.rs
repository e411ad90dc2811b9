//! # Run Settings
//!
//! Merges CLI flags, environment fallbacks and the optional config file into
//! the validated settings a single digest run needs.

use prdigest_core::config::resolve_header;
use prdigest_core::{DigestConfig, GitHubSettings, RateLimitConfig};
use url::Url;

use crate::cli::Cli;
use crate::error::DigestError;

/// Fallback for the token when no explicit input is given
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// Fallback for the repository, set by GitHub Actions to `owner/name`
pub const ENV_GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";

/// Everything one run needs, already validated
#[derive(Debug, Clone)]
pub struct DigestSettings {
  pub token: String,
  /// Raw repository reference, parsed at the start of the run
  pub repo: String,
  pub header: String,
  /// Absent only for dry runs
  pub webhook_url: Option<String>,
  pub github: GitHubSettings,
  pub rate_limit: RateLimitConfig,
  pub dry_run: bool,
}

impl DigestSettings {
  /// Resolve settings using the process environment for fallbacks
  pub fn from_cli(cli: &Cli, config: DigestConfig) -> Result<Self, DigestError> {
    Self::resolve(cli, config, |name| std::env::var(name).ok())
  }

  /// Resolve settings with an explicit environment lookup
  pub fn resolve(cli: &Cli, config: DigestConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self, DigestError> {
    let token = non_blank(cli.github_token.clone())
      .or_else(|| non_blank(env(ENV_GITHUB_TOKEN)))
      .ok_or_else(|| {
        DigestError::Config("a GitHub token is required (--github-token, INPUT_GITHUB_TOKEN or GITHUB_TOKEN)".to_string())
      })?;

    // A missing reference is reported by the run itself as a bad reference.
    let repo = non_blank(cli.repo.clone())
      .or_else(|| non_blank(env(ENV_GITHUB_REPOSITORY)))
      .unwrap_or_default();

    let header = match cli.header.as_deref() {
      Some(text) if !text.trim().is_empty() => text.to_string(),
      _ => resolve_header(config.message.header.as_deref()).to_string(),
    };

    let webhook_url = match non_blank(cli.webhook_url.clone()) {
      Some(url) => Some(validate_webhook_url(&url)?),
      None if cli.dry_run => None,
      None => {
        return Err(DigestError::Config(
          "a Slack webhook URL is required (--webhook-url or INPUT_WEBHOOK_URL)".to_string(),
        ));
      }
    };

    let mut github = config.github;
    if let Some(api_url) = non_blank(cli.api_url.clone()) {
      github.api_url = api_url;
    }

    let validated = DigestConfig {
      github,
      rate_limit: config.rate_limit,
      message: config.message,
    };
    validated
      .validate()
      .map_err(|err| DigestError::Config(format!("{err:#}")))?;

    Ok(Self {
      token,
      repo,
      header,
      webhook_url,
      github: validated.github,
      rate_limit: validated.rate_limit.to_config(),
      dry_run: cli.dry_run,
    })
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|text| !text.trim().is_empty())
}

fn validate_webhook_url(raw: &str) -> Result<String, DigestError> {
  let url = Url::parse(raw).map_err(|err| DigestError::Config(format!("webhook URL is not a valid URL: {err}")))?;

  match url.scheme() {
    "http" | "https" => Ok(raw.to_string()),
    scheme => Err(DigestError::Config(format!(
      "webhook URL must use http or https, got '{scheme}'"
    ))),
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;
  use std::time::Duration;

  use clap::Parser;

  use super::*;

  fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["prdigest"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
  }

  fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
  }

  fn no_env() -> impl Fn(&str) -> Option<String> {
    env_from(&[])
  }

  #[test]
  fn test_resolve_from_flags() {
    let cli = cli(&[
      "--github-token",
      "t0k3n",
      "--repo",
      "github.com/acme/widgets",
      "--webhook-url",
      "https://hooks.slack.com/services/T000/B000/XXXX",
      "--header",
      "Needs review",
    ]);

    let settings = DigestSettings::resolve(&cli, DigestConfig::default(), no_env()).unwrap();

    assert_eq!(settings.token, "t0k3n");
    assert_eq!(settings.repo, "github.com/acme/widgets");
    assert_eq!(settings.header, "Needs review");
    assert_eq!(
      settings.webhook_url.as_deref(),
      Some("https://hooks.slack.com/services/T000/B000/XXXX")
    );
    assert_eq!(settings.github.api_url, "https://api.github.com");
    assert_eq!(settings.rate_limit.min_spacing, Duration::from_millis(250));
    assert!(!settings.dry_run);
  }

  #[test]
  fn test_environment_fallbacks() {
    let cli = cli(&["--webhook-url", "https://hooks.slack.com/services/T000"]);
    let env = env_from(&[("GITHUB_TOKEN", "from-env"), ("GITHUB_REPOSITORY", "acme/widgets")]);

    let settings = DigestSettings::resolve(&cli, DigestConfig::default(), env).unwrap();

    assert_eq!(settings.token, "from-env");
    assert_eq!(settings.repo, "acme/widgets");
    assert_eq!(settings.header, "Open PRs:");
  }

  #[test]
  fn test_header_from_config_and_blank_flag() {
    let cli = cli(&[
      "--github-token",
      "t",
      "--header",
      " ",
      "--webhook-url",
      "https://hooks.slack.com/services/T000",
    ]);
    let mut config = DigestConfig::default();
    config.message.header = Some("From config".to_string());

    let settings = DigestSettings::resolve(&cli, config, no_env()).unwrap();
    assert_eq!(settings.header, "From config");
  }

  #[test]
  fn test_missing_token_is_a_config_error() {
    let cli = cli(&["--webhook-url", "https://hooks.slack.com/services/T000"]);

    let error = DigestSettings::resolve(&cli, DigestConfig::default(), no_env()).unwrap_err();
    assert!(matches!(error, DigestError::Config(ref message) if message.contains("GitHub token")));
  }

  #[test]
  fn test_webhook_required_unless_dry_run() {
    let error = DigestSettings::resolve(&cli(&["--github-token", "t"]), DigestConfig::default(), no_env()).unwrap_err();
    assert!(matches!(error, DigestError::Config(ref message) if message.contains("webhook")));

    let settings =
      DigestSettings::resolve(&cli(&["--github-token", "t", "--dry-run"]), DigestConfig::default(), no_env()).unwrap();
    assert!(settings.dry_run);
    assert_eq!(settings.webhook_url, None);
  }

  #[test]
  fn test_invalid_webhook_urls() {
    for url in ["not a url", "ftp://hooks.example.com/x"] {
      let error = DigestSettings::resolve(
        &cli(&["--github-token", "t", "--webhook-url", url]),
        DigestConfig::default(),
        no_env(),
      )
      .unwrap_err();
      assert!(matches!(error, DigestError::Config(_)), "{url} should be rejected");
    }
  }

  #[test]
  fn test_api_url_flag_overrides_config_and_is_validated() {
    let settings = DigestSettings::resolve(
      &cli(&["--github-token", "t", "--dry-run", "--api-url", "https://ghe.example.com/api/v3"]),
      DigestConfig::default(),
      no_env(),
    )
    .unwrap();
    assert_eq!(settings.github.api_url, "https://ghe.example.com/api/v3");

    let error = DigestSettings::resolve(
      &cli(&["--github-token", "t", "--dry-run", "--api-url", "nope"]),
      DigestConfig::default(),
      no_env(),
    )
    .unwrap_err();
    assert!(matches!(error, DigestError::Config(_)));
  }

  #[test]
  fn test_missing_repo_resolves_to_empty_reference() {
    let settings =
      DigestSettings::resolve(&cli(&["--github-token", "t", "--dry-run"]), DigestConfig::default(), no_env()).unwrap();
    assert_eq!(settings.repo, "");
  }
}
