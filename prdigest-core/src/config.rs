//! # Configuration Management
//!
//! Handles the optional `prdigest.toml` file: where it lives (XDG base
//! directories), how it is parsed, and the defaults used for anything it does
//! not set. Run inputs such as the token or webhook URL are not stored here;
//! they arrive through CLI flags and environment variables.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::consts::{
  CONFIG_FILE_NAME, DEFAULT_GITHUB_API_URL, DEFAULT_GITHUB_HOST, DEFAULT_MESSAGE_HEADER, DEFAULT_MIN_SPACING_MS,
  DEFAULT_PER_PAGE, DEFAULT_REFILL_INTERVAL_SECS, DEFAULT_RESERVOIR, MAX_PER_PAGE,
};
use crate::rate_limit::RateLimitConfig;

/// Represents the configuration directories for prdigest
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "prdigest").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }
}

/// GitHub connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
  /// REST API base URL
  pub api_url: String,
  /// Hosting domain repository references must point at
  pub host: String,
  /// Page size of the single list call
  pub per_page: u8,
}

impl Default for GitHubSettings {
  fn default() -> Self {
    Self {
      api_url: DEFAULT_GITHUB_API_URL.to_string(),
      host: DEFAULT_GITHUB_HOST.to_string(),
      per_page: DEFAULT_PER_PAGE,
    }
  }
}

/// Pacing applied to the per-PR detail lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
  pub reservoir: u32,
  pub refill_interval_secs: u64,
  pub min_spacing_ms: u64,
}

impl Default for RateLimitSettings {
  fn default() -> Self {
    Self {
      reservoir: DEFAULT_RESERVOIR,
      refill_interval_secs: DEFAULT_REFILL_INTERVAL_SECS,
      min_spacing_ms: DEFAULT_MIN_SPACING_MS,
    }
  }
}

impl RateLimitSettings {
  /// Convert to the limiter's runtime configuration
  pub fn to_config(&self) -> RateLimitConfig {
    RateLimitConfig {
      reservoir: self.reservoir,
      refill_interval: Duration::from_secs(self.refill_interval_secs),
      min_spacing: Duration::from_millis(self.min_spacing_ms),
    }
  }
}

/// Message presentation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessageSettings {
  pub header: Option<String>,
}

impl MessageSettings {
  /// The header text, falling back to the default when unset or blank
  pub fn header(&self) -> &str {
    resolve_header(self.header.as_deref())
  }
}

/// Resolve header text, treating blank input as absent
pub fn resolve_header(header: Option<&str>) -> &str {
  match header {
    Some(text) if !text.trim().is_empty() => text,
    _ => DEFAULT_MESSAGE_HEADER,
  }
}

/// Contents of `prdigest.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
  pub github: GitHubSettings,
  pub rate_limit: RateLimitSettings,
  pub message: MessageSettings,
}

impl DigestConfig {
  /// Load configuration from an explicit path, or from the default location.
  ///
  /// An explicit path must exist. A missing file at the default location
  /// yields the built-in defaults.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    match explicit_path {
      Some(path) => Self::load_from_path(path),
      None => {
        let path = ConfigDirs::new()?.config_path();
        if path.exists() {
          Self::load_from_path(&path)
        } else {
          debug!("No configuration file at {}, using defaults", path.display());
          Ok(Self::default())
        }
      }
    }
  }

  /// Load and validate configuration from a TOML file
  pub fn load_from_path(path: &Path) -> Result<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Self =
      toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid config in {}", path.display()))?;

    debug!("Loaded configuration from {}", path.display());
    Ok(config)
  }

  /// Check values that would otherwise only fail mid-run
  pub fn validate(&self) -> Result<()> {
    if self.github.per_page == 0 || self.github.per_page > MAX_PER_PAGE {
      bail!("github.per_page must be between 1 and {MAX_PER_PAGE}, got {}", self.github.per_page);
    }

    if self.github.host.trim().is_empty() {
      bail!("github.host must not be empty");
    }

    url::Url::parse(&self.github.api_url)
      .with_context(|| format!("github.api_url is not a valid URL: {}", self.github.api_url))?;

    self.rate_limit.to_config().validate()?;

    Ok(())
  }
}
