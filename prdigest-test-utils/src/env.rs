//! Environment variable management for testing
//!
//! Points the XDG config directory at a per-test temporary directory so
//! configuration lookups never touch the developer's real files.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// A test environment that overrides `XDG_CONFIG_HOME` to use a per-test
/// temporary directory
pub struct EnvTestGuard {
  /// The temporary directory backing the config directory
  pub temp_dir: TempDir,
  /// The original XDG_CONFIG_HOME value, if any
  original_config_home: Option<String>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";

  /// Create a new test environment with an overridden config directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let original_config_home = env::var(Self::XDG_CONFIG_HOME).ok();

    let config_home = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_home).expect("Failed to create config directory");
    unsafe {
      env::set_var(Self::XDG_CONFIG_HOME, &config_home);
    }

    Self {
      temp_dir,
      original_config_home,
    }
  }

  /// Get the path used as XDG_CONFIG_HOME
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    match &self.original_config_home {
      Some(val) => unsafe {
        env::set_var(EnvTestGuard::XDG_CONFIG_HOME, val);
      },
      None => unsafe {
        env::remove_var(EnvTestGuard::XDG_CONFIG_HOME);
      },
    }
  }
}
