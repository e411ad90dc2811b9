//! GitHub API error types.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Outcome of a failed GitHub API call
#[derive(Debug, Error)]
pub enum ApiError {
  /// GitHub answered with a non-success status
  #[error("HTTP {status}: {message}")]
  Status { status: u16, message: String },

  /// The request never produced a response
  #[error("Failed to reach GitHub: {0}")]
  Transport(#[from] reqwest::Error),

  /// The configured API base URL cannot carry a request path
  #[error("Invalid GitHub API base URL: {base_url}")]
  InvalidBaseUrl { base_url: String },

  /// The response body did not have the expected shape
  #[error("Failed to parse {what}: {source}")]
  Decode {
    what: &'static str,
    #[source]
    source: serde_json::Error,
  },
}

/// Error body GitHub returns alongside failure statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: String,
}

impl ApiError {
  /// Build a status error, preferring GitHub's own `message` over the raw body
  pub fn from_status(status: StatusCode, body: &str) -> Self {
    let message = match serde_json::from_str::<ErrorBody>(body) {
      Ok(error_body) => error_body.message,
      Err(_) if body.trim().is_empty() => status.canonical_reason().unwrap_or("Unknown error").to_string(),
      Err(_) => body.trim().to_string(),
    };

    Self::Status {
      status: status.as_u16(),
      message,
    }
  }

  /// The upstream HTTP status, when the failure carried one
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      Self::Transport(err) => err.status().map(|status| status.as_u16()),
      Self::InvalidBaseUrl { .. } | Self::Decode { .. } => None,
    }
  }
}
