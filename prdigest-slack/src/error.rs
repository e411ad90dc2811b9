//! Slack webhook error types.

use thiserror::Error;

/// Outcome of a failed webhook delivery
#[derive(Debug, Error)]
pub enum WebhookError {
  /// Slack answered with a non-success status
  #[error("Slack webhook returned HTTP {status}: {body}")]
  Status { status: u16, body: String },

  /// The request never produced a response
  #[error("Failed to reach Slack webhook: {0}")]
  Transport(#[from] reqwest::Error),
}

impl WebhookError {
  /// The upstream HTTP status, when the webhook answered
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      Self::Transport(err) => err.status().map(|status| status.as_u16()),
    }
  }

  /// The upstream response body, when the webhook answered
  pub fn body(&self) -> Option<&str> {
    match self {
      Self::Status { body, .. } => Some(body),
      Self::Transport(_) => None,
    }
  }
}
