//! Run-level failures.
//!
//! Only these errors end a run. A failed per-PR detail lookup is absorbed
//! where it happens and never shows up here.

use prdigest_gh::ApiError;
use prdigest_slack::WebhookError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
  /// The repository reference did not yield an owner and a name
  #[error("Could not extract repository owner and name from '{reference}'")]
  BadReference { reference: String },

  /// The open pull request listing failed
  #[error("{message}")]
  ListFailed { status: Option<u16>, message: String },

  /// Delivering the digest to the webhook failed
  #[error("{message}")]
  PostFailed {
    status: Option<u16>,
    body: Option<String>,
    message: String,
  },

  /// Inputs or configuration were unusable
  #[error("Invalid configuration: {0}")]
  Config(String),
}

impl DigestError {
  /// Wrap a failed list call, embedding the upstream status when there is one
  pub fn list_failed(error: ApiError) -> Self {
    let status = error.status();
    let message = match &error {
      ApiError::Status { status: code, message: reason } => format!("Failed to fetch PRs, HTTP {code}: {reason}"),
      other => format!("Failed to fetch PRs: {other}"),
    };

    Self::ListFailed { status, message }
  }

  /// Wrap a failed webhook delivery, keeping upstream status and body
  pub fn post_failed(error: WebhookError) -> Self {
    let status = error.status();
    let body = error.body().map(str::to_string);
    let message = match &error {
      WebhookError::Status { status: code, body: text } => format!("Failed to post message to Slack, HTTP {code}: {text}"),
      other => format!("Failed to post message to Slack: {other}"),
    };

    Self::PostFailed { status, body, message }
  }
}
