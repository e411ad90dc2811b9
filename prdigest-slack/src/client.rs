use reqwest::Client;
use tracing::debug;

use crate::error::WebhookError;
use crate::models::SlackMessage;

/// Represents a Slack incoming webhook
#[derive(Clone)]
pub struct SlackWebhookClient {
  pub(crate) client: Client,
  pub(crate) webhook_url: String,
}

impl SlackWebhookClient {
  /// Create a new client posting to `webhook_url`
  pub fn new(webhook_url: &str) -> Self {
    Self {
      client: Client::new(),
      webhook_url: webhook_url.to_string(),
    }
  }

  /// Post a message to the webhook.
  ///
  /// Makes exactly one attempt; any non-success status is returned with the
  /// response body Slack sent back.
  pub async fn post_message(&self, message: &SlackMessage) -> Result<(), WebhookError> {
    debug!("Posting message with {} blocks to Slack webhook", message.blocks.len());

    let response = self.client.post(&self.webhook_url).json(message).send().await?;

    let status = response.status();
    if status.is_success() {
      return Ok(());
    }

    let body = match response.text().await {
      Ok(body) => body,
      Err(err) => {
        debug!("Failed to read Slack webhook response body: {err}");
        String::new()
      }
    };
    Err(WebhookError::Status {
      status: status.as_u16(),
      body,
    })
  }
}
