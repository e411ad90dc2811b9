//! # Slack Webhook Client
//!
//! Builds the Block Kit payload for a pull request digest and delivers it to
//! a Slack incoming webhook in a single attempt.

pub mod client;
pub mod error;
pub mod message;
pub mod models;

// Re-export the client
pub use client::SlackWebhookClient;
// Re-export errors
pub use error::WebhookError;
// Re-export message building
pub use message::{build_digest_message, format_summary_line};
// Re-export models
pub use models::{Block, SlackMessage, TextObject};
