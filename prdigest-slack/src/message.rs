//! # Digest Message Formatting
//!
//! Renders pull request summaries as a Slack message with a header block and
//! a body block, one line per pull request:
//!
//! ```text
//! - <https://github.com/acme/widgets/pull/2|Add caching>  (3 hours ago, 2 comments, octocat)
//! ```

use chrono::{DateTime, Utc};
use prdigest_core::PullRequestSummary;

use crate::models::{Block, SlackMessage, TextObject};

/// Body text used when there is nothing to list
pub const EMPTY_DIGEST_TEXT: &str = "No open pull requests.";

/// Escape the characters Slack treats as mrkdwn control characters
pub fn escape_mrkdwn(text: &str) -> String {
  text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Render one digest line for a pull request
pub fn format_summary_line(summary: &PullRequestSummary, now: DateTime<Utc>) -> String {
  let link = format!("<{}|{}>", summary.url, escape_mrkdwn(&summary.title));
  let metadata = summary.metadata(now);

  if metadata.is_empty() {
    format!("- {link}")
  } else {
    format!("- {link}  ({})", escape_mrkdwn(&metadata.join(", ")))
  }
}

/// Build the full digest message
pub fn build_digest_message(header: &str, summaries: &[PullRequestSummary], now: DateTime<Utc>) -> SlackMessage {
  let body = if summaries.is_empty() {
    EMPTY_DIGEST_TEXT.to_string()
  } else {
    summaries
      .iter()
      .map(|summary| format_summary_line(summary, now))
      .collect::<Vec<_>>()
      .join("\n")
  };

  SlackMessage {
    text: header.to_string(),
    blocks: vec![
      Block::Header {
        text: TextObject::plain(header),
      },
      Block::Section {
        text: TextObject::mrkdwn(body),
      },
    ],
  }
}
