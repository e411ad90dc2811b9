//! # Pull Request Summaries
//!
//! The per-PR record produced by a digest run, plus the small text helpers
//! used when rendering its metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One open, non-draft pull request as it appears in the digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestSummary {
  pub title: String,
  pub url: String,
  pub author: Option<String>,
  pub number: u64,
  /// Filled in by enrichment; stays `None` when the detail lookup failed
  pub comment_count: Option<u64>,
  pub opened_at: DateTime<Utc>,
}

impl PullRequestSummary {
  /// Trailing metadata for the digest line, in display order
  ///
  /// Relative age first, then the comment count and the author when known.
  pub fn metadata(&self, now: DateTime<Utc>) -> Vec<String> {
    let mut parts = vec![format_relative_time(&self.opened_at, now)];
    if let Some(count) = self.comment_count {
      parts.push(format_comment_count(count));
    }
    if let Some(author) = &self.author {
      parts.push(author.clone());
    }
    parts
  }
}

/// Format the age of `date` relative to `now`
pub fn format_relative_time(date: &DateTime<Utc>, now: DateTime<Utc>) -> String {
  let duration = now.signed_duration_since(*date);

  if duration.num_days() > 0 {
    plural(duration.num_days(), "day") + " ago"
  } else if duration.num_hours() > 0 {
    plural(duration.num_hours(), "hour") + " ago"
  } else if duration.num_minutes() > 0 {
    plural(duration.num_minutes(), "minute") + " ago"
  } else {
    "just now".to_string()
  }
}

/// Format a comment count, e.g. `1 comment` or `4 comments`
pub fn format_comment_count(count: u64) -> String {
  if count == 1 {
    "1 comment".to_string()
  } else {
    format!("{count} comments")
  }
}

fn plural(count: i64, unit: &str) -> String {
  if count == 1 {
    format!("1 {unit}")
  } else {
    format!("{count} {unit}s")
  }
}
