use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Represents GitHub authentication credentials
#[derive(Clone)]
pub struct GitHubAuth {
  pub token: String,
}

/// Represents a GitHub user
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
  pub login: String,
  #[serde(default)]
  pub id: u64,
}

/// Represents a pull request as returned by the list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubPullRequest {
  pub number: u64,
  pub title: String,
  /// API URL of the pull request
  pub url: String,
  /// Browser URL of the pull request
  pub html_url: Option<String>,
  #[serde(default)]
  pub state: Option<String>,
  pub draft: Option<bool>,
  /// Absent for pull requests whose author account was deleted
  pub user: Option<GitHubUser>,
  pub created_at: DateTime<Utc>,
}

impl GitHubPullRequest {
  /// Whether the pull request is flagged as not ready for review
  pub fn is_draft(&self) -> bool {
    self.draft.unwrap_or(false)
  }

  /// The URL to show people, preferring the browser URL
  pub fn display_url(&self) -> &str {
    self.html_url.as_deref().unwrap_or(&self.url)
  }

  /// Login of the author, if known
  pub fn author_login(&self) -> Option<&str> {
    self.user.as_ref().map(|user| user.login.as_str())
  }
}

/// Represents the detail view of a single pull request
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubPullRequestDetail {
  #[serde(default)]
  pub number: Option<u64>,
  /// Issue comments on the pull request
  pub comments: u64,
  /// Inline review comments
  #[serde(default)]
  pub review_comments: Option<u64>,
}
