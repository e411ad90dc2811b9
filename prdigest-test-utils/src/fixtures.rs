//! GitHub REST API response fixtures
//!
//! Builders for the JSON bodies returned by the pull request endpoints,
//! trimmed to the fields prdigest reads plus a few it ignores.

use serde_json::{Value, json};

/// A pull request entry in a list response
#[derive(Debug, Clone)]
pub struct PullRequestFixture {
  pub number: u64,
  pub title: String,
  pub author: Option<String>,
  pub draft: bool,
  pub created_at: String,
}

impl PullRequestFixture {
  /// An open, non-draft pull request opened by `octocat`
  pub fn open(number: u64, title: &str) -> Self {
    Self {
      number,
      title: title.to_string(),
      author: Some("octocat".to_string()),
      draft: false,
      created_at: "2024-05-01T10:00:00Z".to_string(),
    }
  }

  /// A draft pull request
  pub fn draft(number: u64, title: &str) -> Self {
    Self {
      draft: true,
      ..Self::open(number, title)
    }
  }

  pub fn author(mut self, author: Option<&str>) -> Self {
    self.author = author.map(str::to_string);
    self
  }

  pub fn created_at(mut self, created_at: &str) -> Self {
    self.created_at = created_at.to_string();
    self
  }

  /// Render as it appears in `GET /repos/{owner}/{repo}/pulls`
  pub fn to_json(&self, owner: &str, repo: &str) -> Value {
    let user = match &self.author {
      Some(login) => json!({ "login": login, "id": 1 }),
      None => Value::Null,
    };

    json!({
      "number": self.number,
      "title": self.title,
      "url": format!("https://api.github.com/repos/{owner}/{repo}/pulls/{}", self.number),
      "html_url": format!("https://github.com/{owner}/{repo}/pull/{}", self.number),
      "state": "open",
      "draft": self.draft,
      "user": user,
      "created_at": self.created_at,
      "updated_at": self.created_at,
    })
  }
}

/// Body of a list response for the given pull requests
pub fn pull_requests_json(owner: &str, repo: &str, prs: &[PullRequestFixture]) -> Value {
  Value::Array(prs.iter().map(|pr| pr.to_json(owner, repo)).collect())
}

/// Body of `GET /repos/{owner}/{repo}/pulls/{number}`
pub fn pull_request_detail_json(owner: &str, repo: &str, number: u64, comments: u64) -> Value {
  json!({
    "number": number,
    "title": format!("Pull request {number}"),
    "url": format!("https://api.github.com/repos/{owner}/{repo}/pulls/{number}"),
    "html_url": format!("https://github.com/{owner}/{repo}/pull/{number}"),
    "state": "open",
    "draft": false,
    "comments": comments,
    "review_comments": 0,
    "commits": 1,
  })
}
