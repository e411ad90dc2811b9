//! # GitHub Pull Request Endpoints
//!
//! GitHub API endpoint implementations for pull request operations: the
//! single-page open PR listing and the per-PR detail lookup.

use tracing::debug;

use crate::client::{GitHubClient, parse_response};
use crate::error::ApiError;
use crate::models::{GitHubPullRequest, GitHubPullRequestDetail};

/// Sort direction for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
  Asc,
  Desc,
}

impl SortDirection {
  pub fn as_str(&self) -> &'static str {
    match self {
      SortDirection::Asc => "asc",
      SortDirection::Desc => "desc",
    }
  }
}

/// Query parameters for listing pull requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPullRequestsParams {
  /// `open`, `closed` or `all`
  pub state: String,
  /// `created`, `updated`, `popularity` or `long-running`
  pub sort: String,
  pub direction: SortDirection,
  pub per_page: u8,
}

impl Default for ListPullRequestsParams {
  /// Open pull requests, newest first
  fn default() -> Self {
    Self {
      state: "open".to_string(),
      sort: "created".to_string(),
      direction: SortDirection::Desc,
      per_page: 30,
    }
  }
}

impl GitHubClient {
  /// List a single page of pull requests for a repository
  pub async fn list_pull_requests(
    &self,
    owner: &str,
    repo: &str,
    params: &ListPullRequestsParams,
  ) -> Result<Vec<GitHubPullRequest>, ApiError> {
    debug!(
      "Fetching {} pull requests for {owner}/{repo} (sort={}, direction={}, per_page={})",
      params.state,
      params.sort,
      params.direction.as_str(),
      params.per_page
    );

    let per_page = params.per_page.to_string();
    let response = self
      .get(&["repos", owner, repo, "pulls"])?
      .query(&[
        ("state", params.state.as_str()),
        ("sort", params.sort.as_str()),
        ("direction", params.direction.as_str()),
        ("per_page", per_page.as_str()),
      ])
      .send()
      .await?;

    parse_response(response, "pull requests").await
  }

  /// Get the detail view of a specific pull request
  pub async fn get_pull_request_detail(
    &self,
    owner: &str,
    repo: &str,
    pr_number: u64,
  ) -> Result<GitHubPullRequestDetail, ApiError> {
    debug!("Fetching details for {owner}/{repo}#{pr_number}");

    let number = pr_number.to_string();
    let response = self.get(&["repos", owner, repo, "pulls", &number])?.send().await?;

    parse_response(response, "pull request").await
  }
}

#[cfg(test)]
#[path = "tests/pulls_test.rs"]
mod pulls_test;
