//! # GitHub HTTP Client
//!
//! HTTP client implementation for GitHub API interactions, handling
//! authentication, request building, and response parsing for GitHub REST API
//! operations.

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::consts::{ACCEPT, API_BASE_URL, API_VERSION, USER_AGENT};
use crate::error::ApiError;
use crate::models::GitHubAuth;

/// Represents a GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: GitHubAuth,
}

impl GitHubClient {
  /// Create a new GitHub client against the public API
  pub fn new(auth: GitHubAuth) -> Self {
    Self::with_base_url(auth, API_BASE_URL)
  }

  /// Create a new GitHub client against a specific API base URL
  pub fn with_base_url(auth: GitHubAuth, base_url: &str) -> Self {
    Self {
      client: Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
    }
  }

  /// The API base URL requests are sent to
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Start an authenticated GET request for the API path made of `segments`.
  ///
  /// Each segment is percent-encoded, so owner or repository names can never
  /// change the shape of the request URL.
  pub(crate) fn get(&self, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
    let mut url = Url::parse(&self.base_url)
      .ok()
      .filter(|url| !url.cannot_be_a_base())
      .ok_or_else(|| self.invalid_base_url())?;
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    trace!("GET {url}");

    Ok(
      self
        .client
        .get(url)
        .header("Accept", ACCEPT)
        .header("User-Agent", USER_AGENT)
        .header("X-GitHub-Api-Version", API_VERSION)
        .bearer_auth(&self.auth.token),
    )
  }

  fn invalid_base_url(&self) -> ApiError {
    ApiError::InvalidBaseUrl {
      base_url: self.base_url.clone(),
    }
  }
}

/// Decode a successful response body, or turn a failure status into an error
pub(crate) async fn parse_response<T: DeserializeOwned>(response: Response, what: &'static str) -> Result<T, ApiError> {
  let status = response.status();
  let body = response.text().await?;

  if !status.is_success() {
    return Err(ApiError::from_status(status, &body));
  }

  serde_json::from_str::<T>(&body).map_err(|source| ApiError::Decode { what, source })
}

/// Create a GitHub client from a token
pub fn create_github_client(token: &str, base_url: &str) -> GitHubClient {
  let auth = GitHubAuth {
    token: token.to_string(),
  };

  GitHubClient::with_base_url(auth, base_url)
}
