//! # GitHub API Client
//!
//! Provides the GitHub REST API calls prdigest needs: listing a repository's
//! open pull requests and fetching a single pull request's details. Every
//! call returns a typed [`ApiError`] on failure so callers can tell an
//! upstream status apart from a transport or decoding problem.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod models;

// Re-export the client
pub use client::{GitHubClient, create_github_client};
// Re-export errors
pub use error::ApiError;
// Re-export models
pub use models::{GitHubAuth, GitHubPullRequest, GitHubPullRequestDetail, GitHubUser};
// Re-export endpoints structs
pub use endpoints::pulls::{ListPullRequestsParams, SortDirection};
