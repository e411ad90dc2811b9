//! # prdigest Core Library
//!
//! Shared building blocks for prdigest: repository reference parsing, the
//! rate limiter used for per-PR lookups, configuration loading, the pull
//! request summary model and user-facing output helpers.

pub mod config;
pub mod consts;
pub mod output;
pub mod rate_limit;
pub mod repo_ref;
pub mod summary;

// Re-export main types
pub use config::{ConfigDirs, DigestConfig, GitHubSettings, MessageSettings, RateLimitSettings};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use rate_limit::{RateLimitConfig, RateLimitError, RateLimiter, Scheduled};
pub use repo_ref::RepoReference;
pub use summary::PullRequestSummary;
