//! Test utilities shared across the prdigest workspace
//!
//! This crate provides common testing infrastructure including:
//! - XDG config directory isolation ([`EnvTestGuard`])
//! - GitHub API response fixtures ([`fixtures`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

// Re-export commonly used items
pub use env::EnvTestGuard;
pub use fixtures::{PullRequestFixture, pull_request_detail_json, pull_requests_json};
