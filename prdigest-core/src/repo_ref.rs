//! Repository reference parsing.
//!
//! A repository reference is a free-form string naming a hosted repository:
//! `owner/name`, `host/owner/name`, or either of those behind an
//! `http://`/`https://` scheme, optionally followed by a single trailing slash.
//! The owner and name are always the last two path segments.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::consts::DEFAULT_GITHUB_HOST;

static SCHEME_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("Failed to compile URL scheme regex"));

/// Owner and name of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReference {
  /// Repository owner (user or organization)
  pub owner: String,
  /// Repository name
  pub name: String,
}

impl RepoReference {
  /// Parse a reference that is expected to point at `github.com`.
  pub fn parse_github(reference: &str) -> Option<Self> {
    Self::parse(reference, DEFAULT_GITHUB_HOST)
  }

  /// Parse a repository reference against the expected hosting domain.
  ///
  /// Returns `None` when no owner/name pair can be extracted, or when the
  /// reference carries a scheme and points at a host other than `host`. A
  /// reference without a scheme is never rejected on host grounds. A leading
  /// `host/` is dropped before the owner and name are taken, so
  /// `github.com/widgets` has no owner.
  pub fn parse(reference: &str, host: &str) -> Option<Self> {
    let trimmed = reference.trim();

    let host_prefix = format!("{host}/");

    // The host is never part of the owner/name pair.
    let remainder = match SCHEME_REGEX.find(trimmed) {
      Some(scheme) => trimmed[scheme.end()..].strip_prefix(&host_prefix)?,
      None => trimmed.strip_prefix(&host_prefix).unwrap_or(trimmed),
    };

    let path = remainder.strip_suffix('/').unwrap_or(remainder);

    let mut segments = path.rsplit('/');
    let name = segments.next().filter(|s| !s.is_empty())?;
    let owner = segments.next().filter(|s| !s.is_empty())?;

    Some(Self {
      owner: owner.to_string(),
      name: name.to_string(),
    })
  }

  /// Returns the full repository path as `owner/name`.
  pub fn full_name(&self) -> String {
    format!("{}/{}", self.owner, self.name)
  }
}

impl fmt::Display for RepoReference {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const OWNER: &str = "tgallacher";
  const NAME: &str = "slack-pr-summary";

  fn assert_parses(reference: &str) {
    let parsed = RepoReference::parse_github(reference).unwrap_or_else(|| panic!("{reference} should parse"));
    assert_eq!(parsed.owner, OWNER, "owner mismatch for {reference}");
    assert_eq!(parsed.name, NAME, "name mismatch for {reference}");
  }

  #[test]
  fn test_parse_owner_and_name() {
    assert_parses(&format!("{OWNER}/{NAME}"));
    assert_parses(&format!("{OWNER}/{NAME}/"));
  }

  #[test]
  fn test_parse_with_host() {
    assert_parses(&format!("github.com/{OWNER}/{NAME}"));
    assert_parses(&format!("github.com/{OWNER}/{NAME}/"));
  }

  #[test]
  fn test_parse_with_http_scheme() {
    assert_parses(&format!("http://github.com/{OWNER}/{NAME}"));
    assert_parses(&format!("http://github.com/{OWNER}/{NAME}/"));
  }

  #[test]
  fn test_parse_with_https_scheme() {
    assert_parses(&format!("https://github.com/{OWNER}/{NAME}"));
    assert_parses(&format!("https://github.com/{OWNER}/{NAME}/"));
  }

  #[test]
  fn test_parse_rejects_foreign_host_with_scheme() {
    assert_eq!(RepoReference::parse_github("https://example.com/fakeowner/fakename"), None);
    assert_eq!(RepoReference::parse_github("http://example.com/fakeowner/fakename/"), None);
    assert_eq!(RepoReference::parse_github("ftp://example.com/a/b"), None);
  }

  #[test]
  fn test_parse_accepts_foreign_host_without_scheme() {
    let parsed = RepoReference::parse_github("example.com/a/b").unwrap();
    assert_eq!(parsed.owner, "a");
    assert_eq!(parsed.name, "b");
  }

  #[test]
  fn test_parse_custom_host() {
    let parsed = RepoReference::parse("https://git.example.com/platform/api", "git.example.com").unwrap();
    assert_eq!(parsed.full_name(), "platform/api");

    assert_eq!(RepoReference::parse("https://github.com/platform/api", "git.example.com"), None);
  }

  #[test]
  fn test_parse_empty_and_single_segment() {
    assert_eq!(RepoReference::parse_github(""), None);
    assert_eq!(RepoReference::parse_github("   "), None);
    assert_eq!(RepoReference::parse_github("widgets"), None);
    assert_eq!(RepoReference::parse_github("widgets/"), None);
    assert_eq!(RepoReference::parse_github("https://github.com/widgets"), None);
    assert_eq!(RepoReference::parse_github("http://github.com/widgets/"), None);
    assert_eq!(RepoReference::parse_github("github.com/widgets"), None);
    assert_eq!(RepoReference::parse_github("github.com/widgets/"), None);
    assert_eq!(RepoReference::parse_github("https://github.com/"), None);
  }

  #[test]
  fn test_parse_multiple_trailing_slashes_is_rejected() {
    assert_eq!(RepoReference::parse_github("acme/widgets//"), None);
  }

  #[test]
  fn test_parse_keeps_segments_verbatim() {
    let parsed = RepoReference::parse_github("github.com/Acme.Inc/widgets.rs").unwrap();
    assert_eq!(parsed.owner, "Acme.Inc");
    assert_eq!(parsed.name, "widgets.rs");
  }

  #[test]
  fn test_display() {
    let parsed = RepoReference::parse_github("acme/widgets").unwrap();
    assert_eq!(parsed.to_string(), "acme/widgets");
  }
}
