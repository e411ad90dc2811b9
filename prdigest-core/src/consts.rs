//! Core constants shared across prdigest components.

/// Hosting domain repository references are expected to point at.
pub const DEFAULT_GITHUB_HOST: &str = "github.com";

/// Base URL for the official SaaS GitHub API.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Header line used when no header text is configured.
pub const DEFAULT_MESSAGE_HEADER: &str = "Open PRs:";

/// Number of pull requests fetched by the single list call.
pub const DEFAULT_PER_PAGE: u8 = 30;

/// Largest page size the GitHub list endpoint accepts.
pub const MAX_PER_PAGE: u8 = 100;

/// Permits available in each rate limiter window.
pub const DEFAULT_RESERVOIR: u32 = 30;

/// Length of a rate limiter window, in seconds.
pub const DEFAULT_REFILL_INTERVAL_SECS: u64 = 60;

/// Minimum delay between the starts of two rate limited calls, in milliseconds.
pub const DEFAULT_MIN_SPACING_MS: u64 = 250;

/// File name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "prdigest.toml";

/// Output name under which the summary list is published.
pub const OUTPUT_PRS: &str = "prs";

/// Environment variable pointing at the GitHub Actions output file.
pub const ENV_GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Environment variable set to `true` inside GitHub Actions.
pub const ENV_GITHUB_ACTIONS: &str = "GITHUB_ACTIONS";
