//! # Digest Assembly
//!
//! Drives one run: parse the repository reference, list its open pull
//! requests, enrich each non-draft one with its comment count through a
//! [`RateLimiter`], then format the digest and post it.
//!
//! The limiter lives only for the duration of [`assemble`] and is closed once
//! every enrichment has settled.

use chrono::Utc;
use prdigest_core::{PullRequestSummary, RateLimiter, RepoReference};
use prdigest_gh::{GitHubClient, GitHubPullRequest, ListPullRequestsParams, create_github_client};
use prdigest_slack::{SlackMessage, SlackWebhookClient, build_digest_message};
use tracing::{debug, info, warn};

use crate::error::DigestError;
use crate::settings::DigestSettings;

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
  pub repo: RepoReference,
  pub summaries: Vec<PullRequestSummary>,
  pub message: SlackMessage,
  /// False for dry runs
  pub posted: bool,
}

/// Build the ordered digest entries for the configured repository.
///
/// Fails only when the reference cannot be parsed or the list call fails.
/// A failed detail lookup leaves that entry's comment count empty.
pub async fn assemble(
  client: &GitHubClient,
  settings: &DigestSettings,
) -> Result<(RepoReference, Vec<PullRequestSummary>), DigestError> {
  let repo = RepoReference::parse(&settings.repo, &settings.github.host).ok_or_else(|| DigestError::BadReference {
    reference: settings.repo.clone(),
  })?;
  debug!("Resolved repository reference '{}' to {repo}", settings.repo);

  let params = ListPullRequestsParams {
    per_page: settings.github.per_page,
    ..Default::default()
  };
  let pull_requests = client
    .list_pull_requests(&repo.owner, &repo.name, &params)
    .await
    .map_err(DigestError::list_failed)?;
  info!("Fetched {} open PRs for {repo}", pull_requests.len());

  let candidates: Vec<PullRequestSummary> = pull_requests
    .iter()
    .filter(|pr| !pr.is_draft())
    .map(to_summary)
    .collect();
  debug!(
    "{} PRs remain after skipping {} drafts",
    candidates.len(),
    pull_requests.len() - candidates.len()
  );

  let summaries = enrich(client, &repo, settings, candidates).await?;

  Ok((repo, summaries))
}

/// Run the whole digest: assemble, format, and post unless this is a dry run
pub async fn run(settings: &DigestSettings) -> Result<RunReport, DigestError> {
  if settings.webhook_url.is_none() && !settings.dry_run {
    return Err(DigestError::Config(
      "a Slack webhook URL is required unless this is a dry run".to_string(),
    ));
  }

  let client = create_github_client(&settings.token, &settings.github.api_url);
  let (repo, summaries) = assemble(&client, settings).await?;

  let message = build_digest_message(&settings.header, &summaries, Utc::now());

  let posted = match settings.webhook_url.as_deref().filter(|_| !settings.dry_run) {
    Some(webhook_url) => {
      SlackWebhookClient::new(webhook_url)
        .post_message(&message)
        .await
        .map_err(DigestError::post_failed)?;
      info!("Posted digest of {} PRs for {repo}", summaries.len());
      true
    }
    None => {
      debug!("Dry run, not posting the digest");
      false
    }
  };

  Ok(RunReport {
    repo,
    summaries,
    message,
    posted,
  })
}

fn to_summary(pr: &GitHubPullRequest) -> PullRequestSummary {
  PullRequestSummary {
    title: pr.title.clone(),
    url: pr.display_url().to_string(),
    author: pr.author_login().map(str::to_string),
    number: pr.number,
    comment_count: None,
    opened_at: pr.created_at,
  }
}

/// Fill in comment counts through a rate limiter scoped to this call.
///
/// Results are matched back to their entries by position, so the output order
/// is the input order.
async fn enrich(
  client: &GitHubClient,
  repo: &RepoReference,
  settings: &DigestSettings,
  mut summaries: Vec<PullRequestSummary>,
) -> Result<Vec<PullRequestSummary>, DigestError> {
  let limiter = RateLimiter::new(settings.rate_limit).map_err(|err| DigestError::Config(err.to_string()))?;

  let pending: Vec<_> = summaries
    .iter()
    .map(|summary| {
      let client = client.clone();
      let owner = repo.owner.clone();
      let name = repo.name.clone();
      let number = summary.number;
      limiter.schedule(move || async move { client.get_pull_request_detail(&owner, &name, number).await })
    })
    .collect();

  for (summary, handle) in summaries.iter_mut().zip(pending) {
    match handle.await {
      Ok(Ok(detail)) => summary.comment_count = Some(detail.comments),
      Ok(Err(err)) => warn!("Could not fetch details for {repo}#{}: {err}", summary.number),
      Err(err) => warn!("Detail lookup for {repo}#{} did not run: {err}", summary.number),
    }
  }

  let started = limiter.started();
  limiter.close().await;
  debug!("Enriched {} PRs with {started} detail lookups", summaries.len());

  Ok(summaries)
}
