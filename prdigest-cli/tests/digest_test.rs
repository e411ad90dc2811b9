use std::time::Duration;

use prdigest_cli::{DigestError, DigestSettings, assemble, run};
use prdigest_core::{GitHubSettings, RateLimitConfig};
use prdigest_gh::create_github_client;
use prdigest_test_utils::{PullRequestFixture, pull_request_detail_json, pull_requests_json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: &str = "acme";
const REPO: &str = "widgets";

fn settings(github: &MockServer, webhook: Option<&MockServer>, repo: &str) -> DigestSettings {
  DigestSettings {
    token: "test-token".to_string(),
    repo: repo.to_string(),
    header: "Open PRs:".to_string(),
    webhook_url: webhook.map(|server| format!("{}/services/T000/B000/XXXX", server.uri())),
    github: GitHubSettings {
      api_url: github.uri(),
      ..GitHubSettings::default()
    },
    rate_limit: RateLimitConfig {
      reservoir: 30,
      refill_interval: Duration::from_secs(60),
      min_spacing: Duration::ZERO,
    },
    dry_run: webhook.is_none(),
  }
}

async fn mount_list(server: &MockServer, prs: &[PullRequestFixture]) {
  Mock::given(method("GET"))
    .and(path(format!("/repos/{OWNER}/{REPO}/pulls")))
    .and(query_param("state", "open"))
    .respond_with(ResponseTemplate::new(200).set_body_json(pull_requests_json(OWNER, REPO, prs)))
    .expect(1)
    .mount(server)
    .await;
}

async fn mount_detail(server: &MockServer, number: u64, comments: u64) {
  Mock::given(method("GET"))
    .and(path(format!("/repos/{OWNER}/{REPO}/pulls/{number}")))
    .respond_with(ResponseTemplate::new(200).set_body_json(pull_request_detail_json(OWNER, REPO, number, comments)))
    .expect(1)
    .mount(server)
    .await;
}

async fn mount_webhook(server: &MockServer, status: u16, body: &str, times: u64) {
  Mock::given(method("POST"))
    .and(path("/services/T000/B000/XXXX"))
    .respond_with(ResponseTemplate::new(status).set_body_string(body))
    .expect(times)
    .mount(server)
    .await;
}

#[tokio::test]
async fn test_assemble_skips_drafts_and_keeps_order() {
  let github = MockServer::start().await;
  mount_list(
    &github,
    &[
      PullRequestFixture::open(1, "Add widget sizing"),
      PullRequestFixture::open(2, "Fix spinner").author(Some("hubot")),
      PullRequestFixture::draft(3, "WIP: new gears"),
    ],
  )
  .await;
  mount_detail(&github, 1, 4).await;
  mount_detail(&github, 2, 0).await;
  Mock::given(method("GET"))
    .and(path(format!("/repos/{OWNER}/{REPO}/pulls/3")))
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&github)
    .await;

  let settings = settings(&github, None, "https://github.com/acme/widgets");
  let client = create_github_client(&settings.token, &settings.github.api_url);
  let (repo, summaries) = assemble(&client, &settings).await.unwrap();

  assert_eq!(repo.full_name(), "acme/widgets");
  assert_eq!(summaries.len(), 2);

  assert_eq!(summaries[0].number, 1);
  assert_eq!(summaries[0].title, "Add widget sizing");
  assert_eq!(summaries[0].url, "https://github.com/acme/widgets/pull/1");
  assert_eq!(summaries[0].author.as_deref(), Some("octocat"));
  assert_eq!(summaries[0].comment_count, Some(4));

  assert_eq!(summaries[1].number, 2);
  assert_eq!(summaries[1].author.as_deref(), Some("hubot"));
  assert_eq!(summaries[1].comment_count, Some(0));
}

#[tokio::test]
async fn test_failed_detail_lookups_leave_counts_empty() {
  let github = MockServer::start().await;
  let slack = MockServer::start().await;
  mount_list(
    &github,
    &[
      PullRequestFixture::open(1, "First"),
      PullRequestFixture::open(2, "Second"),
    ],
  )
  .await;
  Mock::given(method("GET"))
    .and(path(format!("/repos/{OWNER}/{REPO}/pulls/1")))
    .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
    .expect(1)
    .mount(&github)
    .await;
  Mock::given(method("GET"))
    .and(path(format!("/repos/{OWNER}/{REPO}/pulls/2")))
    .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "Not Found" })))
    .expect(1)
    .mount(&github)
    .await;
  mount_webhook(&slack, 200, "ok", 1).await;

  let report = run(&settings(&github, Some(&slack), "acme/widgets")).await.unwrap();

  assert!(report.posted);
  assert_eq!(report.summaries.len(), 2);
  assert!(report.summaries.iter().all(|summary| summary.comment_count.is_none()));
}

#[tokio::test]
async fn test_list_failure_aborts_before_posting() {
  let github = MockServer::start().await;
  let slack = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path(format!("/repos/{OWNER}/{REPO}/pulls")))
    .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "Not Found" })))
    .expect(1)
    .mount(&github)
    .await;
  mount_webhook(&slack, 200, "ok", 0).await;

  let error = run(&settings(&github, Some(&slack), "acme/widgets")).await.unwrap_err();

  assert!(matches!(error, DigestError::ListFailed { status: Some(404), .. }));
  assert!(error.to_string().contains("404"));
}

#[tokio::test]
async fn test_bad_reference_makes_no_requests() {
  let github = MockServer::start().await;
  let slack = MockServer::start().await;

  for reference in ["", "widgets", "github.com/widgets", "https://gitlab.com/acme/widgets"] {
    let error = run(&settings(&github, Some(&slack), reference)).await.unwrap_err();
    assert!(
      matches!(error, DigestError::BadReference { .. }),
      "'{reference}' should be rejected"
    );
  }

  assert!(github.received_requests().await.unwrap().is_empty());
  assert!(slack.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_webhook_rejection_is_reported() {
  let github = MockServer::start().await;
  let slack = MockServer::start().await;
  mount_list(&github, &[PullRequestFixture::open(7, "Tidy docs")]).await;
  mount_detail(&github, 7, 2).await;
  mount_webhook(&slack, 500, "internal_error", 1).await;

  let error = run(&settings(&github, Some(&slack), "acme/widgets")).await.unwrap_err();

  match &error {
    DigestError::PostFailed { status, body, .. } => {
      assert_eq!(*status, Some(500));
      assert_eq!(body.as_deref(), Some("internal_error"));
    }
    other => panic!("unexpected error: {other:?}"),
  }
  assert!(error.to_string().contains("HTTP 500"));
}

#[tokio::test]
async fn test_posted_message_lists_entries() {
  let github = MockServer::start().await;
  let slack = MockServer::start().await;
  mount_list(&github, &[PullRequestFixture::open(5, "Bump gears")]).await;
  mount_detail(&github, 5, 1).await;
  mount_webhook(&slack, 200, "ok", 1).await;

  let report = run(&settings(&github, Some(&slack), "github.com/acme/widgets")).await.unwrap();
  assert!(report.posted);

  let requests = slack.received_requests().await.unwrap();
  let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
  assert_eq!(body["text"], "Open PRs:");
  assert_eq!(body["blocks"][0]["type"], "header");

  let section = body["blocks"][1]["text"]["text"].as_str().unwrap();
  assert!(section.contains("<https://github.com/acme/widgets/pull/5|Bump gears>"));
  assert!(section.contains("1 comment"));
  assert!(section.contains("octocat"));
}

#[tokio::test]
async fn test_dry_run_does_not_post() {
  let github = MockServer::start().await;
  mount_list(&github, &[]).await;

  let report = run(&settings(&github, None, "acme/widgets")).await.unwrap();

  assert!(!report.posted);
  assert!(report.summaries.is_empty());
  assert_eq!(report.message.text, "Open PRs:");
}

#[tokio::test]
async fn test_missing_webhook_outside_dry_run_is_rejected() {
  let github = MockServer::start().await;
  let mut settings = settings(&github, None, "acme/widgets");
  settings.dry_run = false;

  let error = run(&settings).await.unwrap_err();

  assert!(matches!(error, DigestError::Config(ref message) if message.contains("webhook")));
  assert!(github.received_requests().await.unwrap().is_empty());
}
