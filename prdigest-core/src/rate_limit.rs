//! # Rate Limited Task Scheduling
//!
//! Serializes a batch of async calls against an upstream API with a published
//! rate limit. Scheduled tasks run one at a time in submission order, each
//! start separated from the previous one by a minimum spacing, and every start
//! consumes a permit from a reservoir that is topped back up to its full size
//! on a fixed period.
//!
//! A [`RateLimiter`] is meant to live for a single batch: build it, schedule
//! the work, await the returned [`Scheduled`] handles, then [`RateLimiter::close`]
//! it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace, warn};

use crate::consts::{DEFAULT_MIN_SPACING_MS, DEFAULT_REFILL_INTERVAL_SECS, DEFAULT_RESERVOIR};

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Errors reported by the limiter itself, never by the scheduled tasks
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateLimitError {
  /// The limiter no longer accepts work
  #[error("rate limiter is closed")]
  Closed,
  /// The task was dropped before producing a result (for example it panicked)
  #[error("scheduled task was abandoned before completing")]
  Abandoned,
  /// The limiter was built with unusable settings
  #[error("invalid rate limit configuration: {0}")]
  InvalidConfig(String),
}

/// Settings for a [`RateLimiter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
  /// Permits available per refill period
  pub reservoir: u32,
  /// Period after which the reservoir is restored to `reservoir` permits
  pub refill_interval: Duration,
  /// Minimum delay between the starts of two consecutive tasks
  pub min_spacing: Duration,
}

impl Default for RateLimitConfig {
  fn default() -> Self {
    Self {
      reservoir: DEFAULT_RESERVOIR,
      refill_interval: Duration::from_secs(DEFAULT_REFILL_INTERVAL_SECS),
      min_spacing: Duration::from_millis(DEFAULT_MIN_SPACING_MS),
    }
  }
}

impl RateLimitConfig {
  /// Check that the settings describe a limiter that can make progress
  pub fn validate(&self) -> Result<(), RateLimitError> {
    if self.reservoir == 0 {
      return Err(RateLimitError::InvalidConfig("reservoir must be at least 1".to_string()));
    }
    if self.refill_interval.is_zero() {
      return Err(RateLimitError::InvalidConfig(
        "refill interval must be greater than zero".to_string(),
      ));
    }
    Ok(())
  }
}

/// Serial, paced executor for async tasks
pub struct RateLimiter {
  sender: mpsc::UnboundedSender<Job>,
  worker: JoinHandle<()>,
  started: Arc<AtomicU64>,
}

impl RateLimiter {
  /// Create a limiter and spawn its worker on the current tokio runtime.
  ///
  /// The reservoir starts full and its refill clock starts now.
  pub fn new(config: RateLimitConfig) -> Result<Self, RateLimitError> {
    config.validate()?;

    let (sender, receiver) = mpsc::unbounded_channel();
    let started = Arc::new(AtomicU64::new(0));
    let worker = tokio::spawn(run_worker(config, receiver, Arc::clone(&started)));

    debug!(
      reservoir = config.reservoir,
      refill_interval_ms = config.refill_interval.as_millis() as u64,
      min_spacing_ms = config.min_spacing.as_millis() as u64,
      "Rate limiter started"
    );

    Ok(Self {
      sender,
      worker,
      started,
    })
  }

  /// Queue a task and return a handle resolving to the task's own output.
  ///
  /// The handle resolves to [`RateLimitError::Closed`] if the limiter has
  /// stopped accepting work and to [`RateLimitError::Abandoned`] if the task
  /// never produced an output.
  pub fn schedule<F, Fut, T>(&self, task: F) -> Scheduled<T>
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
  {
    let (result_tx, result_rx) = oneshot::channel();
    let job: Job = Box::pin(async move {
      let output = task().await;
      // The caller may have stopped waiting; nothing to do then.
      let _ = result_tx.send(output);
    });

    match self.sender.send(job) {
      Ok(()) => Scheduled {
        receiver: Some(result_rx),
      },
      Err(_) => Scheduled { receiver: None },
    }
  }

  /// Number of tasks started so far
  pub fn started(&self) -> u64 {
    self.started.load(Ordering::Relaxed)
  }

  /// Stop accepting work, let queued tasks finish, and tear the worker down
  pub async fn close(self) {
    let Self { sender, worker, started } = self;
    drop(sender);

    if let Err(err) = worker.await {
      warn!("Rate limiter worker terminated abnormally: {err}");
    }

    debug!(started = started.load(Ordering::Relaxed), "Rate limiter closed");
  }
}

/// Pending result of a task queued on a [`RateLimiter`]
#[must_use = "a scheduled task's result is only observable by awaiting it"]
pub struct Scheduled<T> {
  receiver: Option<oneshot::Receiver<T>>,
}

impl<T> Future for Scheduled<T> {
  type Output = Result<T, RateLimitError>;

  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let Some(receiver) = self.receiver.as_mut() else {
      return Poll::Ready(Err(RateLimitError::Closed));
    };

    match Pin::new(receiver).poll(cx) {
      Poll::Ready(Ok(output)) => Poll::Ready(Ok(output)),
      Poll::Ready(Err(_)) => Poll::Ready(Err(RateLimitError::Abandoned)),
      Poll::Pending => Poll::Pending,
    }
  }
}

/// Permit pool restored to full capacity on a fixed period
struct Reservoir {
  capacity: u32,
  available: u32,
  interval: Duration,
  next_refill: Instant,
}

impl Reservoir {
  fn new(capacity: u32, interval: Duration, now: Instant) -> Self {
    Self {
      capacity,
      available: capacity,
      interval,
      next_refill: now + interval,
    }
  }

  fn refill(&mut self, now: Instant) {
    if now < self.next_refill {
      return;
    }

    self.available = self.capacity;
    while self.next_refill <= now {
      self.next_refill += self.interval;
    }
    trace!(available = self.available, "Reservoir refilled");
  }

  async fn acquire(&mut self) {
    loop {
      self.refill(Instant::now());
      if self.available > 0 {
        self.available -= 1;
        return;
      }

      debug!("Reservoir exhausted, waiting for the next refill");
      sleep_until(self.next_refill).await;
    }
  }
}

async fn run_worker(config: RateLimitConfig, mut receiver: mpsc::UnboundedReceiver<Job>, started: Arc<AtomicU64>) {
  let mut reservoir = Reservoir::new(config.reservoir, config.refill_interval, Instant::now());
  let mut last_start: Option<Instant> = None;

  while let Some(job) = receiver.recv().await {
    if let Some(previous) = last_start {
      sleep_until(previous + config.min_spacing).await;
    }
    reservoir.acquire().await;

    last_start = Some(Instant::now());
    let index = started.fetch_add(1, Ordering::Relaxed);
    trace!(task = index, "Starting rate limited task");

    // Each task runs on its own tokio task so a panic stays contained.
    if let Err(err) = tokio::spawn(job).await {
      warn!(task = index, "Rate limited task failed to complete: {err}");
    }
  }
}
