//! Batch scheduler and worker pool.
//!
//! Each batch fetches the source list, then `pool_width` workers share one
//! atomic cursor into it: a worker claims the next index, validates that URL,
//! and repeats until the cursor passes the end. The outer loop waits for every
//! worker, pauses, and starts over with a freshly fetched list, so a URL is
//! re-checked (and its verdict overwritten) once per batch it appears in.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use log::{debug, info, warn};

use crate::config::{Config, PROGRESS_LOGGING_INTERVAL};
use crate::fetch::Fetcher;
use crate::store::{FailureDetail, Outcome, ResultStore};
use crate::validate::validate_url;

/// Prefix of the failure reason recorded when a check panics.
pub const CHECK_ABORTED_REASON: &str = "Validation aborted";

/// Timing and width knobs for the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerSettings {
    pub source_url: String,
    pub proxy_base: String,
    pub pool_width: usize,
    pub batch_pause: Duration,
    pub empty_list_retry: Duration,
}

impl From<&Config> for SchedulerSettings {
    fn from(config: &Config) -> Self {
        Self {
            source_url: config.source_url.clone(),
            proxy_base: config.proxy_base.clone(),
            pool_width: config.pool_width,
            batch_pause: config.batch_pause(),
            empty_list_retry: config.empty_list_retry(),
        }
    }
}

/// How one batch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The source list could not be fetched; carries the fetch error.
    SourceUnavailable(String),
    /// The source list was fetched but held no URLs.
    EmptySource,
    /// Every URL in the list was claimed and validated.
    Completed { urls: usize },
}

/// Splits a newline-separated list, trimming whitespace and dropping blank lines.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// State shared by every worker of one batch.
struct BatchContext<F> {
    fetcher: Arc<F>,
    store: ResultStore,
    proxy_base: String,
    urls: Vec<String>,
    cursor: AtomicUsize,
    completed: AtomicUsize,
}

impl<F: Fetcher> BatchContext<F> {
    /// Claims the next unclaimed URL, `None` once the list is exhausted.
    fn claim(&self) -> Option<&str> {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.urls.get(index).map(String::as_str)
    }
}

async fn run_worker<F: Fetcher>(worker_id: usize, ctx: Arc<BatchContext<F>>) {
    let mut checked = 0usize;
    while let Some(url) = ctx.claim() {
        let check = validate_url(&ctx.store, ctx.fetcher.as_ref(), &ctx.proxy_base, url);
        if let Err(panic) = AssertUnwindSafe(check).catch_unwind().await {
            let reason = format!("{CHECK_ABORTED_REASON}: {}", panic_message(panic.as_ref()));
            warn!("Worker {worker_id} panicked while checking {url}: {reason}");
            // A check that died still ends with a verdict
            let detail = FailureDetail {
                direct_error: Some(reason),
                ..Default::default()
            };
            ctx.store.record_outcome(url, Outcome::Failed(detail)).await;
        }
        ctx.completed.fetch_add(1, Ordering::SeqCst);
        checked += 1;
    }
    debug!("Worker {worker_id} finished after {checked} URLs");
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// Drives batches forever against a fetcher and a store.
pub struct Scheduler<F> {
    fetcher: Arc<F>,
    store: ResultStore,
    settings: SchedulerSettings,
}

impl<F: Fetcher> Scheduler<F> {
    pub fn new(fetcher: Arc<F>, store: ResultStore, settings: SchedulerSettings) -> Self {
        Self {
            fetcher,
            store,
            settings,
        }
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Fetches the source list and parses it.
    async fn load_source(&self) -> Result<Vec<String>, String> {
        let outcome = self.fetcher.fetch(&self.settings.source_url).await;
        if !outcome.ok {
            return Err(outcome
                .error
                .unwrap_or_else(|| "Request failed".to_string()));
        }
        Ok(parse_url_list(outcome.text.as_deref().unwrap_or_default()))
    }

    /// Runs one batch to completion.
    ///
    /// An unreachable or empty source list returns immediately without
    /// touching the store. A check that panics is recorded as a failure and
    /// its worker carries on; a worker task that dies is logged and does not
    /// abort the other workers.
    pub async fn run_batch(&self) -> BatchOutcome {
        let urls = match self.load_source().await {
            Ok(urls) => urls,
            Err(e) => {
                warn!(
                    "Failed to fetch source list {}: {e}",
                    self.settings.source_url
                );
                return BatchOutcome::SourceUnavailable(e);
            }
        };
        if urls.is_empty() {
            warn!("Source list {} is empty", self.settings.source_url);
            return BatchOutcome::EmptySource;
        }

        let total = urls.len();
        let width = self.settings.pool_width.max(1).min(total);
        info!("Starting batch of {total} URLs with {width} workers");
        let start = Instant::now();

        let ctx = Arc::new(BatchContext {
            fetcher: Arc::clone(&self.fetcher),
            store: self.store.clone(),
            proxy_base: self.settings.proxy_base.clone(),
            urls,
            cursor: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        });

        let mut workers = FuturesUnordered::new();
        for worker_id in 0..width {
            workers.push(tokio::spawn(run_worker(worker_id, Arc::clone(&ctx))));
        }

        let mut progress = tokio::time::interval(PROGRESS_LOGGING_INTERVAL);
        progress.tick().await;
        loop {
            tokio::select! {
                joined = workers.next() => match joined {
                    Some(Ok(())) => {}
                    Some(Err(e)) => warn!("Validation worker failed: {e}"),
                    None => break,
                },
                _ = progress.tick() => {
                    let done = ctx.completed.load(Ordering::SeqCst);
                    info!(
                        "Batch progress: {done}/{total} URLs in {:.1}s",
                        start.elapsed().as_secs_f64()
                    );
                }
            }
        }

        let snapshot = self.store.snapshot().await;
        info!(
            "Batch finished: {total} URLs in {:.1}s (success rate {:.2}%, {} succeeded, {} failed so far)",
            start.elapsed().as_secs_f64(),
            snapshot.stats.success_rate,
            snapshot.stats.success_count,
            snapshot.stats.failed_count
        );
        BatchOutcome::Completed { urls: total }
    }

    /// Delay to wait after a batch ended with `outcome`.
    pub fn cooldown(&self, outcome: &BatchOutcome) -> Duration {
        match outcome {
            BatchOutcome::Completed { .. } => self.settings.batch_pause,
            BatchOutcome::SourceUnavailable(_) | BatchOutcome::EmptySource => {
                self.settings.empty_list_retry
            }
        }
    }

    /// Runs batches forever; never returns.
    pub async fn run_forever(&self) {
        let mut batch = 0u64;
        loop {
            batch += 1;
            debug!("Batch {batch} starting");
            let outcome = self.run_batch().await;
            let cooldown = self.cooldown(&outcome);
            debug!("Batch {batch} ended with {outcome:?}, sleeping {cooldown:?}");
            tokio::time::sleep(cooldown).await;
        }
    }
}
