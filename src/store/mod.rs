//! In-memory result store.
//!
//! The authoritative record of every URL seen, its current state, a bounded
//! newest-first history of verdicts, and running statistics. It is the only
//! shared mutable state in the service: workers write through
//! [`ResultStore::record_outcome`] and the status server reads through the
//! snapshot and listing methods. Internals are never handed out, so every
//! invariant is enforced under the write lock on each mutation.
//!
//! Nothing is persisted; a restart or [`ResultStore::reset`] starts from empty.

mod stats;
mod types;

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};
use tokio::sync::RwLock;

pub use stats::{CategoryCounts, Statistics, StatsSnapshot, StoreSnapshot};
pub use types::{
    CheckMethod, FailureDetail, HistoryEntry, Outcome, SuccessDetail, UrlCategory, UrlReport,
    UrlState, UrlStatus, VerdictDetails, VerdictStatus,
};

struct StoreInner {
    /// Every URL ever observed, in first-seen order
    all_urls: Vec<String>,
    states: HashMap<String, UrlState>,
    history: VecDeque<HistoryEntry>,
    history_cap: usize,
    stats: Statistics,
    counts: CategoryCounts,
}

impl StoreInner {
    fn new(history_cap: usize) -> Self {
        Self {
            all_urls: Vec::new(),
            states: HashMap::new(),
            history: VecDeque::with_capacity(history_cap.min(1024)),
            history_cap,
            stats: Statistics::default(),
            counts: CategoryCounts::default(),
        }
    }

    fn apply(&mut self, url: &str, outcome: Outcome, now: i64) {
        let state = match outcome {
            Outcome::Pending => UrlState::Pending,
            Outcome::Success { method, size } => {
                let detail = SuccessDetail {
                    size,
                    checked_at: now,
                };
                match method {
                    CheckMethod::Direct => UrlState::SucceededDirect(detail),
                    CheckMethod::Proxy => UrlState::SucceededProxy(detail),
                }
            }
            Outcome::Failed(detail) => UrlState::Failed(detail),
        };

        let entry = HistoryEntry::for_state(url, &state, now);
        self.counts.add(&state);
        match self.states.insert(url.to_string(), state) {
            Some(previous) => self.counts.remove(&previous),
            None => self.all_urls.push(url.to_string()),
        }
        self.counts.all = self.all_urls.len();

        if let Some(entry) = entry {
            self.stats.record(&entry);
            self.history.push_front(entry);
            self.history.truncate(self.history_cap);
        }
    }

    fn recount(&self) -> CategoryCounts {
        let mut counts = CategoryCounts {
            all: self.all_urls.len(),
            ..Default::default()
        };
        for state in self.states.values() {
            counts.add(state);
        }
        counts
    }
}

/// Cloneable handle to the shared store.
#[derive(Clone)]
pub struct ResultStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl ResultStore {
    /// Creates an empty store keeping at most `history_cap` history entries.
    pub fn new(history_cap: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::new(history_cap))),
        }
    }

    /// Records an outcome for `url`; the single mutation entry point.
    ///
    /// In one locked step: registers the URL if new, replaces its state (which
    /// moves it out of every other category and sets or drops its success
    /// detail) and, for a success or failure, prepends a history entry and
    /// updates the counters. The timestamp is taken under the lock, so
    /// history order and timestamps always agree.
    pub async fn record_outcome(&self, url: &str, outcome: Outcome) {
        let mut inner = self.inner.write().await;
        let now = Utc::now().timestamp_millis();
        inner.apply(url, outcome, now);
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let inner = self.inner.read().await;
        StoreSnapshot {
            stats: StatsSnapshot::new(&inner.stats, inner.all_urls.len()),
            counts: inner.counts,
            history_len: inner.history.len(),
        }
    }

    /// Returns up to `limit` history entries, newest first.
    ///
    /// The status filter is applied before the limit.
    pub async fn history(&self, limit: usize, status: Option<VerdictStatus>) -> Vec<HistoryEntry> {
        let inner = self.inner.read().await;
        inner
            .history
            .iter()
            .filter(|entry| status.map_or(true, |s| entry.status == s))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Clears every URL, the history and all counters.
    ///
    /// Checks already in flight are not stopped and will record into the
    /// emptied store when they finish.
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        let cap = inner.history_cap;
        let dropped = inner.all_urls.len();
        *inner = StoreInner::new(cap);
        info!("Result store reset ({dropped} URLs dropped)");
    }

    /// URLs in `category`, in first-seen order.
    pub async fn urls(&self, category: UrlCategory) -> Vec<String> {
        let inner = self.inner.read().await;
        if category == UrlCategory::All {
            return inner.all_urls.clone();
        }
        inner
            .all_urls
            .iter()
            .filter(|url| {
                inner
                    .states
                    .get(url.as_str())
                    .is_some_and(|state| state.in_category(category))
            })
            .cloned()
            .collect()
    }

    pub async fn lookup(&self, url: &str) -> Option<UrlState> {
        self.inner.read().await.states.get(url).cloned()
    }

    pub async fn exists(&self, url: &str) -> bool {
        self.inner.read().await.states.contains_key(url)
    }

    pub async fn status(&self, url: &str) -> Option<UrlStatus> {
        self.lookup(url).await.map(|s| s.status())
    }

    pub async fn method(&self, url: &str) -> Option<CheckMethod> {
        self.lookup(url).await.and_then(|s| s.method())
    }

    pub async fn details(&self, url: &str) -> Option<VerdictDetails> {
        self.lookup(url).await.and_then(|s| s.details())
    }

    /// Everything known about `url`, read under one lock.
    pub async fn report(&self, url: &str) -> UrlReport {
        let state = self.lookup(url).await;
        UrlReport {
            url: url.to_string(),
            exists: state.is_some(),
            status: state.as_ref().map(UrlState::status),
            method: state.as_ref().and_then(UrlState::method),
            details: state.as_ref().and_then(UrlState::details),
        }
    }

    /// Recomputes category sizes from the per-URL states.
    ///
    /// Always equal to `snapshot().counts`; exposed so callers can verify it.
    pub async fn recount(&self) -> CategoryCounts {
        let inner = self.inner.read().await;
        let counts = inner.recount();
        if counts != inner.counts {
            debug!(
                "Category counts drifted: tracked {:?}, recounted {:?}",
                inner.counts, counts
            );
        }
        counts
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HISTORY_CAP)
    }
}
