//! Aggregate statistics.
//!
//! `Statistics` counts verdict events (one per `record_outcome` call with a
//! success or failure); `CategoryCounts` counts current category membership.
//! Both are maintained incrementally and kept in step with the per-URL states
//! under the store's write lock.

use serde::Serialize;

use super::types::{CheckMethod, HistoryEntry, UrlState, UrlStatus, VerdictStatus};

/// Running verdict counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_processed: u64,
    pub success_count: u64,
    pub failed_count: u64,
    pub direct_success_count: u64,
    pub proxy_success_count: u64,
    pub last_processed: Option<i64>,
}

impl Statistics {
    pub(crate) fn record(&mut self, entry: &HistoryEntry) {
        self.total_processed += 1;
        self.last_processed = Some(entry.timestamp);
        match entry.status {
            VerdictStatus::Success => {
                self.success_count += 1;
                match entry.method {
                    Some(CheckMethod::Direct) => self.direct_success_count += 1,
                    Some(CheckMethod::Proxy) => self.proxy_success_count += 1,
                    None => {}
                }
            }
            VerdictStatus::Failed => self.failed_count += 1,
        }
    }

    /// Successes as a percentage of all verdicts, rounded to two decimals.
    ///
    /// Zero (not NaN) when nothing has been processed yet.
    pub fn success_rate(&self) -> f64 {
        let attempts = self.success_count + self.failed_count;
        if attempts == 0 {
            return 0.0;
        }
        let rate = self.success_count as f64 / attempts as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }
}

/// Current size of every category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub all: usize,
    pub success: usize,
    pub direct: usize,
    pub proxy: usize,
    pub failed: usize,
    pub pending: usize,
}

impl CategoryCounts {
    pub(crate) fn add(&mut self, state: &UrlState) {
        self.adjust(state, true);
    }

    pub(crate) fn remove(&mut self, state: &UrlState) {
        self.adjust(state, false);
    }

    fn adjust(&mut self, state: &UrlState, add: bool) {
        let bump = |n: &mut usize| {
            if add {
                *n += 1;
            } else {
                *n = n.saturating_sub(1);
            }
        };
        match state.status() {
            UrlStatus::Pending => bump(&mut self.pending),
            UrlStatus::Failed => bump(&mut self.failed),
            UrlStatus::Success => bump(&mut self.success),
        }
        match state.method() {
            Some(CheckMethod::Direct) => bump(&mut self.direct),
            Some(CheckMethod::Proxy) => bump(&mut self.proxy),
            None => {}
        }
    }
}

/// Point-in-time statistics as exposed to readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_processed: u64,
    pub success_count: u64,
    pub failed_count: u64,
    pub direct_success_count: u64,
    pub proxy_success_count: u64,
    pub unique_urls: usize,
    /// Milliseconds since the Unix epoch of the latest verdict
    pub last_processed: Option<i64>,
    /// Percentage with two-decimal precision
    pub success_rate: f64,
}

impl StatsSnapshot {
    pub(crate) fn new(stats: &Statistics, unique_urls: usize) -> Self {
        Self {
            total_processed: stats.total_processed,
            success_count: stats.success_count,
            failed_count: stats.failed_count,
            direct_success_count: stats.direct_success_count,
            proxy_success_count: stats.proxy_success_count,
            unique_urls,
            last_processed: stats.last_processed,
            success_rate: stats.success_rate(),
        }
    }
}

/// Statistics plus category sizes, read under one lock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub stats: StatsSnapshot,
    pub counts: CategoryCounts,
    pub history_len: usize,
}
