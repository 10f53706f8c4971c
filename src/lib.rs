//! json_sentinel library: continuous JSON endpoint validation
//!
//! This library repeatedly pulls a list of URLs from a source feed and checks
//! each one for valid JSON, first directly and then once through a CORS proxy.
//! Verdicts land in an in-memory [`ResultStore`] that keeps categories,
//! history and statistics consistent under concurrent writers, and that a
//! status server exposes over HTTP.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use json_sentinel::{Config, HttpFetcher, ResultStore, Scheduler, SchedulerSettings};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     source_url: "https://example.com/urls.txt".to_string(),
//!     pool_width: 10,
//!     ..Default::default()
//! };
//! config.validate()?;
//!
//! let fetcher = Arc::new(HttpFetcher::new(&config.user_agent, config.timeout())?);
//! let store = ResultStore::new(config.history_cap);
//! let scheduler = Scheduler::new(fetcher, store.clone(), SchedulerSettings::from(&config));
//!
//! let outcome = scheduler.run_batch().await;
//! println!("{:?}: {:?}", outcome, store.snapshot().await.stats);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod classify;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod scheduler;
pub mod status_server;
pub mod store;
pub mod validate;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use fetch::{FetchOutcome, Fetcher, HttpFetcher};
pub use scheduler::{parse_url_list, BatchOutcome, Scheduler, SchedulerSettings};
pub use store::{
    CheckMethod, FailureDetail, HistoryEntry, Outcome, ResultStore, StoreSnapshot, UrlCategory,
    UrlState, UrlStatus, VerdictStatus,
};
pub use validate::{validate_url, Verdict};
