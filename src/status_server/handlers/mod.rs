//! Status server HTTP handlers.

mod api;
mod metrics;

pub use api::{history_handler, reset_handler, stats_handler, url_handler, urls_handler};
pub use metrics::metrics_handler;
