//! Configuration constants.
//!
//! Defaults for every policy knob, plus the fixed values the validation
//! pipeline relies on.

use std::time::Duration;

/// Number of concurrent validation workers per batch.
pub const DEFAULT_POOL_WIDTH: usize = 20;

/// Maximum number of verdict events kept in the history ring.
pub const DEFAULT_HISTORY_CAP: usize = 1000;

/// Per-request timeout in seconds (direct, proxy and source-list fetches).
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Pause between two batches, in milliseconds.
pub const DEFAULT_BATCH_PAUSE_MS: u64 = 1000;

/// Delay before retrying when the source list is unreachable or empty, in milliseconds.
pub const DEFAULT_EMPTY_LIST_RETRY_MS: u64 = 5000;

/// Port the status server binds to on 127.0.0.1.
pub const DEFAULT_STATUS_PORT: u16 = 3000;

/// CORS proxy that forwards to the URL appended after it.
pub const DEFAULT_PROXY_BASE: &str = "https://corsproxy.io/";

/// Separator placed between the proxy base and the target URL.
///
/// Skipped when the configured base already ends with `?` or `=`
/// (e.g. `https://api.allorigins.win/raw?url=`).
pub const PROXY_SEPARATOR: &str = "?";

/// Default number of history entries returned by the status API.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Default User-Agent string for HTTP requests.
///
/// Mimics a desktop Chrome so that basic anti-bot filtering treats the
/// checker like a regular browser. Users can override this via the
/// `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Marker phrases that flag a response body as an anti-automation challenge page.
///
/// Matched case-insensitively as plain substrings.
pub const CAPTCHA_MARKERS: &[&str] = &[
    "captcha",
    "verify you are human",
    "verification",
    "robot",
    "cloudflare",
];

/// Interval between progress log lines while a batch is running.
pub const PROGRESS_LOGGING_INTERVAL: Duration = Duration::from_secs(30);
