//! Command-line and environment configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_BATCH_PAUSE_MS, DEFAULT_EMPTY_LIST_RETRY_MS, DEFAULT_HISTORY_CAP, DEFAULT_POOL_WIDTH,
    DEFAULT_PROXY_BASE, DEFAULT_STATUS_PORT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::error_handling::InitializationError;

/// Logging verbosity, mapped onto `log::LevelFilter`.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log line format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Colored, timestamped text for terminals
    Plain,
    /// One JSON object per line
    Json,
}

/// Service configuration.
///
/// Read once at startup from command-line flags, falling back to environment
/// variables (a `.env` file is honored by the binary). Nothing is hot-reloaded.
///
/// # Examples
///
/// ```bash
/// # Minimal: only the source list is required
/// json_sentinel --source-url https://example.com/urls.txt
///
/// # Narrower pool, different proxy, JSON logs
/// POOL_WIDTH=5 json_sentinel --source-url https://example.com/urls.txt \
///     --proxy-base "https://api.allorigins.win/raw?url=" --log-format json
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "json_sentinel",
    about = "Continuously checks a list of URLs for valid JSON, falling back to a CORS proxy."
)]
pub struct Config {
    /// Newline-separated URL list fetched at the start of every batch
    #[arg(long, env = "SOURCE_URL")]
    pub source_url: String,

    /// CORS proxy base; the target URL is appended after a `?` separator
    #[arg(long, env = "PROXY_BASE", default_value = DEFAULT_PROXY_BASE)]
    pub proxy_base: String,

    /// Status server port (bound on 127.0.0.1)
    #[arg(long, env = "PORT", default_value_t = DEFAULT_STATUS_PORT)]
    pub status_port: u16,

    /// Number of concurrent validation workers
    #[arg(long, env = "POOL_WIDTH", default_value_t = DEFAULT_POOL_WIDTH)]
    pub pool_width: usize,

    /// Maximum number of verdicts kept in history
    #[arg(long, env = "HISTORY_CAP", default_value_t = DEFAULT_HISTORY_CAP)]
    pub history_cap: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Pause between batches in milliseconds
    #[arg(long, default_value_t = DEFAULT_BATCH_PAUSE_MS)]
    pub batch_pause_ms: u64,

    /// Delay before retrying an unreachable or empty source list, in milliseconds
    #[arg(long, default_value_t = DEFAULT_EMPTY_LIST_RETRY_MS)]
    pub empty_list_retry_ms: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: String::new(),
            proxy_base: DEFAULT_PROXY_BASE.to_string(),
            status_port: DEFAULT_STATUS_PORT,
            pool_width: DEFAULT_POOL_WIDTH,
            history_cap: DEFAULT_HISTORY_CAP,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            batch_pause_ms: DEFAULT_BATCH_PAUSE_MS,
            empty_list_retry_ms: DEFAULT_EMPTY_LIST_RETRY_MS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Rejects configurations the service cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidConfig` if the source or proxy URL is
    /// not an absolute http(s) URL, or if the pool width or history cap is zero.
    pub fn validate(&self) -> Result<(), InitializationError> {
        check_http_url("source-url", &self.source_url)?;
        check_http_url("proxy-base", &self.proxy_base)?;
        if self.pool_width == 0 {
            return Err(InitializationError::InvalidConfig(
                "pool-width must be at least 1".to_string(),
            ));
        }
        if self.history_cap == 0 {
            return Err(InitializationError::InvalidConfig(
                "history-cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    pub fn empty_list_retry(&self) -> Duration {
        Duration::from_millis(self.empty_list_retry_ms)
    }
}

fn check_http_url(name: &str, value: &str) -> Result<(), InitializationError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(InitializationError::InvalidConfig(format!(
            "{name} uses unsupported scheme '{}': {value}",
            parsed.scheme()
        ))),
        Err(e) => Err(InitializationError::InvalidConfig(format!(
            "{name} is not a valid URL ({e}): {value}"
        ))),
    }
}
