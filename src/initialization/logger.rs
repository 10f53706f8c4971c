//! Logger initialization.
//!
//! Two line formats are supported: a colored, timestamped plain format for
//! terminals and one JSON object per line for log collectors.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then applies to this crate and is the
/// default for everything else. HTTP client internals are capped at `info`
/// so a `debug` run shows one line per fetch instead of connection chatter.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=json_sentinel::scheduler=trace json_sentinel --source-url https://example.com/urls.txt
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for noisy in ["reqwest", "hyper", "hyper_util", "axum"] {
        builder.filter_module(noisy, LevelFilter::Info.min(level));
    }
    builder.filter_module("json_sentinel", level);

    match format {
        LogFormat::Json => builder.format(write_json_line),
        LogFormat::Plain => builder.format(write_plain_line),
    };

    builder.try_init().map_err(InitializationError::from)
}

fn write_json_line(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let line = serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    });
    writeln!(buf, "{line}")
}

fn write_plain_line(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let level = record.level();
    let label = format!("{level:<5}");
    let label = match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    };
    writeln!(
        buf,
        "{} {} {} {}",
        chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
        label,
        record.target().cyan(),
        record.args()
    )
}
