//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for startup failures.
///
/// Everything after startup is absorbed: per-URL failures become verdicts and
/// source-list failures become a retry, so these are the only hard errors.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A configuration value the service cannot run with.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The status server could not bind its port.
    #[error("Failed to bind status server to port {port}: {source}")]
    StatusServerBindError {
        port: u16,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse kind of a transport failure, derived from a `reqwest::Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum FetchErrorKind {
    #[strum(to_string = "Request timed out")]
    Timeout,
    #[strum(to_string = "Connection error")]
    Connect,
    #[strum(to_string = "Redirect error")]
    Redirect,
    #[strum(to_string = "Invalid request")]
    Builder,
    #[strum(to_string = "Failed to read response body")]
    Body,
    #[strum(to_string = "Failed to decode response")]
    Decode,
    #[strum(to_string = "Request error")]
    Request,
    #[strum(to_string = "Network error")]
    Other,
}
