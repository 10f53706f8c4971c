//! Transport error categorization.
//!
//! Turns `reqwest::Error` values into the human-readable causes stored in
//! failure details.

use std::time::Duration;

use super::types::FetchErrorKind;

/// Categorizes a `reqwest::Error` into a `FetchErrorKind`.
///
/// Status codes are never errors here: the fetcher treats every status as a
/// completed response, so only transport-level kinds are inspected.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FetchErrorKind {
    if error.is_timeout() {
        FetchErrorKind::Timeout
    } else if error.is_connect() {
        FetchErrorKind::Connect
    } else if error.is_redirect() {
        FetchErrorKind::Redirect
    } else if error.is_builder() {
        FetchErrorKind::Builder
    } else if error.is_body() {
        FetchErrorKind::Body
    } else if error.is_decode() {
        FetchErrorKind::Decode
    } else if error.is_request() {
        FetchErrorKind::Request
    } else {
        FetchErrorKind::Other
    }
}

/// Builds the human-readable cause for a failed fetch.
///
/// Timeouts report the configured limit; other kinds append the innermost
/// source message (e.g. "dns error: failed to lookup address information").
pub fn describe_fetch_error(error: &reqwest::Error, timeout: Duration) -> String {
    let kind = categorize_reqwest_error(error);
    if kind == FetchErrorKind::Timeout {
        return format!("{kind} after {timeout:?}");
    }
    format!("{kind}: {}", root_cause(error))
}

fn root_cause(error: &reqwest::Error) -> String {
    let mut cause: &dyn std::error::Error = error;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}
