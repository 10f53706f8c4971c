//! HTTP client initialization.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::ClientBuilder;

/// Initializes the HTTP client shared by every fetch.
///
/// Creates a `reqwest::Client` configured with:
/// - a browser-like User-Agent and Accept headers
/// - a single timeout covering connect, headers and body
/// - redirect following with reqwest's default policy (up to 10 hops)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json,text/plain,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(user_agent)
        .default_headers(headers)
        .build()
}
