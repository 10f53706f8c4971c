//! Single-request fetching.
//!
//! A fetch is one HTTP GET that always resolves to a [`FetchOutcome`]: any
//! HTTP status counts as a completed response whose body is handed to the
//! classifier, and transport failures become an error string.

mod http;

use std::future::Future;

pub use http::HttpFetcher;

/// Result of one fetch attempt.
///
/// `ok` is true when a response (of any status) was received and its body
/// read; `text` is then set. Otherwise `error` holds a human-readable cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub ok: bool,
    pub text: Option<String>,
    pub error: Option<String>,
}

impl FetchOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            text: Some(text.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: None,
            error: Some(error.into()),
        }
    }

    /// Body length in bytes, zero when no body was read.
    pub fn size(&self) -> usize {
        self.text.as_ref().map_or(0, String::len)
    }
}

/// Text-mode HTTP GET capability.
///
/// Implementations must never fail across this boundary; every outcome,
/// including timeouts, is reported through [`FetchOutcome`].
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send;
}
