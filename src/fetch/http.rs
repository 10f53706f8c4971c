//! reqwest-backed fetcher.

use std::time::Duration;

use log::debug;

use super::{FetchOutcome, Fetcher};
use crate::error_handling::{describe_fetch_error, InitializationError};
use crate::initialization::init_client;

/// Fetcher over a shared `reqwest::Client`.
///
/// Cloning is cheap: the underlying client is reference-counted.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Builds a fetcher with its own client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, InitializationError> {
        let client = init_client(user_agent, timeout)?;
        Ok(Self { client, timeout })
    }

    async fn get_text(&self, url: &str) -> Result<(u16, String), reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok((status, text))
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        match self.get_text(url).await {
            Ok((status, text)) => {
                debug!("GET {url} -> {status} ({} bytes)", text.len());
                FetchOutcome::success(text)
            }
            Err(e) => {
                let message = describe_fetch_error(&e, self.timeout);
                debug!("GET {url} failed: {message}");
                FetchOutcome::failure(message)
            }
        }
    }
}
