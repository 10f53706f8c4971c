//! Per-URL validation pipeline.
//!
//! One pass over a URL: mark it pending, try it directly, try it once through
//! the CORS proxy, then record exactly one verdict. There is no retry beyond
//! the single direct-to-proxy escalation and no backoff; the URL is checked
//! again only when it reappears in a later batch.

use log::debug;

use crate::classify::{is_captcha, is_genuine_json};
use crate::config::PROXY_SEPARATOR;
use crate::fetch::{FetchOutcome, Fetcher};
use crate::store::{CheckMethod, FailureDetail, Outcome, ResultStore};

/// Failure reason recorded when a body was flagged as a challenge page.
pub const CAPTCHA_REASON: &str = "Captcha or challenge page detected";

/// Failure reason recorded when a body was retrieved but is not valid JSON.
pub const NOT_JSON_REASON: &str = "Response is not valid JSON";

/// Final classification of one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    SucceededDirect { size: usize },
    SucceededProxy { size: usize },
    Failed(FailureDetail),
}

impl Verdict {
    fn into_outcome(self) -> Outcome {
        match self {
            Verdict::SucceededDirect { size } => Outcome::Success {
                method: CheckMethod::Direct,
                size,
            },
            Verdict::SucceededProxy { size } => Outcome::Success {
                method: CheckMethod::Proxy,
                size,
            },
            Verdict::Failed(detail) => Outcome::Failed(detail),
        }
    }
}

/// Builds the proxied form of `url`: base, separator, then the URL unmodified.
///
/// The separator is skipped when the base already ends in a query delimiter.
pub fn proxy_url(proxy_base: &str, url: &str) -> String {
    if proxy_base.ends_with('?') || proxy_base.ends_with('=') {
        format!("{proxy_base}{url}")
    } else {
        format!("{proxy_base}{PROXY_SEPARATOR}{url}")
    }
}

/// Why one attempt was rejected: `(error, captcha)`.
fn rejection(outcome: &FetchOutcome) -> (Option<String>, bool) {
    if !outcome.ok {
        let error = outcome
            .error
            .clone()
            .unwrap_or_else(|| "Request failed".to_string());
        return (Some(error), false);
    }
    if is_captcha(outcome.text.as_deref()) {
        return (Some(CAPTCHA_REASON.to_string()), true);
    }
    (Some(NOT_JSON_REASON.to_string()), false)
}

/// Runs the direct-then-proxy decision for `url` without touching the store.
pub async fn classify_url<F: Fetcher>(fetcher: &F, proxy_base: &str, url: &str) -> Verdict {
    let direct = fetcher.fetch(url).await;
    if is_genuine_json(&direct) {
        return Verdict::SucceededDirect {
            size: direct.size(),
        };
    }

    let proxy = fetcher.fetch(&proxy_url(proxy_base, url)).await;
    if is_genuine_json(&proxy) {
        return Verdict::SucceededProxy { size: proxy.size() };
    }

    let (direct_error, direct_captcha) = rejection(&direct);
    let (proxy_error, proxy_captcha) = rejection(&proxy);
    Verdict::Failed(FailureDetail {
        direct_error,
        direct_captcha,
        proxy_error,
        proxy_captcha,
    })
}

/// Validates one URL and records the pending marker and the verdict.
///
/// Never fails: transport errors end up in the verdict's failure detail.
pub async fn validate_url<F: Fetcher>(
    store: &ResultStore,
    fetcher: &F,
    proxy_base: &str,
    url: &str,
) -> Verdict {
    store.record_outcome(url, Outcome::Pending).await;

    let verdict = classify_url(fetcher, proxy_base, url).await;
    match &verdict {
        Verdict::SucceededDirect { size } => debug!("{url}: JSON via direct ({size} bytes)"),
        Verdict::SucceededProxy { size } => debug!("{url}: JSON via proxy ({size} bytes)"),
        Verdict::Failed(detail) => debug!(
            "{url}: failed (direct: {}, proxy: {})",
            detail.direct_error.as_deref().unwrap_or("-"),
            detail.proxy_error.as_deref().unwrap_or("-")
        ),
    }

    store
        .record_outcome(url, verdict.clone().into_outcome())
        .await;
    verdict
}
