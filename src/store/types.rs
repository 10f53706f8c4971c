//! Result store data structures.

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// How a successful check reached valid JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CheckMethod {
    Direct,
    Proxy,
}

/// Coarse category of a URL: exactly one per URL at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UrlStatus {
    Pending,
    Success,
    Failed,
}

/// Status of a verdict event in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VerdictStatus {
    Success,
    Failed,
}

/// URL listings the store can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum UrlCategory {
    #[strum(to_string = "all")]
    All,
    #[strum(to_string = "success")]
    Success,
    #[strum(to_string = "direct", serialize = "direct-only")]
    Direct,
    #[strum(to_string = "proxy", serialize = "proxy-only")]
    Proxy,
    #[strum(to_string = "failed")]
    Failed,
    #[strum(to_string = "pending")]
    Pending,
}

/// Response metadata kept for a URL while it is in the success category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessDetail {
    /// Body length in bytes
    pub size: usize,
    /// Milliseconds since the Unix epoch
    pub checked_at: i64,
}

/// Why a URL failed both attempts.
///
/// For each attempt, `*_error` holds the transport error if the fetch failed,
/// a challenge-page message (with `*_captcha` set) if the body was rejected
/// as one, or a "not JSON" message otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDetail {
    pub direct_error: Option<String>,
    pub direct_captcha: bool,
    pub proxy_error: Option<String>,
    pub proxy_captcha: bool,
}

/// Per-URL state. The only way to change it is `ResultStore::record_outcome`.
///
/// Success detail lives inside the success variants, so a URL has a success
/// detail exactly when it is in the success category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum UrlState {
    Pending,
    SucceededDirect(SuccessDetail),
    SucceededProxy(SuccessDetail),
    Failed(FailureDetail),
}

impl UrlState {
    pub fn status(&self) -> UrlStatus {
        match self {
            UrlState::Pending => UrlStatus::Pending,
            UrlState::SucceededDirect(_) | UrlState::SucceededProxy(_) => UrlStatus::Success,
            UrlState::Failed(_) => UrlStatus::Failed,
        }
    }

    pub fn method(&self) -> Option<CheckMethod> {
        match self {
            UrlState::SucceededDirect(_) => Some(CheckMethod::Direct),
            UrlState::SucceededProxy(_) => Some(CheckMethod::Proxy),
            UrlState::Pending | UrlState::Failed(_) => None,
        }
    }

    pub fn success_detail(&self) -> Option<&SuccessDetail> {
        match self {
            UrlState::SucceededDirect(d) | UrlState::SucceededProxy(d) => Some(d),
            UrlState::Pending | UrlState::Failed(_) => None,
        }
    }

    pub fn details(&self) -> Option<VerdictDetails> {
        match self {
            UrlState::SucceededDirect(d) | UrlState::SucceededProxy(d) => {
                Some(VerdictDetails::Success(d.clone()))
            }
            UrlState::Failed(d) => Some(VerdictDetails::Failure(d.clone())),
            UrlState::Pending => None,
        }
    }

    pub fn in_category(&self, category: UrlCategory) -> bool {
        match category {
            UrlCategory::All => true,
            UrlCategory::Success => self.status() == UrlStatus::Success,
            UrlCategory::Direct => self.method() == Some(CheckMethod::Direct),
            UrlCategory::Proxy => self.method() == Some(CheckMethod::Proxy),
            UrlCategory::Failed => self.status() == UrlStatus::Failed,
            UrlCategory::Pending => self.status() == UrlStatus::Pending,
        }
    }
}

/// Outcome reported to the store for one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A check has started; clears any previous verdict.
    Pending,
    Success { method: CheckMethod, size: usize },
    Failed(FailureDetail),
}

/// Detail attached to a verdict, shaped by its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VerdictDetails {
    Success(SuccessDetail),
    Failure(FailureDetail),
}

/// One verdict event, newest first in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub url: String,
    pub status: VerdictStatus,
    pub method: Option<CheckMethod>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub details: VerdictDetails,
}

impl HistoryEntry {
    /// Builds the history event for a state, `None` for `Pending`.
    pub(crate) fn for_state(url: &str, state: &UrlState, timestamp: i64) -> Option<Self> {
        let (status, details) = match state {
            UrlState::Pending => return None,
            UrlState::SucceededDirect(d) | UrlState::SucceededProxy(d) => {
                (VerdictStatus::Success, VerdictDetails::Success(d.clone()))
            }
            UrlState::Failed(d) => (VerdictStatus::Failed, VerdictDetails::Failure(d.clone())),
        };
        Some(Self {
            url: url.to_string(),
            status,
            method: state.method(),
            timestamp,
            details,
        })
    }
}

/// Everything the store knows about one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlReport {
    pub url: String,
    pub exists: bool,
    pub status: Option<UrlStatus>,
    pub method: Option<CheckMethod>,
    pub details: Option<VerdictDetails>,
}
