//! Status server data structures.

use serde::{Deserialize, Serialize};

use crate::store::{ResultStore, UrlCategory};

/// Shared state for the status server
#[derive(Clone)]
pub struct StatusState {
    pub store: ResultStore,
}

/// Query string for `/api/history`
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
    pub status: Option<String>,
}

/// Query string for `/api/url`
#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub url: String,
}

/// JSON response for `/api/urls/:category`
#[derive(Serialize)]
pub struct UrlListResponse {
    pub category: UrlCategory,
    pub count: usize,
    pub urls: Vec<String>,
}

/// JSON response for `/api/reset`
#[derive(Serialize)]
pub struct ResetResponse {
    pub reset: bool,
}
