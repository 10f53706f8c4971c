//! JSON API handlers over the result store.

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::super::types::{HistoryQuery, ResetResponse, StatusState, UrlListResponse, UrlQuery};
use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::store::{UrlCategory, VerdictStatus};

fn json_response<T: Serialize>(value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(json) => (StatusCode::OK, [("content-type", "application/json")], json).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to serialize response: {}", e),
        )
            .into_response(),
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, message).into_response()
}

/// Statistics and category sizes
pub async fn stats_handler(State(state): State<StatusState>) -> Response {
    json_response(&state.store.snapshot().await)
}

/// Newest-first verdict history, optionally filtered by status
pub async fn history_handler(
    State(state): State<StatusState>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let status = match query.status.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => match VerdictStatus::from_str(raw) {
            Ok(status) => Some(status),
            Err(_) => {
                return bad_request(format!(
                    "Unknown status filter '{raw}' (expected success or failed)"
                ))
            }
        },
    };
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    json_response(&state.store.history(limit, status).await)
}

/// Every URL in one category
pub async fn urls_handler(
    State(state): State<StatusState>,
    Path(category): Path<String>,
) -> Response {
    let Ok(parsed) = UrlCategory::from_str(&category) else {
        return bad_request(format!(
            "Unknown category '{category}' (expected all, success, direct, proxy, failed or pending)"
        ));
    };
    let urls = state.store.urls(parsed).await;
    json_response(&UrlListResponse {
        category: parsed,
        count: urls.len(),
        urls,
    })
}

/// Lookup of a single URL
pub async fn url_handler(
    State(state): State<StatusState>,
    Query(query): Query<UrlQuery>,
) -> Response {
    json_response(&state.store.report(&query.url).await)
}

/// Clears the store; checks in flight still record when they finish
pub async fn reset_handler(State(state): State<StatusState>) -> Response {
    state.store.reset().await;
    json_response(&ResetResponse { reset: true })
}
