//! Prometheus metrics handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::super::types::StatusState;

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<StatusState>) -> Response {
    let snapshot = state.store.snapshot().await;
    let stats = &snapshot.stats;
    let counts = &snapshot.counts;

    let metrics = format!(
        r#"# HELP json_sentinel_processed_total Verdicts recorded since start or last reset
# TYPE json_sentinel_processed_total counter
json_sentinel_processed_total {}

# HELP json_sentinel_success_total Successful verdicts by method
# TYPE json_sentinel_success_total counter
json_sentinel_success_total{{method="direct"}} {}
json_sentinel_success_total{{method="proxy"}} {}

# HELP json_sentinel_failed_total Failed verdicts
# TYPE json_sentinel_failed_total counter
json_sentinel_failed_total {}

# HELP json_sentinel_success_rate Successful verdicts as a percentage of all verdicts (0-100)
# TYPE json_sentinel_success_rate gauge
json_sentinel_success_rate {}

# HELP json_sentinel_urls Current number of URLs per category
# TYPE json_sentinel_urls gauge
json_sentinel_urls{{category="all"}} {}
json_sentinel_urls{{category="success"}} {}
json_sentinel_urls{{category="direct"}} {}
json_sentinel_urls{{category="proxy"}} {}
json_sentinel_urls{{category="failed"}} {}
json_sentinel_urls{{category="pending"}} {}
"#,
        stats.total_processed,
        stats.direct_success_count,
        stats.proxy_success_count,
        stats.failed_count,
        stats.success_rate,
        counts.all,
        counts.success,
        counts.direct,
        counts.proxy,
        counts.failed,
        counts.pending,
    );

    (StatusCode::OK, metrics).into_response()
}
