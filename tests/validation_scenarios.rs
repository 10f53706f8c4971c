//! End-to-end validation scenarios against mock HTTP servers.
//!
//! Each test wires a real `HttpFetcher` and `Scheduler` to wiremock servers
//! standing in for the source feed, the target endpoints and the CORS proxy.

use std::sync::Arc;
use std::time::Duration;

use json_sentinel::store::VerdictDetails;
use json_sentinel::validate::NOT_JSON_REASON;
use json_sentinel::{
    BatchOutcome, CheckMethod, HttpFetcher, ResultStore, Scheduler, SchedulerSettings,
    UrlCategory, UrlState, UrlStatus, VerdictStatus,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHALLENGE_PAGE: &str = "<!DOCTYPE html><html><head><title>Just a moment...</title></head>\
<body><h1>Verify you are human</h1><p>Performance &amp; security by Cloudflare</p></body></html>";

/// Builds a scheduler whose source list is served by `source` at `/urls.txt`.
fn scheduler_for(
    source: &MockServer,
    proxy: &MockServer,
    timeout: Duration,
) -> Scheduler<HttpFetcher> {
    let fetcher =
        HttpFetcher::new("json_sentinel_test/1.0", timeout).expect("Failed to build fetcher");
    let settings = SchedulerSettings {
        source_url: format!("{}/urls.txt", source.uri()),
        proxy_base: format!("{}/", proxy.uri()),
        pool_width: 4,
        batch_pause: Duration::from_millis(10),
        empty_list_retry: Duration::from_millis(10),
    };
    Scheduler::new(Arc::new(fetcher), ResultStore::new(1000), settings)
}

async fn serve_list(server: &MockServer, urls: &[String]) {
    Mock::given(method("GET"))
        .and(path("/urls.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urls.join("\n")))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_direct_json_and_proxy_fallback() {
    let target = MockServer::start().await;
    let proxy = MockServer::start().await;

    let a = format!("{}/a.json", target.uri());
    let b = format!("{}/b.json", target.uri());
    serve_list(&target, &[a.clone(), b.clone()]).await;

    Mock::given(method("GET"))
        .and(path("/a.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"name\": \"a\"}"))
        .mount(&target)
        .await;
    Mock::given(method("GET"))
        .and(path("/b.json"))
        .respond_with(ResponseTemplate::new(403).set_body_string(CHALLENGE_PAGE))
        .mount(&target)
        .await;
    // Only b should ever reach the proxy
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"name\": \"b\"}"))
        .expect(1)
        .mount(&proxy)
        .await;

    let scheduler = scheduler_for(&target, &proxy, Duration::from_secs(5));
    assert_eq!(
        scheduler.run_batch().await,
        BatchOutcome::Completed { urls: 2 }
    );

    let store = scheduler.store();
    assert_eq!(store.status(&a).await, Some(UrlStatus::Success));
    assert_eq!(store.method(&a).await, Some(CheckMethod::Direct));
    assert_eq!(store.status(&b).await, Some(UrlStatus::Success));
    assert_eq!(store.method(&b).await, Some(CheckMethod::Proxy));
    assert_eq!(store.urls(UrlCategory::Direct).await, vec![a.clone()]);
    assert_eq!(store.urls(UrlCategory::Proxy).await, vec![b.clone()]);

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.stats.total_processed, 2);
    assert_eq!(snapshot.stats.direct_success_count, 1);
    assert_eq!(snapshot.stats.proxy_success_count, 1);
    assert_eq!(snapshot.stats.success_rate, 100.0);
    assert_eq!(snapshot.counts.pending, 0);

    let proxied = proxy.received_requests().await.expect("recording is on");
    assert_eq!(proxied.len(), 1);
    assert_eq!(proxied[0].url.query(), Some(b.as_str()));
}

#[tokio::test]
async fn test_timeouts_on_both_attempts() {
    let target = MockServer::start().await;
    let proxy = MockServer::start().await;

    let c = format!("{}/c.json", target.uri());
    serve_list(&target, &[c.clone()]).await;

    let slow = ResponseTemplate::new(200)
        .set_body_string("{}")
        .set_delay(Duration::from_secs(3));
    Mock::given(method("GET"))
        .and(path("/c.json"))
        .respond_with(slow.clone())
        .mount(&target)
        .await;
    Mock::given(method("GET"))
        .respond_with(slow)
        .mount(&proxy)
        .await;

    let scheduler = scheduler_for(&target, &proxy, Duration::from_millis(500));
    scheduler.run_batch().await;

    let store = scheduler.store();
    let Some(UrlState::Failed(detail)) = store.lookup(&c).await else {
        panic!("c should have failed");
    };
    let direct_error = detail.direct_error.expect("direct error recorded");
    let proxy_error = detail.proxy_error.expect("proxy error recorded");
    assert!(direct_error.contains("timed out"), "got {direct_error}");
    assert!(proxy_error.contains("timed out"), "got {proxy_error}");
    assert!(!detail.direct_captcha);
    assert!(!detail.proxy_captcha);
    assert_eq!(store.snapshot().await.stats.failed_count, 1);
}

#[tokio::test]
async fn test_plain_text_is_not_json() {
    let target = MockServer::start().await;
    let proxy = MockServer::start().await;

    let d = format!("{}/d.txt", target.uri());
    serve_list(&target, &[d.clone()]).await;
    Mock::given(method("GET"))
        .and(path("/d.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello world"))
        .mount(&target)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("proxied hello"))
        .mount(&proxy)
        .await;

    let scheduler = scheduler_for(&target, &proxy, Duration::from_secs(5));
    scheduler.run_batch().await;

    let store = scheduler.store();
    let history = store.history(10, Some(VerdictStatus::Failed)).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].url, d);
    assert_eq!(history[0].method, None);
    let VerdictDetails::Failure(detail) = &history[0].details else {
        panic!("failed verdict must carry failure detail");
    };
    assert_eq!(detail.direct_error.as_deref(), Some(NOT_JSON_REASON));
    assert_eq!(detail.proxy_error.as_deref(), Some(NOT_JSON_REASON));
    assert!(!detail.direct_captcha);
    assert!(!detail.proxy_captcha);
}

#[tokio::test]
async fn test_empty_source_list_touches_nothing() {
    let target = MockServer::start().await;
    let proxy = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/urls.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\n   \n"))
        .mount(&target)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&proxy)
        .await;

    let scheduler = scheduler_for(&target, &proxy, Duration::from_secs(5));
    assert_eq!(scheduler.run_batch().await, BatchOutcome::EmptySource);

    // The outer loop keeps retrying without validating anything
    let _ = tokio::time::timeout(Duration::from_millis(150), scheduler.run_forever()).await;
    let requests = target.received_requests().await.expect("recording is on");
    assert!(requests.len() >= 2);
    assert!(requests.iter().all(|r| r.url.path() == "/urls.txt"));

    let snapshot = scheduler.store().snapshot().await;
    assert_eq!(snapshot.stats.unique_urls, 0);
    assert_eq!(snapshot.stats.total_processed, 0);
    assert_eq!(snapshot.history_len, 0);
}

#[tokio::test]
async fn test_unreachable_source_is_retried() {
    let proxy = MockServer::start().await;
    let fetcher = HttpFetcher::new("json_sentinel_test/1.0", Duration::from_secs(2))
        .expect("Failed to build fetcher");
    let settings = SchedulerSettings {
        source_url: "http://127.0.0.1:9/urls.txt".to_string(),
        proxy_base: format!("{}/", proxy.uri()),
        pool_width: 2,
        batch_pause: Duration::from_millis(10),
        empty_list_retry: Duration::from_millis(10),
    };
    let scheduler = Scheduler::new(Arc::new(fetcher), ResultStore::new(10), settings);

    let outcome = scheduler.run_batch().await;
    assert!(matches!(outcome, BatchOutcome::SourceUnavailable(ref e) if e.starts_with("Connection error")));
    assert_eq!(scheduler.cooldown(&outcome), Duration::from_millis(10));
    assert!(scheduler.store().urls(UrlCategory::All).await.is_empty());
}

#[tokio::test]
async fn test_recheck_in_later_batch_overwrites_verdict() {
    let target = MockServer::start().await;
    let proxy = MockServer::start().await;

    let e = format!("{}/e.json", target.uri());
    serve_list(&target, &[e.clone()]).await;
    // First request succeeds, every later one serves HTML
    Mock::given(method("GET"))
        .and(path("/e.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[true]"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&target)
        .await;
    Mock::given(method("GET"))
        .and(path("/e.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gone</html>"))
        .with_priority(2)
        .mount(&target)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&proxy)
        .await;

    let scheduler = scheduler_for(&target, &proxy, Duration::from_secs(5));
    scheduler.run_batch().await;
    assert_eq!(scheduler.store().status(&e).await, Some(UrlStatus::Success));

    scheduler.run_batch().await;
    let store = scheduler.store();
    assert_eq!(store.status(&e).await, Some(UrlStatus::Failed));
    assert!(store.urls(UrlCategory::Success).await.is_empty());
    assert_eq!(store.recount().await, store.snapshot().await.counts);

    let history = store.history(10, None).await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].status, VerdictStatus::Failed);
    assert_eq!(history[1].status, VerdictStatus::Success);
}
