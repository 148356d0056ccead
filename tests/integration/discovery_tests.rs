//! Integration tests for link discovery
//!
//! These tests use wiremock to create mock HTTP servers and run the real
//! HTTP fetcher through the traversal, the visited URL cache and back.

use sitesnap::config::CrawlerConfig;
use sitesnap::crawler::{
    build_http_client, discover, fetch_url, FetchResult, HttpFetcher, PageFetcher,
};
use sitesnap::storage::{SqliteVisitedStore, VisitedStore};
use sitesnap::VisitedSet;
use tempfile::TempDir;
use wiremock::matchers::{any, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// HTML response with the given body
fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

/// Authority of the mock server ("127.0.0.1:PORT"), used as the crawl domain
fn domain_of(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_string()
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&CrawlerConfig::default()).expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_fresh_crawl_persists_same_domain_urls() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Seed with two same-domain links and one off-domain link
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&format!(
            r#"<a href="/link1">Link 1</a>
               <a href="{}/link2">Link 2</a>
               <a href="https://elsewhere.example.org/page">Elsewhere</a>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/link1"))
        .respond_with(html("Content 1"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/link2"))
        .respond_with(html(r#"<a href="/">Home</a><a href="/link1">Back</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let seed = format!("{}/", base_url);
    let mut visited = VisitedSet::new();

    let stats = discover(&fetcher(), &domain_of(&mock_server), &seed, &mut visited).await;

    let expected: VisitedSet = [
        seed.clone(),
        format!("{}/link1", base_url),
        format!("{}/link2", base_url),
    ]
    .into_iter()
    .collect();
    assert_eq!(visited, expected);
    assert!(!visited.contains("https://elsewhere.example.org/page"));
    assert_eq!(stats.urls_added, 3);
    assert_eq!(stats.fetch_failures, 0);

    // The cache holds exactly the discovered URLs
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("visited_urls_cache.db");
    SqliteVisitedStore::new(&cache_path).save(&visited).unwrap();

    let restored = SqliteVisitedStore::new(&cache_path).load();
    assert_eq!(restored, expected);
}

#[tokio::test]
async fn test_cached_seed_makes_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(html(r#"<a href="/new">New</a>"#))
        .expect(0)
        .mount(&mock_server)
        .await;

    let seed = format!("{}/", mock_server.uri());

    // A previous run saved the seed
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.db");
    let previous: VisitedSet = [seed.clone()].into_iter().collect();
    SqliteVisitedStore::new(&cache_path).save(&previous).unwrap();

    let mut visited = SqliteVisitedStore::new(&cache_path).load();
    let stats = discover(&fetcher(), &domain_of(&mock_server), &seed, &mut visited).await;

    assert_eq!(visited, previous);
    assert_eq!(stats.pages_fetched, 0);
    assert_eq!(stats.urls_added, 0);
}

#[tokio::test]
async fn test_failing_pages_do_not_stop_discovery() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="/missing">Missing</a>
               <a href="/report.pdf">Report</a>
               <a href="/ok">Ok</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html(r#"<a href="/ok/child">Child</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ok/child"))
        .respond_with(html("leaf"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let seed = format!("{}/", mock_server.uri());
    let mut visited = VisitedSet::new();

    let stats = discover(&fetcher(), &domain_of(&mock_server), &seed, &mut visited).await;

    // Failed pages stay recorded and will still be screenshot attempts
    assert_eq!(visited.len(), 5);
    assert!(visited.contains(&format!("{}/missing", mock_server.uri())));
    assert!(visited.contains(&format!("{}/ok/child", mock_server.uri())));
    assert_eq!(stats.fetch_failures, 2);
    assert_eq!(stats.pages_fetched, 5);
}

#[tokio::test]
async fn test_traversal_fetches_the_url_under_traversal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(html(r#"<a href="/second">Second</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(html(r#"<a href="/third">Third</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/third"))
        .respond_with(html(""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let seed = format!("{}/start", mock_server.uri());
    let mut visited = VisitedSet::new();

    discover(&fetcher(), &domain_of(&mock_server), &seed, &mut visited).await;

    assert_eq!(visited.len(), 3);
}

#[tokio::test]
async fn test_configured_headers_are_sent() {
    let mock_server = MockServer::start().await;

    let config = CrawlerConfig {
        user_agent: "SnapTest/1.0".to_string(),
        accept_language: "de-DE".to_string(),
        referer: Some("https://referrer.example.org/".to_string()),
        ..CrawlerConfig::default()
    };

    // wiremock splits header values on commas, so only comma-free values
    // are matched exactly
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "SnapTest/1.0"))
        .and(header("referer", "https://referrer.example.org/"))
        .and(header("accept-language", "de-DE"))
        .and(header_exists("accept"))
        .respond_with(html(""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&config).unwrap();
    let result = fetch_url(&client, &format!("{}/", mock_server.uri())).await;

    assert!(result.is_success(), "unexpected result: {:?}", result);
}

#[tokio::test]
async fn test_default_config_sends_referer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("referer", "http://mikegrouchy.com"))
        .and(header_exists("user-agent"))
        .respond_with(html(""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = fetcher().fetch(&format!("{}/", mock_server.uri())).await;

    assert!(result.is_success(), "unexpected result: {:?}", result);
}

#[tokio::test]
async fn test_fetch_url_classifies_outcomes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html("hello"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/image.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&CrawlerConfig::default()).unwrap();
    let base_url = mock_server.uri();

    match fetch_url(&client, &format!("{}/page", base_url)).await {
        FetchResult::Success {
            status_code, body, ..
        } => {
            assert_eq!(status_code, 200);
            assert!(body.contains("hello"));
        }
        other => panic!("expected success, got {:?}", other),
    }

    assert_eq!(
        fetch_url(&client, &format!("{}/gone", base_url)).await,
        FetchResult::HttpError { status_code: 410 }
    );

    assert!(matches!(
        fetch_url(&client, &format!("{}/image.png", base_url)).await,
        FetchResult::ContentMismatch { content_type } if content_type.starts_with("image/png")
    ));
}

#[tokio::test]
async fn test_fetch_url_connection_refused() {
    // Reserve a port, then free it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = build_http_client(&CrawlerConfig::default()).unwrap();
    let result = fetch_url(&client, &format!("http://127.0.0.1:{}/", port)).await;

    assert!(matches!(result, FetchResult::NetworkError { .. }));
}
