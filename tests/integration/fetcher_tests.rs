use catalog_crawler::config::HttpConfig;
use catalog_crawler::crawler::{build_http_client, HttpFetcher, PageFetcher};
use catalog_crawler::FetchError;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_http_config() -> HttpConfig {
    HttpConfig {
        user_agent: "CatalogTestBot/1.0".to_string(),
        accept_language: "en-US,en;q=0.5".to_string(),
        referer: Some("https://referer.example.com/".to_string()),
        timeout_secs: 1,
        ..HttpConfig::default()
    }
}

#[tokio::test]
async fn test_fetch_sends_configured_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .and(header("user-agent", "CatalogTestBot/1.0"))
        .and(header("accept-language", "en-US,en;q=0.5"))
        .and(header("referer", "https://referer.example.com/"))
        .and(header("sec-fetch-mode", "navigate"))
        .and(header("sec-ch-ua-platform", "\"macOS\""))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&test_http_config()).expect("Failed to build fetcher");
    let url = format!("{}/list", mock_server.uri());
    let page = fetcher.fetch(&url).await.expect("Fetch failed");

    assert_eq!(page.url, url);
    assert_eq!(page.body, "<html>ok</html>");
}

#[tokio::test]
async fn test_fetch_sends_custom_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("x-catalog-run", "nightly"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = test_http_config();
    config.headers.clear();
    config
        .headers
        .insert("X-Catalog-Run".to_string(), "nightly".to_string());

    let client = build_http_client(&config).expect("Failed to build client");
    let fetcher = HttpFetcher::with_client(client);
    let page = fetcher.fetch(&mock_server.uri()).await.expect("Fetch failed");

    assert_eq!(page.body, "<html>ok</html>");
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let mock_server = MockServer::start().await;
    let target = format!("{}/list/new", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/list/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", target.as_str()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/list/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>moved</html>"))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&test_http_config()).expect("Failed to build fetcher");
    let page = fetcher
        .fetch(&format!("{}/list/old", mock_server.uri()))
        .await
        .expect("Fetch failed");

    assert_eq!(page.url, target);
    assert_eq!(page.body, "<html>moved</html>");
}

#[tokio::test]
async fn test_fetch_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&test_http_config()).expect("Failed to build fetcher");
    let result = fetcher.fetch(&mock_server.uri()).await;

    assert_eq!(result, Err(FetchError::Status { status: 500 }));
}

#[tokio::test]
async fn test_fetch_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&test_http_config()).expect("Failed to build fetcher");
    let result = fetcher.fetch(&mock_server.uri()).await;

    assert_eq!(result, Err(FetchError::EmptyBody));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>slow</html>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&test_http_config()).expect("Failed to build fetcher");
    let result = fetcher.fetch(&mock_server.uri()).await;

    assert_eq!(result, Err(FetchError::Timeout));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Bind then drop a listener to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let fetcher = HttpFetcher::new(&test_http_config()).expect("Failed to build fetcher");
    let result = fetcher.fetch(&format!("http://127.0.0.1:{}/", port)).await;

    assert!(matches!(result, Err(FetchError::Network(_))));
}
