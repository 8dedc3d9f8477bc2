use catalog_crawler::config::{Config, CrawlerConfig, ExtractorConfig, HttpConfig, OutputConfig};
use catalog_crawler::crawler::crawl;
use catalog_crawler::output::{load_report, write_debug_page, JsonFileSink, Sink};
use catalog_crawler::{CrawlError, FetchError};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_PATH: &str = "/list/view.html";

/// Creates a test configuration pointing at the mock server's first page
fn create_test_config(server: &MockServer, max_pages: u32, delay_ms: u64) -> Config {
    Config {
        crawler: CrawlerConfig {
            base_url: format!("{}{}?page=1", server.uri(), LIST_PATH),
            max_pages,
            delay_ms,
        },
        http: HttpConfig {
            timeout_secs: 5,
            ..HttpConfig::default()
        },
        extractor: ExtractorConfig::default(),
        output: OutputConfig::default(),
    }
}

/// Renders a listing page in the layout the default selectors expect
fn listing_page(titles: &[&str], pager: &[&str]) -> String {
    let items: String = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            format!(
                r#"<li>
                    <a class="bcover" href="/comic/{i}/"><img src="/covers/{i}.jpg" /><span class="tt">第{i}話</span></a>
                    <p class="ell"><a href="/comic/{i}/">{title}</a></p>
                    <span class="updateon">更新於：2024-02-0{i} <em>7.{i}</em></span>
                </li>"#
            )
        })
        .collect();

    let links: String = pager
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();

    format!(
        r#"<html><head><title>Catalog</title></head><body>
        <ul id="contList">{}</ul>
        <div class="pager">{}</div>
        </body></html>"#,
        items, links
    )
}

async fn mount_page(server: &MockServer, page: &str, body: String, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(query_param("page", page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_follows_pagination() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "1",
        listing_page(
            &["One", "Two", "Three"],
            &["?page=2", "?page=3", "?page=1", "/about"],
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "2", listing_page(&["Four", "Five"], &["?page=4"]), 1).await;
    mount_page(&mock_server, "3", listing_page(&["Six"], &[]), 1).await;
    mount_page(&mock_server, "4", listing_page(&["Never"], &[]), 0).await;

    let config = create_test_config(&mock_server, 5, 0);
    let report = crawl(&config).await.expect("Crawl failed");

    let titles: Vec<&str> = report.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two", "Three", "Four", "Five", "Six"]);
    assert_eq!(report.total_records, 6);
    assert_eq!(report.pages_crawled, 3);
    assert!(report.skipped_pages.is_empty());

    let first = &report.records[0];
    assert_eq!(first.url, format!("{}/comic/0/", mock_server.uri()));
    assert_eq!(first.image_url, "/covers/0.jpg");
    assert_eq!(first.subtitle, "第0話");
    assert_eq!(first.update_label, "2024-02-00");
    assert_eq!(first.score, "7.0");

    // Wiremock verifies expectations when mock_server drops
}

#[tokio::test]
async fn test_page_budget_is_respected() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "1",
        listing_page(&["A", "B"], &["?page=2", "?page=3", "?page=1"]),
        1,
    )
    .await;
    mount_page(&mock_server, "2", listing_page(&["C"], &[]), 1).await;
    mount_page(&mock_server, "3", listing_page(&["D"], &[]), 0).await;

    let config = create_test_config(&mock_server, 1, 0);
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.total_records, 3);
    assert_eq!(report.pages_crawled, 2);
}

#[tokio::test]
async fn test_secondary_failure_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "1",
        listing_page(&["A"], &["?page=2", "?page=3"]),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "3", listing_page(&["C", "D"], &[]), 1).await;

    let config = create_test_config(&mock_server, 10, 0);
    let report = crawl(&config).await.expect("Crawl failed");

    let titles: Vec<&str> = report.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "C", "D"]);
    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.skipped_pages.len(), 1);
    assert!(report.skipped_pages[0].url.ends_with("?page=2"));
    assert_eq!(report.skipped_pages[0].reason, "HTTP status 503");
}

#[tokio::test]
async fn test_base_page_failure_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server, 10, 0);
    let result = crawl(&config).await;

    match result {
        Err(CrawlError::FatalFetch { source, .. }) => {
            assert_eq!(source, FetchError::Status { status: 404 });
        }
        other => panic!("expected FatalFetch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_base_body_is_fatal() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "1", "   \n".to_string(), 1).await;

    let config = create_test_config(&mock_server, 10, 0);
    let result = crawl(&config).await;

    assert!(matches!(
        result,
        Err(CrawlError::FatalFetch {
            source: FetchError::EmptyBody,
            ..
        })
    ));
}

#[tokio::test]
async fn test_layout_change_is_structural_mismatch() {
    let mock_server = MockServer::start().await;

    let body = r#"<html><body><div class="new-layout"><a href="?page=2">2</a></div></body></html>"#;
    mount_page(&mock_server, "1", body.to_string(), 1).await;
    mount_page(&mock_server, "2", listing_page(&["A"], &[]), 0).await;

    let config = create_test_config(&mock_server, 10, 0);
    let result = crawl(&config).await;

    let content = match result {
        Err(CrawlError::StructuralMismatch { content, .. }) => content,
        other => panic!("expected StructuralMismatch, got {:?}", other),
    };
    assert!(content.contains("new-layout"));

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let debug_path = dir.path().join("debug").join("debug_page.html");
    write_debug_page(&debug_path, &content).expect("Failed to write debug page");

    assert_eq!(std::fs::read_to_string(&debug_path).unwrap(), body);
}

#[tokio::test]
async fn test_secondary_pages_are_paced() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "1",
        listing_page(&["A"], &["?page=2", "?page=3"]),
        1,
    )
    .await;
    mount_page(&mock_server, "2", listing_page(&["B"], &[]), 1).await;
    mount_page(&mock_server, "3", listing_page(&["C"], &[]), 1).await;

    let config = create_test_config(&mock_server, 10, 100);
    let start = Instant::now();
    crawl(&config).await.expect("Crawl failed");

    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_report_persisted_to_json() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "1", listing_page(&["咒術迴戰"], &["?page=2"]), 1).await;
    mount_page(&mock_server, "2", listing_page(&["間諜家家酒"], &[]), 1).await;

    let config = create_test_config(&mock_server, 10, 0);
    let report = crawl(&config).await.expect("Crawl failed");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("catalog_data").join("all_records.json");
    JsonFileSink::new(&json_path)
        .persist(&report)
        .expect("Failed to persist report");

    let loaded = load_report(&json_path).expect("Failed to load report");
    assert_eq!(loaded.total_records, 2);
    assert_eq!(loaded.records, report.records);

    let raw = std::fs::read_to_string(&json_path).unwrap();
    assert!(raw.contains("咒術迴戰"));
}
