mod common;

use common::{Reply, TestServer};
use leadhunter_runtime::{ApiCredential, CredentialSource, LinkDiscoverer, SearchConfig};

const RESULTS: &str = r#"{
  "_type": "SearchResponse",
  "webPages": {
    "value": [
      {"name": "Acme careers", "url": "https://acme.test/careers"},
      {"name": "Acme on LinkedIn", "url": "https://linkedin.com/jobs/acme"},
      {"name": "Acme board", "url": "https://boards.greenhouse.io/acme"}
    ]
  }
}"#;

fn credential() -> ApiCredential {
    ApiCredential::new("search-key-123", CredentialSource::Programmatic, "Search")
}

fn discoverer(server: &TestServer, credential: Option<ApiCredential>) -> LinkDiscoverer {
    let config = SearchConfig {
        endpoint: server.url("/v7.0/search"),
        ..SearchConfig::default()
    };
    LinkDiscoverer::new(credential, config).unwrap()
}

#[tokio::test]
async fn test_no_credential_makes_no_calls() {
    let server = TestServer::start(Reply::json(RESULTS)).await;
    let discoverer = discoverer(&server, None);

    for query in ["acme", "", "  (acme) site:lever.co  "] {
        assert!(discoverer.discover(query, 6).await.is_empty());
    }
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn test_results_in_order() {
    let server = TestServer::start(Reply::json(RESULTS)).await;

    let urls = discoverer(&server, Some(credential()))
        .discover("(acme) site:lever.co", 6)
        .await;

    assert_eq!(
        urls,
        vec![
            "https://acme.test/careers",
            "https://linkedin.com/jobs/acme",
            "https://boards.greenhouse.io/acme",
        ]
    );

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.starts_with("GET /v7.0/search?"));
    assert!(request.contains("count=6"));
    assert!(request.contains("mkt=en-US"));
    assert!(request.contains("q=%28acme%29"));
    assert!(request.to_lowercase().contains("ocp-apim-subscription-key: search-key-123"));
}

#[tokio::test]
async fn test_results_capped() {
    let server = TestServer::start(Reply::json(RESULTS)).await;

    let urls = discoverer(&server, Some(credential())).discover("acme", 2).await;

    assert_eq!(urls.len(), 2);
    assert_eq!(urls[0], "https://acme.test/careers");
}

#[tokio::test]
async fn test_missing_web_pages_is_empty() {
    let server = TestServer::start(Reply::json(r#"{"_type":"SearchResponse"}"#)).await;

    let urls = discoverer(&server, Some(credential())).discover("acme", 6).await;

    assert!(urls.is_empty());
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_api_error_is_empty() {
    let server = TestServer::start(Reply::json(r#"{"error":"quota"}"#).status(403)).await;

    let urls = discoverer(&server, Some(credential())).discover("acme", 6).await;

    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_empty() {
    let server = TestServer::start(Reply::json("{not json")).await;

    assert!(discoverer(&server, Some(credential()))
        .discover("acme", 6)
        .await
        .is_empty());
}

#[tokio::test]
async fn test_item_without_url_is_empty() {
    let server =
        TestServer::start(Reply::json(r#"{"webPages":{"value":[{"name":"no link"}]}}"#)).await;

    assert!(discoverer(&server, Some(credential()))
        .discover("acme", 6)
        .await
        .is_empty());
}
