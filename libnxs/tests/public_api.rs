use libnxs::{Credentials, EmptyGroups, Nexus, NxsError, SearchRecord};
use mockito::Matcher;

const SEARCH_PATH: &str = "/service/rest/v1/search";

#[test]
fn test_nexus_builder_requires_server_url() {
    let result = Nexus::builder().repository("docker-hosted").build();
    assert!(matches!(result, Err(NxsError::Validation { .. })));
}

#[test]
fn test_nexus_builder_requires_repository() {
    let result = Nexus::builder().server_url("http://localhost:8081").build();
    assert!(matches!(result, Err(NxsError::Validation { .. })));

    let result = Nexus::builder()
        .server_url("http://localhost:8081")
        .repository("  ")
        .build();
    assert!(matches!(result, Err(NxsError::Validation { .. })));
}

#[test]
fn test_nexus_connect_normalizes_url() {
    let nexus = Nexus::connect("localhost:8081/", "docker-hosted").unwrap();
    assert_eq!(nexus.server_url(), "http://localhost:8081");
    assert_eq!(nexus.repository(), "docker-hosted");
}

#[test]
fn test_nexus_builder_with_credentials() {
    let nexus = Nexus::builder()
        .server_url("http://localhost:8081")
        .repository("docker-hosted")
        .with_credentials(Credentials::basic("admin", "admin123"))
        .build()
        .unwrap();
    assert!(nexus.client().credentials().is_authenticated());
}

#[tokio::test]
async fn test_search_and_filter_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let _matching = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("repository".into(), "test-repo".into()),
            Matcher::UrlEncoded("format".into(), "docker".into()),
            Matcher::UrlEncoded("name".into(), "test/*".into()),
        ]))
        .with_body(
            r#"{"items": [
                {"name": "test/image1", "version": "latest", "assets": [{"checksum": {"sha256": "sha256-2"}}]},
                {"name": "test/image1", "version": "1", "assets": [{"checksum": {"sha256": "sha256-1"}}]},
                {"name": "test/image1", "version": "2", "assets": [{"checksum": {"sha256": "sha256-2"}}]}
            ]}"#,
        )
        .create_async()
        .await;

    let nexus = Nexus::connect(&server.url(), "test-repo").unwrap();

    let raw = nexus.search(&["test/*"]).await.unwrap();
    assert_eq!(
        raw,
        vec![
            SearchRecord::new("test/image1", "latest", "sha256-2"),
            SearchRecord::new("test/image1", "1", "sha256-1"),
            SearchRecord::new("test/image1", "2", "sha256-2"),
        ]
    );

    let filtered = nexus.search_and_filter(&["test/*"]).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered["test/image1"], vec!["latest", "2", "1"]);
}

#[tokio::test]
async fn test_search_and_filter_no_matches() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::Any)
        .with_body(r#"{"items": []}"#)
        .create_async()
        .await;

    let nexus = Nexus::connect(&server.url(), "test-repo").unwrap();
    assert!(nexus.search(&["nonexistent/*"]).await.unwrap().is_empty());
    assert!(
        nexus
            .search_and_filter(&["nonexistent/*"])
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_search_and_filter_with_omit_policy() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::Any)
        .with_body(
            r#"{"items": [
                {"name": "only-latest", "version": "latest", "assets": [{"checksum": {"sha256": "x"}}]},
                {"name": "app", "version": "3", "assets": [{"checksum": {"sha256": "y"}}]}
            ]}"#,
        )
        .create_async()
        .await;

    let nexus = Nexus::connect(&server.url(), "test-repo").unwrap();

    let kept = nexus.search_and_filter(&["*"]).await.unwrap();
    assert_eq!(kept.len(), 2);
    assert!(kept["only-latest"].is_empty());

    let omitted = nexus
        .search_and_filter_with(&["*"], EmptyGroups::Omit)
        .await
        .unwrap();
    assert_eq!(omitted.len(), 1);
    assert_eq!(omitted["app"], vec!["3"]);
}

#[tokio::test]
async fn test_search_error_is_fatal() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("forbidden")
        .create_async()
        .await;

    let nexus = Nexus::connect(&server.url(), "test-repo").unwrap();
    let err = nexus.search_and_filter(&["app"]).await.unwrap_err();
    assert_eq!(err.status_code(), Some(403));
}
