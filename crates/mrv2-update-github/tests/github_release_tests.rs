//! HTTP contract tests for the GitHub release client.
//!
//! A local wiremock server stands in for `api.github.com`.

use std::time::Duration;

use mrv2_update_core::FetchError;
use mrv2_update_core::ports::ReleaseSource;
use mrv2_update_github::{DefaultGithubClient, GithubClientConfig};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LATEST: &str = "/repos/ggarra13/mrv2/releases/latest";

fn config_for(server: &MockServer) -> GithubClientConfig {
    GithubClientConfig::new()
        .with_api_base(server.uri())
        .with_timeout(Duration::from_secs(5))
        .with_max_retries(1)
        .with_retry_delay(Duration::from_millis(10))
}

fn release_body() -> serde_json::Value {
    json!({
        "name": "mrv2 v1.3.0",
        "tag_name": "v1.3.0",
        "published_at": "2024-09-01T12:00:00Z",
        "assets": [
            {
                "name": "mrv2-v1.3.0-Linux-amd64.rpm",
                "browser_download_url": "https://github.com/ggarra13/mrv2/releases/download/v1.3.0/mrv2-v1.3.0-Linux-amd64.rpm"
            },
            {
                "name": "mrv2-v1.3.0-Linux-amd64.deb",
                "browser_download_url": "https://github.com/ggarra13/mrv2/releases/download/v1.3.0/mrv2-v1.3.0-Linux-amd64.deb"
            }
        ]
    })
}

#[tokio::test]
async fn test_latest_release_selects_platform_asset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = DefaultGithubClient::new(&config_for(&server), ".deb").unwrap();
    let release = client.latest("ggarra13", "mrv2").await.unwrap();

    assert_eq!(release.tag_name, "v1.3.0");
    assert_eq!(release.name, "mrv2 v1.3.0");
    assert_eq!(release.asset_name, "mrv2-v1.3.0-Linux-amd64.deb");
    assert!(release.download_url.ends_with(".deb"));
    assert_eq!(release.version().unwrap().to_string(), "1.3.0");
}

#[tokio::test]
async fn test_token_is_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST))
        .and(header("authorization", "token secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).with_token("secret-token");
    let client = DefaultGithubClient::new(&config, ".rpm").unwrap();
    let release = client.latest("ggarra13", "mrv2").await.unwrap();
    assert_eq!(release.asset_name, "mrv2-v1.3.0-Linux-amd64.rpm");
}

#[tokio::test]
async fn test_missing_release_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = DefaultGithubClient::new(&config_for(&server), ".deb").unwrap();
    let err = client.latest("ggarra13", "mrv2").await.unwrap_err();
    assert!(matches!(err, FetchError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn test_release_without_assets_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tag_name": "v1.3.0"})))
        .mount(&server)
        .await;

    let client = DefaultGithubClient::new(&config_for(&server), ".deb").unwrap();
    let err = client.latest("ggarra13", "mrv2").await.unwrap_err();
    assert!(matches!(err, FetchError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn test_server_error_is_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = DefaultGithubClient::new(&config_for(&server), ".deb").unwrap();
    let err = client.latest("ggarra13", "mrv2").await.unwrap_err();
    assert!(
        matches!(err, FetchError::Network { status: Some(503), .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let client = DefaultGithubClient::new(&config_for(&server), ".deb").unwrap();
    let err = client.latest("ggarra13", "mrv2").await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidResponse(_)), "got {err:?}");
}
