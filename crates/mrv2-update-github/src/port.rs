//! `ReleaseSource` implementation for `GithubClient`.

use async_trait::async_trait;
use mrv2_update_core::ports::ReleaseSource;
use mrv2_update_core::{FetchError, ReleaseInfo};

use crate::client::GithubClient;
use crate::error::GithubError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `GithubError` to core `FetchError`.
fn map_error(err: GithubError) -> FetchError {
    match err {
        GithubError::ApiRequestFailed { status: 404, url } => {
            FetchError::NotFound(format!("no published release at {url}"))
        }
        GithubError::ApiRequestFailed { status, url } => FetchError::Network {
            message: format!("API request failed with status {status}: {url}"),
            status: Some(status),
        },
        e @ (GithubError::NoAssets { .. } | GithubError::NoMatchingAsset { .. }) => {
            FetchError::NotFound(e.to_string())
        }
        GithubError::Network(e) => FetchError::Network {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        },
        GithubError::InvalidUrl(e) => FetchError::InvalidResponse(e.to_string()),
        GithubError::JsonParse(e) => FetchError::InvalidResponse(e.to_string()),
        GithubError::InvalidResponse { message } => FetchError::InvalidResponse(message),
    }
}

#[async_trait]
impl<B: HttpBackend> ReleaseSource for GithubClient<B> {
    async fn latest(&self, owner: &str, repo: &str) -> Result<ReleaseInfo, FetchError> {
        self.latest_release(owner, repo).await.map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use serde_json::json;

    #[test]
    fn test_map_404_to_not_found() {
        let err = map_error(GithubError::ApiRequestFailed {
            status: 404,
            url: "https://api.github.com/repos/x/y/releases/latest".to_string(),
        });
        assert!(matches!(err, FetchError::NotFound(_)));
    }

    #[test]
    fn test_map_rate_limit_to_network() {
        let err = map_error(GithubError::ApiRequestFailed {
            status: 403,
            url: "u".to_string(),
        });
        assert!(matches!(err, FetchError::Network { status: Some(403), .. }));
    }

    #[tokio::test]
    async fn test_payload_without_assets_is_not_found() {
        let client = GithubClient::with_backend(
            FakeBackend::new().with_json("releases/latest", json!({"tag_name": "v0.9.0"})),
            ".deb",
        );
        let err = client.latest("ggarra13", "mrv2").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_network() {
        let client = GithubClient::with_backend(
            FakeBackend::new().with_status("releases/latest", 502),
            ".deb",
        );
        let err = client.latest("ggarra13", "mrv2").await.unwrap_err();
        assert!(matches!(err, FetchError::Network { status: Some(502), .. }));
    }
}
