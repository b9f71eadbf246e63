//! HTTP backend abstraction for the GitHub API.
//!
//! The client depends on [`HttpBackend`] rather than reqwest directly so the
//! release-selection logic can be tested against canned payloads. The
//! production backend retries transient failures with exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::GithubClientConfig;
use crate::error::{GithubError, GithubResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Fetches JSON documents.
///
/// This is an implementation detail - external code should use the
/// `ReleaseSource` port.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> GithubResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Server errors (5xx) and transport errors are retried; 4xx responses
/// fail immediately.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
    authenticated: bool,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &GithubClientConfig) -> GithubResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        if let Some(ref token) = config.token {
            let value = HeaderValue::from_str(&format!("token {token}")).map_err(|e| {
                GithubError::InvalidResponse {
                    message: format!("token is not a valid header value: {e}"),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
            authenticated: config.token.is_some(),
        })
    }

    /// Fetch a URL with automatic retry for transient errors.
    async fn fetch_with_retry(&self, url: &Url) -> GithubResult<reqwest::Response> {
        debug!(%url, authenticated = self.authenticated, "GitHub request");
        let mut last_error: Option<GithubError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_base_delay * 2u32.pow(u32::from(attempt) - 1);
                debug!(%url, attempt, ?delay, "retrying GitHub request");
                tokio::time::sleep(delay).await;
            }

            match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(GithubError::ApiRequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    return Err(GithubError::ApiRequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GithubError::InvalidResponse {
            message: "Unknown error during fetch".to_string(),
        }))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> GithubResult<T> {
        let response = self.fetch_with_retry(url).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// A fake HTTP backend that returns canned JSON or a status code.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Mutex<HashMap<String, Result<serde_json::Value, u16>>>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer URLs containing `url_contains` with `json`.
        pub fn with_json(self, url_contains: &str, json: serde_json::Value) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(url_contains.to_string(), Ok(json));
            self
        }

        /// Answer URLs containing `url_contains` with an HTTP error status.
        pub fn with_status(self, url_contains: &str, status: u16) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(url_contains.to_string(), Err(status));
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> GithubResult<T> {
            self.requests.lock().unwrap().push(url.to_string());
            let canned = {
                let responses = self.responses.lock().unwrap();
                responses
                    .iter()
                    .find(|(pattern, _)| url.as_str().contains(pattern.as_str()))
                    .map(|(_, response)| response.clone())
            };
            match canned {
                Some(Ok(json)) => serde_json::from_value(json).map_err(Into::into),
                Some(Err(status)) => Err(GithubError::ApiRequestFailed {
                    status,
                    url: url.to_string(),
                }),
                None => Err(GithubError::ApiRequestFailed {
                    status: 404,
                    url: url.to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeBackend;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reqwest_backend_creation() {
        let backend = ReqwestBackend::new(&GithubClientConfig::default()).unwrap();
        assert_eq!(backend.max_retries, 2);
        assert_eq!(backend.retry_base_delay, Duration::from_millis(500));
        assert!(!backend.authenticated);
    }

    #[test]
    fn test_reqwest_backend_with_token() {
        let config = GithubClientConfig::default().with_token("ghp_abc");
        let backend = ReqwestBackend::new(&config).unwrap();
        assert!(backend.authenticated);
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let config = GithubClientConfig::default().with_token("bad\ntoken");
        assert!(matches!(
            ReqwestBackend::new(&config),
            Err(GithubError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_fake_backend_returns_canned_response() {
        let backend = FakeBackend::new().with_json("releases/latest", json!({"tag_name": "v1.0.0"}));
        let url = Url::parse("https://api.github.com/repos/a/b/releases/latest").unwrap();
        let value: serde_json::Value = backend.get_json(&url).await.unwrap();
        assert_eq!(value["tag_name"], "v1.0.0");
        assert_eq!(backend.requests(), vec![url.to_string()]);
    }

    #[tokio::test]
    async fn test_fake_backend_returns_404_for_unknown_url() {
        let backend = FakeBackend::new();
        let url = Url::parse("https://api.github.com/unknown").unwrap();
        let result: GithubResult<serde_json::Value> = backend.get_json(&url).await;
        assert!(matches!(
            result,
            Err(GithubError::ApiRequestFailed { status: 404, .. })
        ));
    }
}
