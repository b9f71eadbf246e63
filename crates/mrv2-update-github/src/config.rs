//! Public configuration for the GitHub releases client.

use std::time::Duration;

/// Environment variable holding an optional API token.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Configuration for the GitHub releases client.
///
/// # Example
///
/// ```
/// use mrv2_update_github::GithubClientConfig;
/// use std::time::Duration;
///
/// let config = GithubClientConfig::new()
///     .with_timeout(Duration::from_secs(5))
///     .with_user_agent("mrv2-update/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct GithubClientConfig {
    /// Base URL of the REST API
    pub(crate) api_base: String,
    /// User agent string; GitHub rejects requests without one
    pub(crate) user_agent: String,
    /// Request timeout for metadata calls
    pub(crate) timeout: Duration,
    /// Optional token for higher rate limits
    pub(crate) token: Option<String>,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for GithubClientConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            user_agent: concat!("mrv2-update/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(15),
            token: None,
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl GithubClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus the token from `GITHUB_TOKEN`, if set and non-empty.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new().with_optional_token(
            std::env::var(GITHUB_TOKEN_ENV)
                .ok()
                .filter(|t| !t.trim().is_empty()),
        )
    }

    /// Set the API base URL.
    ///
    /// Defaults to `https://api.github.com`.
    #[must_use]
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 15 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Defaults to 2 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GithubClientConfig::new();
        assert_eq!(config.api_base, "https://api.github.com");
        assert!(config.user_agent.starts_with("mrv2-update/"));
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.token.is_none());
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GithubClientConfig::new()
            .with_api_base("http://127.0.0.1:9999")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(3))
            .with_token("ghp_secret")
            .with_max_retries(0);

        assert_eq!(config.api_base, "http://127.0.0.1:9999");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.token.as_deref(), Some("ghp_secret"));
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_optional_token() {
        let with_token = GithubClientConfig::new().with_optional_token(Some("t".to_string()));
        assert_eq!(with_token.token, Some("t".to_string()));

        let without_token = GithubClientConfig::new().with_optional_token(None);
        assert!(without_token.token.is_none());
    }
}
