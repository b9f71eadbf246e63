//! Downloader configuration.

use std::time::Duration;

/// Settings for [`ReqwestDownloader`](crate::ReqwestDownloader).
///
/// Only connecting is bounded by a timeout. Installers run to hundreds of
/// megabytes, so the body transfer itself is left unbounded.
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    pub(crate) connect_timeout: Duration,
    pub(crate) user_agent: String,
    pub(crate) progress_interval: Duration,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            user_agent: format!("mrv2-update/{}", env!("CARGO_PKG_VERSION")),
            progress_interval: Duration::from_millis(100),
        }
    }
}

impl DownloaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Minimum gap between two progress callbacks.
    #[must_use]
    pub const fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DownloaderConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.progress_interval, Duration::from_millis(100));
        assert!(config.user_agent.starts_with("mrv2-update/"));
    }

    #[test]
    fn test_builder() {
        let config = DownloaderConfig::new()
            .with_connect_timeout(Duration::from_secs(3))
            .with_user_agent("test-agent")
            .with_progress_interval(Duration::ZERO);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.progress_interval, Duration::ZERO);
    }
}
