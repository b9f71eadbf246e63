//! Internal error types for GitHub API operations.
//!
//! Mapped to the core `FetchError` at the port boundary.

use thiserror::Error;

/// Result type alias for GitHub operations.
pub type GithubResult<T> = Result<T, GithubError>;

/// Errors related to GitHub API operations.
#[derive(Debug, Error)]
pub enum GithubError {
    /// API request failed with an HTTP error status.
    #[error("GitHub API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The release payload has no `assets` array.
    #[error("Release {tag} has no assets")]
    NoAssets { tag: String },

    /// No asset name ends with the platform suffix.
    #[error("Release {tag} has no asset ending in '{suffix}'")]
    NoMatchingAsset { tag: String, suffix: String },

    /// API returned an unexpected response.
    #[error("Invalid response from GitHub API: {message}")]
    InvalidResponse { message: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_failed_error_message() {
        let error = GithubError::ApiRequestFailed {
            status: 403,
            url: "https://api.github.com/repos/ggarra13/mrv2/releases/latest".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("api.github.com"));
    }

    #[test]
    fn test_no_matching_asset_message() {
        let error = GithubError::NoMatchingAsset {
            tag: "v1.2.0".to_string(),
            suffix: ".rpm".to_string(),
        };
        assert_eq!(error.to_string(), "Release v1.2.0 has no asset ending in '.rpm'");
    }

    #[test]
    fn test_json_parse_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: GithubError = json_err.into();
        assert!(matches!(error, GithubError::JsonParse(_)));
    }
}
