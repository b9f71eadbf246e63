//! Wire types of the GitHub releases API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /repos/{owner}/{repo}/releases/latest` payload, reduced to the
/// fields the updater reads.
#[derive(Debug, Deserialize)]
pub(crate) struct GithubRelease {
    #[serde(default)]
    pub name: Option<String>,
    pub tag_name: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// `None` when the key is missing entirely.
    #[serde(default)]
    pub assets: Option<Vec<GithubAsset>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GithubAsset {
    pub name: String,
    pub browser_download_url: String,
}

impl GithubRelease {
    /// First asset whose name ends with `suffix`.
    pub fn find_asset(&self, suffix: &str) -> Option<&GithubAsset> {
        self.assets
            .as_deref()?
            .iter()
            .find(|asset| asset.name.ends_with(suffix))
    }
}
