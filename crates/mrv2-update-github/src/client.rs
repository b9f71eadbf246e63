//! Latest-release lookup.

use mrv2_update_core::ReleaseInfo;
use tracing::{debug, info};
use url::Url;

use crate::config::GithubClientConfig;
use crate::error::{GithubError, GithubResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::GithubRelease;

// ============================================================================
// Type Aliases
// ============================================================================

/// GitHub client using the reqwest HTTP backend.
pub type DefaultGithubClient = GithubClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the GitHub releases API, bound to one asset suffix.
///
/// The suffix comes from the platform strategy (`.exe`, `.deb`, `.rpm`,
/// `.tar.gz`, `amd64.dmg`, ...). Use `DefaultGithubClient` in production.
pub struct GithubClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) api_base: Url,
    pub(crate) asset_suffix: String,
}

impl DefaultGithubClient {
    /// Create a client that selects assets ending in `asset_suffix`.
    pub fn new(config: &GithubClientConfig, asset_suffix: impl Into<String>) -> GithubResult<Self> {
        Ok(Self {
            backend: ReqwestBackend::new(config)?,
            api_base: Url::parse(&config.api_base)?,
            asset_suffix: asset_suffix.into(),
        })
    }
}

impl<B: HttpBackend> GithubClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(backend: B, asset_suffix: &str) -> Self {
        Self {
            backend,
            api_base: Url::parse("https://api.github.com").unwrap(),
            asset_suffix: asset_suffix.to_string(),
        }
    }

    pub fn asset_suffix(&self) -> &str {
        &self.asset_suffix
    }

    fn latest_url(&self, owner: &str, repo: &str) -> GithubResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| GithubError::InvalidResponse {
                message: format!("API base cannot hold a path: {}", self.api_base),
            })?
            .pop_if_empty()
            .extend(["repos", owner, repo, "releases", "latest"]);
        Ok(url)
    }

    /// Fetch the latest release and select this platform's asset.
    pub async fn latest_release(&self, owner: &str, repo: &str) -> GithubResult<ReleaseInfo> {
        let url = self.latest_url(owner, repo)?;
        let release: GithubRelease = self.backend.get_json(&url).await?;
        debug!(
            tag = %release.tag_name,
            assets = release.assets.as_ref().map_or(0, Vec::len),
            "fetched latest release"
        );

        if release.assets.is_none() {
            return Err(GithubError::NoAssets {
                tag: release.tag_name,
            });
        }

        let asset = release
            .find_asset(&self.asset_suffix)
            .cloned()
            .ok_or_else(|| GithubError::NoMatchingAsset {
                tag: release.tag_name.clone(),
                suffix: self.asset_suffix.clone(),
            })?;

        info!(tag = %release.tag_name, asset = %asset.name, "selected release asset");
        Ok(ReleaseInfo {
            name: release.name.unwrap_or_else(|| release.tag_name.clone()),
            tag_name: release.tag_name,
            published_at: release.published_at,
            download_url: asset.browser_download_url,
            asset_name: asset.name,
        })
    }
}
