//! Release feed port.

use async_trait::async_trait;

use crate::domain::ReleaseInfo;
use crate::error::FetchError;

/// Source of the latest published release.
///
/// Implementations pick the asset for the current platform, so the returned
/// [`ReleaseInfo`] always points at exactly one downloadable file. Calls are
/// idempotent and may be repeated on every start.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn latest(&self, owner: &str, repo: &str) -> Result<ReleaseInfo, FetchError>;
}
