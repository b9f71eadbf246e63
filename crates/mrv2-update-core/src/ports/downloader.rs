//! Asset transfer port.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::DownloadState;
use crate::error::DownloadError;

/// Progress callback, invoked from the download worker.
pub type ProgressFn<'a> = &'a (dyn Fn(&DownloadState) + Send + Sync);

/// Streams a release asset into a local directory.
#[async_trait]
pub trait AssetDownloader: Send + Sync {
    /// Download `url` to `destination_dir/asset_name`.
    ///
    /// On success the file is flushed and every advertised byte was
    /// received. On failure no partial file is left behind.
    async fn download(
        &self,
        url: &str,
        destination_dir: &Path,
        asset_name: &str,
        progress: ProgressFn<'_>,
    ) -> Result<DownloadState, DownloadError>;
}
