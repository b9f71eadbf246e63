//! Streaming HTTP download into the temp directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::StreamExt;
use mrv2_update_core::ports::{AssetDownloader, ProgressFn};
use mrv2_update_core::{DownloadError, DownloadState};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::config::DownloaderConfig;
use crate::throttle::ProgressThrottle;

/// [`AssetDownloader`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestDownloader {
    client: reqwest::Client,
    config: DownloaderConfig,
}

impl ReqwestDownloader {
    pub fn new(config: DownloaderConfig) -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| network_error(&e))?;
        Ok(Self { client, config })
    }

    async fn transfer(
        &self,
        url: &str,
        destination: &Path,
        progress: ProgressFn<'_>,
    ) -> Result<DownloadState, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Network {
                message: format!("HTTP {status} for {url}"),
                status: Some(status.as_u16()),
            });
        }

        let mut state =
            DownloadState::new(destination.to_path_buf(), response.content_length().unwrap_or(0));
        debug!(%url, total = state.total_bytes, "download started");

        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(|e| DownloadError::io(destination, &e))?;
        let mut throttle = ProgressThrottle::new(self.config.progress_interval);
        progress(&state);

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| network_error(&e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::io(destination, &e))?;
            state.downloaded_bytes += chunk.len() as u64;
            if throttle.should_emit() {
                progress(&state);
            }
        }

        file.flush()
            .await
            .map_err(|e| DownloadError::io(destination, &e))?;
        file.sync_all()
            .await
            .map_err(|e| DownloadError::io(destination, &e))?;
        progress(&state);

        state.verify()?;
        Ok(state)
    }
}

#[async_trait]
impl AssetDownloader for ReqwestDownloader {
    async fn download(
        &self,
        url: &str,
        destination_dir: &Path,
        asset_name: &str,
        progress: ProgressFn<'_>,
    ) -> Result<DownloadState, DownloadError> {
        let destination = destination_path(destination_dir, asset_name)?;
        tokio::fs::create_dir_all(destination_dir)
            .await
            .map_err(|e| DownloadError::io(destination_dir, &e))?;

        match self.transfer(url, &destination, progress).await {
            Ok(state) => {
                info!(
                    path = %state.destination.display(),
                    bytes = state.downloaded_bytes,
                    "download finished"
                );
                Ok(state)
            }
            Err(e) => {
                discard_partial(&destination).await;
                Err(e)
            }
        }
    }
}

/// `dir/<file name of asset_name>`.
///
/// Asset names come from the release payload; any directory part is dropped
/// so the file always lands inside `dir`.
fn destination_path(dir: &Path, asset_name: &str) -> Result<PathBuf, DownloadError> {
    Path::new(asset_name)
        .file_name()
        .map(|name| dir.join(name))
        .ok_or_else(|| DownloadError::Io {
            path: dir.join(asset_name),
            message: "asset name has no file name".to_string(),
        })
}

async fn discard_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "removed partial download"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "could not remove partial download"),
    }
}

fn network_error(err: &reqwest::Error) -> DownloadError {
    DownloadError::Network {
        message: err.to_string(),
        status: err.status().map(|s| s.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_keeps_plain_names() {
        let path = destination_path(Path::new("/tmp/upd"), "mrv2-v1.3.0-Linux-amd64.deb").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/upd/mrv2-v1.3.0-Linux-amd64.deb"));
    }

    #[test]
    fn test_destination_strips_directories() {
        let path = destination_path(Path::new("/tmp/upd"), "../../etc/mrv2.deb").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/upd/mrv2.deb"));
    }

    #[test]
    fn test_destination_rejects_empty_name() {
        assert!(matches!(
            destination_path(Path::new("/tmp/upd"), ".."),
            Err(DownloadError::Io { .. })
        ));
    }
}
