//! Download progress state.

use std::path::PathBuf;

use crate::error::DownloadError;

/// Byte counters for one in-flight transfer.
///
/// Only the downloader mutates this; observers receive copies through the
/// progress callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadState {
    /// `Content-Length` of the response, or 0 when the server omitted it.
    pub total_bytes: u64,
    pub downloaded_bytes: u64,
    pub destination: PathBuf,
}

impl DownloadState {
    pub const fn new(destination: PathBuf, total_bytes: u64) -> Self {
        Self {
            total_bytes,
            downloaded_bytes: 0,
            destination,
        }
    }

    /// `Some(total)` when the server reported a length.
    pub const fn known_total(&self) -> Option<u64> {
        if self.total_bytes > 0 {
            Some(self.total_bytes)
        } else {
            None
        }
    }

    /// Completion ratio in `0.0..=1.0`, `None` when the total is unknown.
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> Option<f64> {
        self.known_total()
            .map(|total| (self.downloaded_bytes as f64 / total as f64).min(1.0))
    }

    /// Check the transfer delivered every advertised byte.
    ///
    /// A transfer with no advertised length is accepted as-is.
    pub const fn verify(&self) -> Result<(), DownloadError> {
        if self.total_bytes > 0 && self.downloaded_bytes != self.total_bytes {
            return Err(DownloadError::ShortRead {
                downloaded: self.downloaded_bytes,
                total: self.total_bytes,
            });
        }
        Ok(())
    }
}
