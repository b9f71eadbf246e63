//! Error types for the update subsystem.
//!
//! Each stage of an update cycle has its own error enum so callers can tell
//! a metadata failure from a failed install. [`UpdateError`] aggregates them
//! for the orchestrator.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

// =============================================================================
// Version parsing
// =============================================================================

/// A version string could not be parsed into `(major, minor, patch)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unparsable version string: {input:?}")]
pub struct VersionParseError {
    /// The offending input, verbatim.
    pub input: String,
}

impl VersionParseError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

// =============================================================================
// Release metadata
// =============================================================================

/// Errors from the release metadata endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure, timeout or unexpected HTTP status.
    #[error("Network error: {message}")]
    Network {
        message: String,
        status: Option<u16>,
    },

    /// The release exists but carries no asset for this platform,
    /// or the payload has no assets at all.
    #[error("No release asset found: {0}")]
    NotFound(String),

    /// The payload could not be decoded.
    #[error("Invalid release payload: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status: None,
        }
    }
}

// =============================================================================
// Download
// =============================================================================

/// Errors from streaming a release asset to disk.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DownloadError {
    /// The HTTP request failed or returned a non-success status.
    #[error("Download failed: {message}")]
    Network {
        message: String,
        status: Option<u16>,
    },

    /// Writing the temp file failed.
    #[error("I/O error writing {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// The body ended before `Content-Length` bytes arrived.
    #[error("Incomplete download: received {downloaded} of {total} bytes")]
    ShortRead { downloaded: u64, total: u64 },

    /// The release has no asset with the expected extension.
    #[error("No asset matching extension '{extension}'")]
    NoMatchingAsset { extension: String },
}

impl DownloadError {
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Install
// =============================================================================

/// Errors from building or running the install command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InstallError {
    /// The downloaded file has an extension no installer handles.
    #[error("Unsupported installer type: {}", .file.display())]
    UnsupportedExtension { file: PathBuf },

    /// The user dismissed the password or UAC prompt.
    #[error("Elevation aborted by user")]
    ElevationAborted,

    /// The install command could not be started.
    #[error("Failed to start '{command}': {message}")]
    Spawn { command: String, message: String },

    /// The install command exited with a non-zero status.
    #[error("Installer exited with code {exit_code}\n{stdout}{stderr}")]
    Failed {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
}

// =============================================================================
// Relaunch
// =============================================================================

/// Errors after a successful install, before control passes to the new binary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelaunchError {
    /// The installer kept the downloaded file locked past the retry budget.
    #[error("Installer still holds {} after {attempts} attempts ({waited:?})", .path.display())]
    InstallerStillRunning {
        path: PathBuf,
        attempts: u32,
        waited: Duration,
    },

    /// The freshly installed executable is not where the locator looked.
    #[error("Installed executable not found at {}", .path.display())]
    ExecutableNotFound { path: PathBuf },

    /// Replacing the current process failed.
    #[error("Failed to launch {}: {message}", .path.display())]
    Exec { path: PathBuf, message: String },
}

// =============================================================================
// Completion bridge
// =============================================================================

/// Errors from the worker/UI hand-off.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// The worker exited without publishing a result (panic or runtime failure).
    #[error("Background worker exited without a result: {0}")]
    WorkerLost(String),

    /// The result was already handed to the UI thread.
    #[error("Background result already consumed")]
    Consumed,
}

// =============================================================================
// Aggregate
// =============================================================================

/// Any failure that ends an update cycle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpdateError {
    #[error(transparent)]
    Version(#[from] VersionParseError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Relaunch(#[from] RelaunchError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Result type for update operations.
pub type UpdateResult<T> = Result<T, UpdateError>;
