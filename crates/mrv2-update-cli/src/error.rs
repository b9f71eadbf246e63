//! CLI errors and exit codes.

use mrv2_update_core::{DownloadError, FetchError, UpdateError};
use mrv2_update_github::GithubError;
use mrv2_update_runtime::RuntimeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Anything without a more specific category.
    #[error("{0}")]
    Core(String),

    #[error("Invalid arguments: {0}")]
    Arguments(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The release feed had nothing usable.
    #[error("{0}")]
    Unavailable(String),

    /// Network trouble that may go away on retry.
    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(String),

    /// The installer or relaunch failed.
    #[error("{0}")]
    Process(String),
}

impl CliError {
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Process(_) => 71,     // EX_OSERR
            Self::Io(_) => 74,          // EX_IOERR
            Self::Network(_) => 75,     // EX_TEMPFAIL
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<UpdateError> for CliError {
    fn from(err: UpdateError) -> Self {
        let message = err.to_string();
        match err {
            UpdateError::Fetch(FetchError::Network { .. })
            | UpdateError::Download(DownloadError::Network { .. } | DownloadError::ShortRead { .. }) => {
                Self::Network(message)
            }
            UpdateError::Fetch(_) | UpdateError::Version(_) => Self::Unavailable(message),
            UpdateError::Download(_) => Self::Io(message),
            UpdateError::Install(_) | UpdateError::Relaunch(_) => Self::Process(message),
            UpdateError::Bridge(_) => Self::Core(message),
        }
    }
}

impl From<GithubError> for CliError {
    fn from(err: GithubError) -> Self {
        Self::Config(format!("GitHub client: {err}"))
    }
}

impl From<DownloadError> for CliError {
    fn from(err: DownloadError) -> Self {
        Self::Config(format!("downloader: {err}"))
    }
}

impl From<RuntimeError> for CliError {
    fn from(err: RuntimeError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Core(err.to_string())
    }
}
