//! Runtime errors.

use thiserror::Error;

/// Failures of OS probing that are not part of an update cycle.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// mrv2 publishes no installers for this OS.
    #[error("Unsupported platform: {os}")]
    UnsupportedPlatform { os: &'static str },

    /// The registry API returned an error other than a missing key.
    #[error("Registry query for '{key}' failed: {message}")]
    Registry { key: String, message: String },
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
