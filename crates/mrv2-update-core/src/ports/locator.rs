//! Installed-executable lookup port.

use std::path::PathBuf;

use crate::domain::Version;

/// Resolves where a given mrv2 version ends up after installation.
///
/// Best-effort: the returned path is not guaranteed to exist.
pub trait ExecutableResolver: Send + Sync {
    fn locate(&self, version: Version) -> PathBuf;
}
