//! Process replacement and session hand-off ports.

use std::ffi::OsString;
use std::path::Path;

use crate::error::RelaunchError;

/// Replaces the running process with the freshly installed executable.
///
/// On success the real implementation does not return: the process image is
/// gone. Test doubles return `Ok(())` so the orchestrator can reach `Done`.
pub trait ProcessReplacer: Send + Sync {
    fn replace(&self, executable: &Path, args: &[OsString]) -> Result<(), RelaunchError>;
}

/// Lets the host persist its open session so the new process can restore it.
pub trait SessionStore: Send + Sync {
    /// Save the session to `path`. Returns `false` when nothing was saved.
    fn save(&self, path: &Path) -> bool;
}

/// Host without sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionStore;

impl SessionStore for NoopSessionStore {
    fn save(&self, _path: &Path) -> bool {
        false
    }
}
