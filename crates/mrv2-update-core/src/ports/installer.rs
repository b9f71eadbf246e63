//! Install execution port.

use async_trait::async_trait;

use crate::domain::{InstallJob, InstallResult};
use crate::error::InstallError;

/// Runs a prepared [`InstallJob`] as a child process.
///
/// A non-zero exit is still `Ok`; the caller decides what it means.
/// `Err` is reserved for commands that could not be started at all.
#[async_trait]
pub trait InstallRunner: Send + Sync {
    async fn run(&self, job: &InstallJob) -> Result<InstallResult, InstallError>;
}
