//! Bounded wait for a detached installer to release the downloaded file.
//!
//! The Windows installer keeps its own executable open while it runs, so a
//! successful delete doubles as the signal that installation finished.

use std::io;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::UnlockPolicy;
use crate::error::RelaunchError;

/// Retry `remove(path)` under `policy` until it succeeds.
///
/// A file that is already gone counts as removed. Returns the number of
/// attempts used, or [`RelaunchError::InstallerStillRunning`] once the
/// attempt budget is spent.
pub fn wait_for_unlock<R, S>(
    path: &Path,
    policy: UnlockPolicy,
    mut remove: R,
    mut sleep: S,
) -> Result<u32, RelaunchError>
where
    R: FnMut(&Path) -> io::Result<()>,
    S: FnMut(Duration),
{
    let mut waited = Duration::ZERO;
    if !policy.initial_delay.is_zero() {
        sleep(policy.initial_delay);
        waited += policy.initial_delay;
    }

    for attempt in 1..=policy.max_attempts {
        match remove(path) {
            Ok(()) => {
                debug!(path = %path.display(), attempt, "installer released download");
                return Ok(attempt);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), attempt, "download already removed");
                return Ok(attempt);
            }
            Err(e) => {
                debug!(path = %path.display(), attempt, error = %e, "download still locked");
            }
        }
        if attempt < policy.max_attempts {
            sleep(policy.interval);
            waited += policy.interval;
        }
    }

    warn!(path = %path.display(), attempts = policy.max_attempts, ?waited, "installer never released download");
    Err(RelaunchError::InstallerStillRunning {
        path: path.to_path_buf(),
        attempts: policy.max_attempts,
        waited,
    })
}
