//! Hands control to the newly installed executable.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use mrv2_update_core::RelaunchError;
use mrv2_update_core::ports::ProcessReplacer;
use tracing::info;

/// [`ProcessReplacer`] for the running process.
///
/// Unix replaces the process image with `exec`. Windows has no `exec`, so
/// the new executable is spawned and this process exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecReplacer;

impl ProcessReplacer for ExecReplacer {
    fn replace(&self, executable: &Path, args: &[OsString]) -> Result<(), RelaunchError> {
        if !executable.is_file() {
            return Err(RelaunchError::ExecutableNotFound {
                path: executable.to_path_buf(),
            });
        }
        info!(path = %executable.display(), args = args.len(), "relaunching mrv2");
        replace_process(executable, args)
    }
}

#[cfg(unix)]
fn replace_process(executable: &Path, args: &[OsString]) -> Result<(), RelaunchError> {
    use std::os::unix::process::CommandExt;

    // exec only returns on failure.
    let err = Command::new(executable).args(args).exec();
    Err(RelaunchError::Exec {
        path: executable.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(not(unix))]
fn replace_process(executable: &Path, args: &[OsString]) -> Result<(), RelaunchError> {
    Command::new(executable)
        .args(args)
        .spawn()
        .map_err(|e| RelaunchError::Exec {
            path: executable.to_path_buf(),
            message: e.to_string(),
        })?;
    std::process::exit(0)
}
