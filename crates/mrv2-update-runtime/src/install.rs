//! Runs install jobs as child processes.

use std::process::Stdio;

use async_trait::async_trait;
use mrv2_update_core::ports::InstallRunner;
use mrv2_update_core::{InstallError, InstallJob, InstallResult};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// [`InstallRunner`] on `tokio::process`.
///
/// When the job carries a password it is written to the child's stdin
/// followed by a newline, which is what `sudo -S` expects.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioInstallRunner;

impl TokioInstallRunner {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InstallRunner for TokioInstallRunner {
    async fn run(&self, job: &InstallJob) -> Result<InstallResult, InstallError> {
        let command_display = job.command.to_string();
        let spawn_error = |e: std::io::Error| InstallError::Spawn {
            command: command_display.clone(),
            message: e.to_string(),
        };

        let mut cmd = Command::new(&job.command.program);
        cmd.args(&job.command.args)
            .stdin(if job.password.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(command = %command_display, "spawning installer");
        let mut child = cmd.spawn().map_err(spawn_error)?;

        if let Some(password) = &job.password {
            if let Some(mut stdin) = child.stdin.take() {
                let line = format!("{}\n", password.expose());
                // sudo may exit before reading, e.g. when credentials are cached.
                if let Err(e) = stdin.write_all(line.as_bytes()).await {
                    warn!(error = %e, "could not pass password to installer");
                }
            }
        }

        let output = child.wait_with_output().await.map_err(spawn_error)?;
        let result = InstallResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(exit_code = result.exit_code, "installer exited");
        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use mrv2_update_core::{Elevation, InstallCommand, Secret};
    use std::path::PathBuf;

    fn job(command: InstallCommand, password: Option<Secret>) -> InstallJob {
        InstallJob {
            command,
            elevation: Elevation::None,
            password,
            download_file: PathBuf::from("/tmp/unused.deb"),
        }
    }

    #[tokio::test]
    async fn test_captures_output_and_exit_code() {
        let result = TokioInstallRunner
            .run(&job(
                InstallCommand::new("sh").args(["-c", "echo installed; echo warn >&2; exit 3"]),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.stdout, "installed\n");
        assert_eq!(result.stderr, "warn\n");
        assert!(!result.success());
    }

    #[tokio::test]
    async fn test_password_is_written_to_stdin() {
        let result = TokioInstallRunner
            .run(&job(
                InstallCommand::new("sh").args(["-c", "read pw; test \"$pw\" = s3cret && echo ok"]),
                Some(Secret::new("s3cret")),
            ))
            .await
            .unwrap();
        assert!(result.success(), "stderr: {}", result.stderr);
        assert_eq!(result.stdout, "ok\n");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = TokioInstallRunner
            .run(&job(InstallCommand::new("/nonexistent/mrv2-installer"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, InstallError::Spawn { ref command, .. } if command == "/nonexistent/mrv2-installer"));
    }
}
