//! Install job and its result.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::InstallError;

/// A program invocation, kept as argv rather than a shell string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl InstallCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }
}

impl fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// How much privilege an install command needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elevation {
    /// Run as the current user.
    None,
    /// Run with administrator rights where the platform has a way to ask
    /// for them without a password (UAC on Windows).
    Administrator,
    /// Run through `sudo`, which needs the user's password.
    SudoPassword,
}

impl Elevation {
    pub const fn needs_password(self) -> bool {
        matches!(self, Self::SudoPassword)
    }
}

/// A password that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Answer to a request for the `sudo` password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordReply {
    Entered(Secret),
    /// The user closed the dialog; the install is abandoned.
    Dismissed,
    /// Nobody can answer. The command runs unprivileged, which works when
    /// the process already has the rights it needs.
    Unavailable,
}

/// A fully prepared install step. Built once per downloaded file and run once.
#[derive(Debug)]
pub struct InstallJob {
    /// Command to run, already wrapped for elevation.
    pub command: InstallCommand,
    pub elevation: Elevation,
    /// Written to the child's stdin for `sudo -S`.
    pub password: Option<Secret>,
    /// The downloaded installer or archive.
    pub download_file: PathBuf,
}

impl InstallJob {
    pub fn download_file(&self) -> &Path {
        &self.download_file
    }
}

/// Exit status and captured output of an install command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl InstallResult {
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Convert a non-zero exit into [`InstallError::Failed`], keeping the
    /// captured output verbatim.
    pub fn into_checked(self) -> Result<Self, InstallError> {
        if self.success() {
            Ok(self)
        } else {
            Err(InstallError::Failed {
                exit_code: self.exit_code,
                stdout: self.stdout,
                stderr: self.stderr,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display_quotes_spaces() {
        let cmd = InstallCommand::new("tar")
            .args(["-xzvf", "/tmp/mrv2 v1.0.tar.gz", "-C"])
            .arg("/home/user");
        assert_eq!(
            cmd.to_string(),
            "tar -xzvf \"/tmp/mrv2 v1.0.tar.gz\" -C /home/user"
        );
    }

    #[test]
    fn test_secret_is_redacted() {
        let secret = Secret::new("hunter2");
        assert_eq!(format!("{secret:?}"), "Secret(***)");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_password_reply_debug_keeps_secret_redacted() {
        let reply = PasswordReply::Entered(Secret::new("hunter2"));
        assert_eq!(format!("{reply:?}"), "Entered(Secret(***))");
    }

    #[test]
    fn test_non_zero_exit_becomes_error() {
        let ok = InstallResult {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(ok.into_checked().is_ok());

        let failed = InstallResult {
            exit_code: 2,
            stdout: "out".to_string(),
            stderr: "err".to_string(),
        };
        assert_eq!(
            failed.into_checked().unwrap_err(),
            InstallError::Failed {
                exit_code: 2,
                stdout: "out".to_string(),
                stderr: "err".to_string(),
            }
        );
    }
}
