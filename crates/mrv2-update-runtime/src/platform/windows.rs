use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use mrv2_update_core::ports::ExecutableResolver;
use mrv2_update_core::{
    Elevation, InstallCommand, InstallError, PlatformStrategy, PlatformTarget, Secret, Version,
};

use super::{InstallPaths, classify, install_command_for};
use crate::locator::ExecutableLocator;

/// Windows: the NSIS installer runs detached under UAC.
pub struct WindowsPlatform {
    paths: InstallPaths,
    locator: Box<dyn ExecutableResolver>,
}

impl WindowsPlatform {
    pub fn new(paths: InstallPaths, locator: Box<dyn ExecutableResolver>) -> Self {
        Self { paths, locator }
    }

    pub fn system(app_root: PathBuf) -> Self {
        Self::new(
            InstallPaths::for_user(app_root),
            Box::new(ExecutableLocator::system_windows()),
        )
    }
}

/// Single-quoted PowerShell literal.
fn ps_literal(value: &OsStr) -> String {
    format!("'{}'", value.to_string_lossy().replace('\'', "''"))
}

impl PlatformStrategy for WindowsPlatform {
    fn target(&self) -> PlatformTarget {
        PlatformTarget::Windows
    }

    fn extension(&self) -> &str {
        ".exe"
    }

    fn install_command(&self, file: &Path) -> Result<InstallCommand, InstallError> {
        Ok(install_command_for(classify(file)?, file, &self.paths))
    }

    fn needs_elevation(&self, file: &Path) -> Result<Elevation, InstallError> {
        classify(file).map(|_| Elevation::Administrator)
    }

    /// `Start-Process -Verb RunAs` raises the UAC dialog and returns as soon
    /// as the installer is launched.
    fn wrap_elevated(
        &self,
        command: InstallCommand,
        elevation: Elevation,
        _password: Option<&Secret>,
    ) -> InstallCommand {
        if elevation == Elevation::None {
            return command;
        }
        let mut script = format!("Start-Process -FilePath {}", ps_literal(&command.program));
        if !command.args.is_empty() {
            let list: Vec<String> = command.args.iter().map(|a| ps_literal(a)).collect();
            script.push_str(" -ArgumentList ");
            script.push_str(&list.join(","));
        }
        script.push_str(" -Verb RunAs");
        InstallCommand::new("powershell").args(["-NoProfile", "-Command"]).arg(script)
    }

    fn locate_executable(&self, version: Version) -> PathBuf {
        self.locator.locate(version)
    }

    fn installer_holds_download(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ProgramFiles;

    impl ExecutableResolver for ProgramFiles {
        fn locate(&self, _version: Version) -> PathBuf {
            PathBuf::from("C:/Program Files/mrv2/bin/mrv2.exe")
        }
    }

    fn platform() -> WindowsPlatform {
        WindowsPlatform::new(
            InstallPaths::new("C:/Users/ana", "C:/Program Files/mrv2"),
            Box::new(ProgramFiles),
        )
    }

    #[test]
    fn test_exe_runs_under_uac() {
        let job = platform()
            .build_job(Path::new("C:/Temp/mrv2-v1.3.0-amd64.exe"), None)
            .unwrap();
        assert_eq!(job.elevation, Elevation::Administrator);
        assert_eq!(job.command.program(), OsStr::new("powershell"));
        assert_eq!(
            job.command.args.last().map(|a| a.to_string_lossy().into_owned()),
            Some("Start-Process -FilePath 'C:/Temp/mrv2-v1.3.0-amd64.exe' -Verb RunAs".to_string())
        );
        assert!(job.password.is_none());
    }

    #[test]
    fn test_quotes_in_paths_are_escaped() {
        let cmd = platform().wrap_elevated(
            InstallCommand::new("C:/Users/o'neil/mrv2.exe").arg("/S"),
            Elevation::Administrator,
            None,
        );
        assert_eq!(
            cmd.args.last().map(|a| a.to_string_lossy().into_owned()),
            Some(
                "Start-Process -FilePath 'C:/Users/o''neil/mrv2.exe' -ArgumentList '/S' -Verb RunAs"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_installer_keeps_download_locked() {
        assert!(platform().installer_holds_download());
        assert_eq!(platform().extension(), ".exe");
    }

    #[test]
    fn test_unsupported_file_is_rejected() {
        assert!(matches!(
            platform().needs_elevation(Path::new("C:/Temp/mrv2.msi")),
            Err(InstallError::UnsupportedExtension { .. })
        ));
    }
}
