use std::path::{Path, PathBuf};

use mrv2_update_core::ports::ExecutableResolver;
use mrv2_update_core::{
    Elevation, InstallCommand, InstallError, PackageManager, PlatformStrategy, PlatformTarget,
    Secret, Version,
};

use super::{InstallPaths, classify, detect_package_manager, install_command_for};
use crate::locator::ExecutableLocator;
use crate::probe::WhichProbe;

/// Linux: `.deb`/`.rpm` through `sudo`, tarball into the home directory.
pub struct LinuxPlatform {
    package_manager: PackageManager,
    paths: InstallPaths,
    locator: Box<dyn ExecutableResolver>,
}

impl LinuxPlatform {
    pub fn new(
        package_manager: PackageManager,
        paths: InstallPaths,
        locator: Box<dyn ExecutableResolver>,
    ) -> Self {
        Self {
            package_manager,
            paths,
            locator,
        }
    }

    /// Probe `PATH` for the package manager and use the real filesystem.
    pub fn system(app_root: PathBuf) -> Self {
        Self::new(
            detect_package_manager(&WhichProbe),
            InstallPaths::for_user(app_root),
            Box::new(ExecutableLocator::system_linux()),
        )
    }

    pub const fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
}

impl PlatformStrategy for LinuxPlatform {
    fn target(&self) -> PlatformTarget {
        PlatformTarget::Linux
    }

    fn extension(&self) -> &str {
        self.package_manager.asset_suffix()
    }

    fn install_command(&self, file: &Path) -> Result<InstallCommand, InstallError> {
        Ok(install_command_for(classify(file)?, file, &self.paths))
    }

    fn needs_elevation(&self, file: &Path) -> Result<Elevation, InstallError> {
        Ok(classify(file)?.elevation())
    }

    /// `sudo -S` reads the password from stdin; the prompt is silenced so it
    /// does not end up in the captured output. Without a password the
    /// command runs unprivileged.
    fn wrap_elevated(
        &self,
        command: InstallCommand,
        elevation: Elevation,
        password: Option<&Secret>,
    ) -> InstallCommand {
        if elevation.needs_password() && password.is_some() {
            InstallCommand::new("sudo")
                .args(["-S", "-p", ""])
                .arg(command.program)
                .args(command.args)
        } else {
            command
        }
    }

    fn locate_executable(&self, version: Version) -> PathBuf {
        self.locator.locate(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLocator;

    impl ExecutableResolver for FixedLocator {
        fn locate(&self, version: Version) -> PathBuf {
            PathBuf::from(format!("/usr/local/mrv2-v{version}-Linux-64/bin/mrv2.sh"))
        }
    }

    fn platform(manager: PackageManager) -> LinuxPlatform {
        LinuxPlatform::new(
            manager,
            InstallPaths::new("/home/ana", "/opt/mrv2"),
            Box::new(FixedLocator),
        )
    }

    #[test]
    fn test_extension_follows_package_manager() {
        assert_eq!(platform(PackageManager::Dpkg).extension(), ".deb");
        assert_eq!(platform(PackageManager::Rpm).extension(), ".rpm");
        assert_eq!(platform(PackageManager::Pacman).extension(), ".tar.gz");
    }

    #[test]
    fn test_deb_job_runs_through_sudo_with_password_on_stdin() {
        let job = platform(PackageManager::Dpkg)
            .build_job(Path::new("/tmp/mrv2.deb"), Some(Secret::new("pw")))
            .unwrap();
        assert_eq!(job.command.to_string(), "sudo -S -p \"\" dpkg -i /tmp/mrv2.deb");
        assert_eq!(job.elevation, Elevation::SudoPassword);
        assert_eq!(job.password.as_ref().map(Secret::expose), Some("pw"));
        assert!(!job.command.to_string().contains("pw "));
    }

    #[test]
    fn test_deb_without_password_runs_unprivileged() {
        let job = platform(PackageManager::Dpkg)
            .build_job(Path::new("/tmp/mrv2.deb"), None)
            .unwrap();
        assert_eq!(job.command.to_string(), "dpkg -i /tmp/mrv2.deb");
    }

    #[test]
    fn test_tarball_unpacks_into_home_without_sudo() {
        let job = platform(PackageManager::Unknown)
            .build_job(Path::new("/tmp/mrv2.tar.gz"), Some(Secret::new("ignored")))
            .unwrap();
        assert_eq!(job.command.to_string(), "tar -xzvf /tmp/mrv2.tar.gz -C /home/ana");
        assert!(job.password.is_none());
    }

    #[test]
    fn test_locate_delegates_to_resolver() {
        assert_eq!(
            platform(PackageManager::Rpm).locate_executable(Version::new(1, 0, 2)),
            PathBuf::from("/usr/local/mrv2-v1.0.2-Linux-64/bin/mrv2.sh")
        );
        assert!(!platform(PackageManager::Rpm).installer_holds_download());
    }
}
