//! Platform abstraction.
//!
//! Every OS-specific decision of the updater (which asset to pick, how to
//! install it, how to elevate, where the installed binary lives) sits behind
//! [`PlatformStrategy`]. Implementations live in `mrv2-update-runtime`.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{Elevation, InstallCommand, InstallJob, Secret, Version};
use crate::error::InstallError;

/// Operating systems mrv2 ships installers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformTarget {
    Windows,
    Linux,
    MacOs,
}

impl PlatformTarget {
    /// The platform this binary was compiled for, if supported.
    pub const fn current() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Self::Windows)
        } else if cfg!(target_os = "linux") {
            Some(Self::Linux)
        } else if cfg!(target_os = "macos") {
            Some(Self::MacOs)
        } else {
            None
        }
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::MacOs => "macOS",
        })
    }
}

/// Linux package managers, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Dpkg,
    Rpm,
    Pacman,
    /// None of the above; the portable tarball is used.
    Unknown,
}

impl PackageManager {
    /// Detection order.
    pub const PROBE_ORDER: [Self; 3] = [Self::Dpkg, Self::Rpm, Self::Pacman];

    /// Executable probed on `PATH` to detect this manager.
    pub const fn binary(self) -> Option<&'static str> {
        match self {
            Self::Dpkg => Some("dpkg"),
            Self::Rpm => Some("rpm"),
            Self::Pacman => Some("pacman"),
            Self::Unknown => None,
        }
    }

    /// Asset suffix to download for this manager.
    ///
    /// Arch has no native mrv2 package, so pacman systems get the tarball.
    pub const fn asset_suffix(self) -> &'static str {
        match self {
            Self::Dpkg => ".deb",
            Self::Rpm => ".rpm",
            Self::Pacman | Self::Unknown => ".tar.gz",
        }
    }
}

/// Installer formats, identified by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerKind {
    Exe,
    Rpm,
    Deb,
    TarGz,
    Dmg,
}

impl InstallerKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".exe") {
            Some(Self::Exe)
        } else if name.ends_with(".rpm") {
            Some(Self::Rpm)
        } else if name.ends_with(".deb") {
            Some(Self::Deb)
        } else if name.ends_with(".tar.gz") {
            Some(Self::TarGz)
        } else if name.ends_with(".dmg") {
            Some(Self::Dmg)
        } else {
            None
        }
    }

    /// Privilege the installer needs before platform wrapping.
    pub const fn elevation(self) -> Elevation {
        match self {
            Self::Rpm | Self::Deb => Elevation::SudoPassword,
            Self::Exe | Self::TarGz | Self::Dmg => Elevation::Administrator,
        }
    }
}

/// One implementation per OS.
pub trait PlatformStrategy: Send + Sync {
    fn target(&self) -> PlatformTarget;

    /// Suffix the release asset name must end with.
    fn extension(&self) -> &str;

    /// Unwrapped install command for a downloaded file.
    fn install_command(&self, file: &Path) -> Result<InstallCommand, InstallError>;

    /// Privilege needed to install `file` on this platform.
    fn needs_elevation(&self, file: &Path) -> Result<Elevation, InstallError>;

    /// Wrap `command` so it runs with the requested privilege.
    fn wrap_elevated(
        &self,
        command: InstallCommand,
        elevation: Elevation,
        password: Option<&Secret>,
    ) -> InstallCommand;

    /// Best-effort path of the installed executable for `version`.
    fn locate_executable(&self, version: Version) -> PathBuf;

    /// Whether the installer runs detached and keeps the download locked
    /// after the launching command returns.
    fn installer_holds_download(&self) -> bool {
        false
    }

    /// Build the job for `file`. The password is only kept when the
    /// elevation actually consumes it.
    fn build_job(&self, file: &Path, password: Option<Secret>) -> Result<InstallJob, InstallError> {
        let elevation = self.needs_elevation(file)?;
        let password = password.filter(|_| elevation.needs_password());
        let command =
            self.wrap_elevated(self.install_command(file)?, elevation, password.as_ref());
        Ok(InstallJob {
            command,
            elevation,
            password,
            download_file: file.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installer_kind_from_path() {
        let kind = |p: &str| InstallerKind::from_path(Path::new(p));
        assert_eq!(kind("/tmp/mrv2-v1.0.0-amd64.deb"), Some(InstallerKind::Deb));
        assert_eq!(kind("/tmp/mrv2-v1.0.0.x86_64.rpm"), Some(InstallerKind::Rpm));
        assert_eq!(kind("/tmp/mrv2-v1.0.0-Linux-amd64.tar.gz"), Some(InstallerKind::TarGz));
        assert_eq!(kind("C:/Temp/mrv2-v1.0.0-amd64.EXE"), Some(InstallerKind::Exe));
        assert_eq!(kind("/tmp/mrv2-v1.0.0-arm64.dmg"), Some(InstallerKind::Dmg));
        assert_eq!(kind("/tmp/mrv2-v1.0.0.zip"), None);
        assert_eq!(kind("/tmp/archive.gz"), None);
    }

    #[test]
    fn test_package_manager_suffixes() {
        assert_eq!(PackageManager::Dpkg.asset_suffix(), ".deb");
        assert_eq!(PackageManager::Rpm.asset_suffix(), ".rpm");
        assert_eq!(PackageManager::Pacman.asset_suffix(), ".tar.gz");
        assert_eq!(PackageManager::Unknown.asset_suffix(), ".tar.gz");
    }

    #[test]
    fn test_only_packages_need_password() {
        assert!(InstallerKind::Deb.elevation().needs_password());
        assert!(InstallerKind::Rpm.elevation().needs_password());
        assert!(!InstallerKind::TarGz.elevation().needs_password());
        assert!(!InstallerKind::Exe.elevation().needs_password());
    }
}
