//! [`PlatformStrategy`] implementations.

mod linux;
mod macos;
mod windows;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mrv2_update_core::{InstallCommand, InstallError, InstallerKind, PackageManager, PlatformStrategy, PlatformTarget};
use tracing::debug;

use crate::error::{RuntimeError, RuntimeResult};
use crate::probe::PackageProbe;

pub use linux::LinuxPlatform;
pub use macos::{MacArch, MacPlatform};
pub use windows::WindowsPlatform;

/// Directories the install commands refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    /// Unpack target of the portable tarball.
    pub home: PathBuf,
    /// Root of the running installation; holds `bin/install_dmg.sh`.
    pub app_root: PathBuf,
}

impl InstallPaths {
    pub fn new(home: impl Into<PathBuf>, app_root: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            app_root: app_root.into(),
        }
    }

    /// Current user's home, falling back to the working directory.
    pub fn for_user(app_root: impl Into<PathBuf>) -> Self {
        Self::new(
            dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            app_root,
        )
    }
}

/// Installer kind of `file`, or `UnsupportedExtension`.
pub(crate) fn classify(file: &Path) -> Result<InstallerKind, InstallError> {
    InstallerKind::from_path(file).ok_or_else(|| InstallError::UnsupportedExtension {
        file: file.to_path_buf(),
    })
}

/// Unwrapped command that installs `file`.
pub fn install_command_for(kind: InstallerKind, file: &Path, paths: &InstallPaths) -> InstallCommand {
    match kind {
        InstallerKind::Exe => InstallCommand::new(file),
        InstallerKind::Rpm => InstallCommand::new("rpm").args(["-i", "--force"]).arg(file),
        InstallerKind::Deb => InstallCommand::new("dpkg").arg("-i").arg(file),
        InstallerKind::TarGz => InstallCommand::new("tar")
            .arg("-xzvf")
            .arg(file)
            .arg("-C")
            .arg(&paths.home),
        InstallerKind::Dmg => {
            InstallCommand::new(paths.app_root.join("bin").join("install_dmg.sh")).arg(file)
        }
    }
}

/// First package manager found on `PATH`, in [`PackageManager::PROBE_ORDER`].
pub fn detect_package_manager(probe: &dyn PackageProbe) -> PackageManager {
    let found = PackageManager::PROBE_ORDER
        .into_iter()
        .find(|manager| manager.binary().is_some_and(|bin| probe.has_program(bin)))
        .unwrap_or(PackageManager::Unknown);
    debug!(manager = ?found, "package manager detected");
    found
}

/// Strategy for `target` with system probes.
pub fn platform_for(target: PlatformTarget, app_root: PathBuf) -> Arc<dyn PlatformStrategy> {
    match target {
        PlatformTarget::Windows => Arc::new(WindowsPlatform::system(app_root)),
        PlatformTarget::Linux => Arc::new(LinuxPlatform::system(app_root)),
        PlatformTarget::MacOs => Arc::new(MacPlatform::system(app_root)),
    }
}

/// Strategy for the OS this binary runs on.
pub fn current_platform(app_root: PathBuf) -> RuntimeResult<Arc<dyn PlatformStrategy>> {
    let target = PlatformTarget::current().ok_or(RuntimeError::UnsupportedPlatform {
        os: std::env::consts::OS,
    })?;
    Ok(platform_for(target, app_root))
}
