use std::path::{Path, PathBuf};

use mrv2_update_core::ports::ExecutableResolver;
use mrv2_update_core::{
    Elevation, InstallCommand, InstallError, PlatformStrategy, PlatformTarget, Secret, Version,
};

use super::{InstallPaths, classify, install_command_for};
use crate::locator::ExecutableLocator;

/// CPU families with separate disk images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacArch {
    Intel,
    AppleSilicon,
}

impl MacArch {
    pub const fn current() -> Self {
        if cfg!(target_arch = "aarch64") {
            Self::AppleSilicon
        } else {
            Self::Intel
        }
    }

    pub const fn asset_suffix(self) -> &'static str {
        match self {
            Self::Intel => "amd64.dmg",
            Self::AppleSilicon => "arm64.dmg",
        }
    }
}

/// macOS: the bundled `install_dmg.sh` copies the app out of the image and
/// asks for credentials itself.
pub struct MacPlatform {
    arch: MacArch,
    paths: InstallPaths,
    locator: Box<dyn ExecutableResolver>,
}

impl MacPlatform {
    pub fn new(arch: MacArch, paths: InstallPaths, locator: Box<dyn ExecutableResolver>) -> Self {
        Self {
            arch,
            paths,
            locator,
        }
    }

    pub fn system(app_root: PathBuf) -> Self {
        Self::new(
            MacArch::current(),
            InstallPaths::for_user(app_root),
            Box::new(ExecutableLocator::system_macos()),
        )
    }
}

impl PlatformStrategy for MacPlatform {
    fn target(&self) -> PlatformTarget {
        PlatformTarget::MacOs
    }

    fn extension(&self) -> &str {
        self.arch.asset_suffix()
    }

    fn install_command(&self, file: &Path) -> Result<InstallCommand, InstallError> {
        Ok(install_command_for(classify(file)?, file, &self.paths))
    }

    fn needs_elevation(&self, file: &Path) -> Result<Elevation, InstallError> {
        Ok(classify(file)?.elevation())
    }

    fn wrap_elevated(
        &self,
        command: InstallCommand,
        _elevation: Elevation,
        _password: Option<&Secret>,
    ) -> InstallCommand {
        command
    }

    fn locate_executable(&self, version: Version) -> PathBuf {
        self.locator.locate(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bundle;

    impl ExecutableResolver for Bundle {
        fn locate(&self, _version: Version) -> PathBuf {
            PathBuf::from("/Applications/mrv2.app/Contents/MacOS/mrv2")
        }
    }

    fn platform(arch: MacArch) -> MacPlatform {
        MacPlatform::new(
            arch,
            InstallPaths::new("/Users/ana", "/Applications/mrv2.app/Contents/Resources"),
            Box::new(Bundle),
        )
    }

    #[test]
    fn test_arch_specific_suffix() {
        assert_eq!(platform(MacArch::Intel).extension(), "amd64.dmg");
        assert_eq!(platform(MacArch::AppleSilicon).extension(), "arm64.dmg");
    }

    #[test]
    fn test_dmg_runs_bundled_script_directly() {
        let job = platform(MacArch::AppleSilicon)
            .build_job(Path::new("/tmp/mrv2-v1.3.0-arm64.dmg"), None)
            .unwrap();
        assert_eq!(
            job.command.to_string(),
            "/Applications/mrv2.app/Contents/Resources/bin/install_dmg.sh /tmp/mrv2-v1.3.0-arm64.dmg"
        );
        assert!(!job.elevation.needs_password());
    }
}
