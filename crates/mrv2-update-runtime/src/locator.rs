//! Where a freshly installed mrv2 lives.
//!
//! Each platform has an ordered list of candidates. They are evaluated
//! lazily; the first one that exists wins, otherwise the last one is
//! returned so callers always get a concrete path to report.

use std::path::{Path, PathBuf};

use mrv2_update_core::Version;
use mrv2_update_core::ports::ExecutableResolver;
use tracing::debug;

use crate::probe::{FsProbe, PathProbe, RegistryReader, Win32Registry};

/// Open command registered by the Windows installer, under `HKEY_CLASSES_ROOT`.
pub const WINDOWS_OPEN_COMMAND_KEY: &str = r"Applications\mrv2.exe\shell\Open\command";

const PROGRAM_FILES: &str = "C:/Program Files";
const MACOS_BUNDLE_EXE: &str = "/Applications/mrv2.app/Contents/MacOS/mrv2";

enum Layout {
    Windows { registry: Box<dyn RegistryReader> },
    Linux { home: Option<PathBuf> },
    MacOs,
}

/// [`ExecutableResolver`] for the conventional mrv2 install locations.
pub struct ExecutableLocator {
    layout: Layout,
    probe: Box<dyn PathProbe>,
}

impl ExecutableLocator {
    pub fn windows(probe: Box<dyn PathProbe>, registry: Box<dyn RegistryReader>) -> Self {
        Self {
            layout: Layout::Windows { registry },
            probe,
        }
    }

    /// `home` is where the portable tarball is unpacked.
    pub fn linux(probe: Box<dyn PathProbe>, home: Option<PathBuf>) -> Self {
        Self {
            layout: Layout::Linux { home },
            probe,
        }
    }

    pub fn macos(probe: Box<dyn PathProbe>) -> Self {
        Self {
            layout: Layout::MacOs,
            probe,
        }
    }

    pub fn system_windows() -> Self {
        Self::windows(Box::new(FsProbe), Box::new(Win32Registry))
    }

    pub fn system_linux() -> Self {
        Self::linux(Box::new(FsProbe), dirs::home_dir())
    }

    pub fn system_macos() -> Self {
        Self::macos(Box::new(FsProbe))
    }

    /// Candidates in priority order. The registry is only read when the
    /// iterator reaches it.
    fn candidates(&self, version: Version) -> Box<dyn Iterator<Item = PathBuf> + '_> {
        match &self.layout {
            Layout::Windows { registry } => {
                let registered = std::iter::once_with(move || {
                    registry
                        .default_value(WINDOWS_OPEN_COMMAND_KEY)
                        .and_then(|value| open_command_path(&value))
                })
                .flatten();
                let installed = [
                    "mrv2".to_string(),
                    format!("mrv2-v{version}"),
                    format!("mrv2 v{version}"),
                    format!("mrv2 {version}"),
                ]
                .into_iter()
                .map(|dir| Path::new(PROGRAM_FILES).join(dir).join("bin").join("mrv2.exe"));
                Box::new(registered.chain(installed))
            }
            Layout::Linux { home } => {
                let dir = format!("mrv2-v{version}-Linux-64");
                let system = Path::new("/usr/local").join(&dir);
                let user = home.as_ref().map(|home| home.join(&dir));
                Box::new(
                    std::iter::once(system)
                        .chain(user)
                        .map(|root| root.join("bin").join("mrv2.sh")),
                )
            }
            Layout::MacOs => Box::new(std::iter::once(PathBuf::from(MACOS_BUNDLE_EXE))),
        }
    }
}

impl ExecutableResolver for ExecutableLocator {
    fn locate(&self, version: Version) -> PathBuf {
        let mut last = PathBuf::new();
        for candidate in self.candidates(version) {
            if self.probe.exists(&candidate) {
                debug!(path = %candidate.display(), "installed executable candidate found");
                return candidate;
            }
            debug!(path = %candidate.display(), "candidate missing");
            last = candidate;
        }
        last
    }
}

/// Executable path from a registered open command such as
/// `"C:\Program Files\mrv2\bin\mrv2.exe" "%1"`.
pub fn open_command_path(command: &str) -> Option<PathBuf> {
    let command = command.trim();
    let exe = command.strip_suffix("\"%1\"").unwrap_or(command).trim_end();
    let exe = exe
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(exe);
    if exe.is_empty() {
        return None;
    }
    Some(PathBuf::from(exe.replace('\\', "/")))
}
