//! OS-facing side of the mrv2 self-updater.
//!
//! Platform strategies (asset suffix, install command, elevation, installed
//! executable lookup), the child-process install runner and the process
//! replacement used to relaunch mrv2.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod app_root;
mod error;
pub mod install;
pub mod locator;
pub mod platform;
pub mod probe;
pub mod relaunch;

pub use app_root::{APP_ROOT_ENV, resolve_app_root};
pub use error::{RuntimeError, RuntimeResult};
pub use install::TokioInstallRunner;
pub use locator::ExecutableLocator;
pub use platform::{
    InstallPaths, LinuxPlatform, MacArch, MacPlatform, WindowsPlatform, current_platform,
    detect_package_manager, install_command_for, platform_for,
};
pub use relaunch::ExecReplacer;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
