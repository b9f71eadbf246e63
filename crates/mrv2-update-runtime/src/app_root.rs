//! Location of the running mrv2 installation.

use std::path::PathBuf;

use tracing::debug;

/// Overrides the detected installation root.
pub const APP_ROOT_ENV: &str = "MRV2_ROOT";

/// Installation root of the running mrv2.
///
/// An explicit root (flag or `MRV2_ROOT`) wins. Otherwise the executable is
/// assumed to sit in `<root>/bin/`, so the root is two levels above it.
pub fn resolve_app_root(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(root) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return root;
    }
    let root = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent()?.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    debug!(root = %root.display(), "application root from executable path");
    root
}
