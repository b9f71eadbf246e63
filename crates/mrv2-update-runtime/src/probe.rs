//! Small OS probes behind traits so lookups can be tested off-platform.

use std::path::Path;

#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::error::{RuntimeError, RuntimeResult};

/// Filesystem existence check.
#[cfg_attr(test, automock)]
pub trait PathProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// [`PathProbe`] against the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Looks up a program on `PATH`.
#[cfg_attr(test, automock)]
pub trait PackageProbe: Send + Sync {
    fn has_program(&self, name: &str) -> bool;
}

/// [`PackageProbe`] backed by `which`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhichProbe;

impl PackageProbe for WhichProbe {
    fn has_program(&self, name: &str) -> bool {
        match which::which(name) {
            Ok(path) => {
                debug!(program = name, path = %path.display(), "found on PATH");
                true
            }
            Err(_) => false,
        }
    }
}

/// Reads the default value of a key under `HKEY_CLASSES_ROOT`.
#[cfg_attr(test, automock)]
pub trait RegistryReader: Send + Sync {
    /// `None` when the key is missing or unreadable.
    fn default_value(&self, subkey: &str) -> Option<String>;
}

/// [`RegistryReader`] backed by `RegGetValueW`.
///
/// Always `None` off Windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Registry;

impl RegistryReader for Win32Registry {
    fn default_value(&self, subkey: &str) -> Option<String> {
        match read_default_value(subkey) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "registry lookup failed");
                None
            }
        }
    }
}

#[cfg(windows)]
#[allow(unsafe_code)]
fn read_default_value(subkey: &str) -> RuntimeResult<Option<String>> {
    use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, WIN32_ERROR};
    use windows::Win32::System::Registry::{HKEY_CLASSES_ROOT, RRF_RT_REG_SZ, RegGetValueW};
    use windows::core::PCWSTR;

    let wide: Vec<u16> = subkey.encode_utf16().chain(std::iter::once(0)).collect();
    let check = |status: WIN32_ERROR| -> RuntimeResult<bool> {
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(false);
        }
        status.ok().map(|()| true).map_err(|e| RuntimeError::Registry {
            key: subkey.to_string(),
            message: e.to_string(),
        })
    };

    // REG_EXPAND_SZ values are expanded and reported as REG_SZ.
    let mut size: u32 = 0;
    // SAFETY: `wide` is NUL-terminated and outlives the call; only the
    // byte size is written back.
    let status = unsafe {
        RegGetValueW(
            HKEY_CLASSES_ROOT,
            PCWSTR(wide.as_ptr()),
            PCWSTR::null(),
            RRF_RT_REG_SZ,
            None,
            None,
            Some(&raw mut size),
        )
    };
    if !check(status)? {
        return Ok(None);
    }

    let mut buffer = vec![0u16; (size as usize).div_ceil(2)];
    // SAFETY: `buffer` holds `size` bytes, the length reported above.
    let status = unsafe {
        RegGetValueW(
            HKEY_CLASSES_ROOT,
            PCWSTR(wide.as_ptr()),
            PCWSTR::null(),
            RRF_RT_REG_SZ,
            None,
            Some(buffer.as_mut_ptr().cast()),
            Some(&raw mut size),
        )
    };
    if !check(status)? {
        return Ok(None);
    }
    buffer.truncate((size as usize) / 2);
    Ok(decode_registry_string(&buffer))
}

#[cfg(not(windows))]
const fn read_default_value(_subkey: &str) -> RuntimeResult<Option<String>> {
    Err(RuntimeError::UnsupportedPlatform {
        os: std::env::consts::OS,
    })
}

/// Decode a `REG_SZ` buffer, dropping the NUL terminator.
///
/// An empty value counts as unset.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn decode_registry_string(wide: &[u16]) -> Option<String> {
    let end = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    let value = String::from_utf16_lossy(&wide[..end]);
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_decode_registry_string_drops_terminator() {
        let mut value = wide("\"C:\\Program Files\\mrv2\\bin\\mrv2.exe\" \"%1\"");
        value.push(0);
        assert_eq!(
            decode_registry_string(&value).as_deref(),
            Some("\"C:\\Program Files\\mrv2\\bin\\mrv2.exe\" \"%1\"")
        );
    }

    #[test]
    fn test_decode_registry_string_stops_at_first_nul() {
        let mut value = wide("C:\\mrv2\\bin\\mrv2.exe");
        value.extend([0, 0x41, 0]);
        assert_eq!(
            decode_registry_string(&value).as_deref(),
            Some("C:\\mrv2\\bin\\mrv2.exe")
        );
    }

    #[test]
    fn test_decode_registry_string_empty_is_unset() {
        assert_eq!(decode_registry_string(&[0]), None);
        assert_eq!(decode_registry_string(&[]), None);
        assert_eq!(decode_registry_string(&wide("   ")), None);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_registry_is_unavailable_off_windows() {
        assert_eq!(
            Win32Registry.default_value(r"Applications\mrv2.exe\shell\Open\command"),
            None
        );
    }

    #[test]
    fn test_fs_probe_sees_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("mrv2");
        std::fs::write(&file, b"#!/bin/sh\n").unwrap();
        assert!(FsProbe.exists(&file));
        assert!(!FsProbe.exists(dir.path()));
        assert!(!FsProbe.exists(&dir.path().join("missing")));
    }
}
