//! Core of the mrv2 self-updater.
//!
//! Domain types, ports and the update state machine. Infrastructure (GitHub
//! client, downloader, platform installers, CLI host) lives in the sibling
//! crates and is wired together by the binary.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod bridge;
pub mod config;
pub mod domain;
pub mod error;
pub mod platform;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use bridge::{CompletionBridge, Tick};
pub use config::{DEFAULT_OWNER, DEFAULT_REPO, UnlockPolicy, UpdaterConfig};
pub use domain::{
    CheckTrigger, Decision, DownloadState, Elevation, InstallCommand, InstallJob, InstallResult,
    Notice, OfferKind, PasswordReply, ReleaseInfo, Secret, UpdateOffer, UpdatePhase, Version,
    compare,
};
pub use error::{
    BridgeError, DownloadError, FetchError, InstallError, RelaunchError, UpdateError,
    UpdateResult, VersionParseError,
};
pub use platform::{InstallerKind, PackageManager, PlatformStrategy, PlatformTarget};
pub use services::{UpdateDeps, UpdateOrchestrator, UpdateOutcome};

// Silence unused dev-dependency warnings
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
