//! Domain types shared by every update stage.

mod download;
mod install;
mod release;
mod update;
mod version;

pub use download::DownloadState;
pub use install::{Elevation, InstallCommand, InstallJob, InstallResult, PasswordReply, Secret};
pub use release::ReleaseInfo;
pub use update::{CheckTrigger, Decision, Notice, OfferKind, UpdateOffer, UpdatePhase};
pub use version::{Version, compare};
