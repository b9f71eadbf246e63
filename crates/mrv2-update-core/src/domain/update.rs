//! Update cycle states, offers and user-facing notices.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::release::ReleaseInfo;
use super::version::Version;

/// What started a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckTrigger {
    /// Automatic check when the application starts.
    Startup,
    /// The user asked for a check from the menu.
    Manual,
}

/// How the latest release relates to the running build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    /// Latest is newer.
    Upgrade,
    /// Latest is older than the running build.
    Downgrade,
    /// Same version, offered only on a manual check.
    Reinstall,
}

impl OfferKind {
    /// Button label shown to the user.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upgrade => "Upgrade",
            Self::Downgrade => "Downgrade",
            Self::Reinstall => "Update anyway",
        }
    }
}

/// A release the user may choose to install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOffer {
    pub kind: OfferKind,
    pub current: Version,
    pub latest: Version,
    pub release: ReleaseInfo,
}

impl fmt::Display for UpdateOffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OfferKind::Upgrade => write!(
                f,
                "mrv2 v{} is available. You are running v{}.",
                self.latest, self.current
            ),
            OfferKind::Downgrade => write!(
                f,
                "You are running v{}, which is newer than the latest release v{}.",
                self.current, self.latest
            ),
            OfferKind::Reinstall => write!(
                f,
                "You are already running the latest release v{}.",
                self.latest
            ),
        }
    }
}

/// The user's answer to an [`UpdateOffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Ignore,
}

/// Orchestrator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePhase {
    Idle,
    Checking,
    UpToDate,
    UpdateAvailable(Box<UpdateOffer>),
    Downloading,
    Installing,
    Verifying,
    Relaunching,
    Done,
    Failed(String),
}

impl UpdatePhase {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Checking => "checking",
            Self::UpToDate => "up_to_date",
            Self::UpdateAvailable(_) => "update_available",
            Self::Downloading => "downloading",
            Self::Installing => "installing",
            Self::Verifying => "verifying",
            Self::Relaunching => "relaunching",
            Self::Done => "done",
            Self::Failed(_) => "failed",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::UpToDate | Self::Done | Self::Failed(_))
    }
}

impl fmt::Display for UpdatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The single human-readable message produced when a cycle ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No different release to offer.
    UpToDate { current: Version },
    /// The latest release could not be determined (parse error or no asset).
    Undetermined { reason: String },
    /// The cycle failed after the user accepted.
    Failed { reason: String },
    /// Install finished; the new executable is about to take over.
    Installed { version: Version, executable: PathBuf },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpToDate { current } => {
                write!(f, "Your mrv2 (v{current}) is up to date.")
            }
            Self::Undetermined { reason } => {
                write!(f, "No update available: could not determine latest version ({reason}).")
            }
            Self::Failed { reason } => write!(f, "Update failed: {reason}"),
            Self::Installed {
                version,
                executable,
            } => write!(
                f,
                "Installed mrv2 v{version}. Relaunching {}.",
                executable.display()
            ),
        }
    }
}
