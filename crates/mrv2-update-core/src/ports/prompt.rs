//! User decision port.
//!
//! Offers, password requests and end-of-cycle notices go through
//! [`UpdatePrompt`] so the orchestrator stays independent of the host UI.

use tracing::{info, warn};

use crate::domain::{Decision, Notice, PasswordReply, UpdateOffer};

/// Host-side dialogs used by the orchestrator.
pub trait UpdatePrompt: Send + Sync {
    /// Ask whether to install the offered release.
    fn offer(&self, offer: &UpdateOffer) -> Decision;

    /// Ask for the password `sudo` needs to run `command`.
    fn ask_password(&self, command: &str) -> PasswordReply;

    /// Show the single message that ends a cycle.
    fn notify(&self, notice: &Notice);
}

/// Prompt for contexts without a user: declines every offer and logs notices.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractivePrompt;

impl UpdatePrompt for NonInteractivePrompt {
    fn offer(&self, offer: &UpdateOffer) -> Decision {
        info!(kind = ?offer.kind, latest = %offer.latest, "update offer declined (non-interactive)");
        Decision::Ignore
    }

    fn ask_password(&self, _command: &str) -> PasswordReply {
        PasswordReply::Unavailable
    }

    fn notify(&self, notice: &Notice) {
        info!("{notice}");
    }
}

/// Prompt that accepts every offer (`--yes`).
///
/// It has no password to give, so package installs run without `sudo`
/// and succeed only when the process already has the rights.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirmPrompt;

impl UpdatePrompt for AutoConfirmPrompt {
    fn offer(&self, offer: &UpdateOffer) -> Decision {
        info!(kind = ?offer.kind, latest = %offer.latest, "update offer accepted automatically");
        Decision::Accept
    }

    fn ask_password(&self, command: &str) -> PasswordReply {
        warn!(%command, "no password available; running installer unprivileged");
        PasswordReply::Unavailable
    }

    fn notify(&self, notice: &Notice) {
        info!("{notice}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OfferKind, ReleaseInfo, Version};

    fn offer() -> UpdateOffer {
        UpdateOffer {
            kind: OfferKind::Upgrade,
            current: Version::new(1, 0, 0),
            latest: Version::new(1, 1, 0),
            release: ReleaseInfo {
                name: "v1.1.0".to_string(),
                tag_name: "v1.1.0".to_string(),
                published_at: None,
                download_url: "https://example.com/mrv2.deb".to_string(),
                asset_name: "mrv2.deb".to_string(),
            },
        }
    }

    #[test]
    fn test_non_interactive_declines() {
        let prompt = NonInteractivePrompt;
        assert_eq!(prompt.offer(&offer()), Decision::Ignore);
        assert_eq!(prompt.ask_password("dpkg -i mrv2.deb"), PasswordReply::Unavailable);
    }

    #[test]
    fn test_auto_confirm_accepts() {
        let prompt = AutoConfirmPrompt;
        assert_eq!(prompt.offer(&offer()), Decision::Accept);
        assert_eq!(prompt.ask_password("dpkg -i mrv2.deb"), PasswordReply::Unavailable);
    }
}
