//! Whether, and how, to offer the latest release.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::UpdaterConfig;
use crate::domain::{CheckTrigger, OfferKind, ReleaseInfo, UpdateOffer, Version};
use crate::error::VersionParseError;

/// Decide what to offer for `release`.
///
/// Returns `Ok(None)` when the cycle should end as up to date:
/// - equal versions on a startup check;
/// - a newer release still inside the grace window on a startup check;
/// - a downgrade on a startup check when startup downgrades are disabled.
///
/// A manual check always offers something, labelled by direction.
pub fn decide(
    current: Version,
    release: &ReleaseInfo,
    trigger: CheckTrigger,
    config: &UpdaterConfig,
    now: DateTime<Utc>,
) -> Result<Option<UpdateOffer>, VersionParseError> {
    let latest = release.version()?;

    let kind = match (current.cmp(&latest), trigger) {
        (Ordering::Less, CheckTrigger::Startup) => {
            match release.age_in_days(now) {
                Some(age) if age < config.release_grace_days => {
                    debug!(%latest, age_days = age, "release too recent for startup offer");
                    return Ok(None);
                }
                _ => OfferKind::Upgrade,
            }
        }
        (Ordering::Less, CheckTrigger::Manual) => OfferKind::Upgrade,
        (Ordering::Greater, CheckTrigger::Startup) if !config.offer_downgrade_on_startup => {
            debug!(%current, %latest, "running build is newer; startup downgrade disabled");
            return Ok(None);
        }
        (Ordering::Greater, _) => OfferKind::Downgrade,
        (Ordering::Equal, CheckTrigger::Startup) => return Ok(None),
        (Ordering::Equal, CheckTrigger::Manual) => OfferKind::Reinstall,
    };

    Ok(Some(UpdateOffer {
        kind,
        current,
        latest,
        release: release.clone(),
    }))
}
