//! Normalized release metadata for a single platform asset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::version::Version;
use crate::error::VersionParseError;

/// The latest release, narrowed down to the one asset that matches this platform.
///
/// Built once by a [`ReleaseSource`](crate::ports::ReleaseSource) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Human-readable release title.
    pub name: String,
    /// Git tag of the release (e.g. `v1.2.3`).
    pub tag_name: String,
    /// When the release was published, if the feed reported it.
    pub published_at: Option<DateTime<Utc>>,
    /// Direct download URL of the matching asset.
    pub download_url: String,
    /// File name of the matching asset.
    pub asset_name: String,
}

impl ReleaseInfo {
    /// Version advertised by the release tag.
    ///
    /// Falls back to the asset file name when the tag carries no version.
    pub fn version(&self) -> Result<Version, VersionParseError> {
        Version::from_tag(&self.tag_name).or_else(|_| Version::from_tag(&self.asset_name))
    }

    /// Calendar days (UTC) between the publication date and `now`.
    ///
    /// Time of day is ignored, so a release published late on one day is a
    /// day old right after midnight. `None` when the publish date is unknown.
    pub fn age_in_days(&self, now: DateTime<Utc>) -> Option<i64> {
        self.published_at
            .map(|at| (now.date_naive() - at.date_naive()).num_days())
    }
}
