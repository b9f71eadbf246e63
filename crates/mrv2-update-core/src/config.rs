//! Updater configuration.
//!
//! Defaults match the behaviour of the shipped updater; the CLI overrides
//! them from flags and environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Default GitHub owner of the mrv2 repository.
pub const DEFAULT_OWNER: &str = "ggarra13";
/// Default GitHub repository name.
pub const DEFAULT_REPO: &str = "mrv2";
/// Days a release must be public before a startup check offers it.
pub const DEFAULT_RELEASE_GRACE_DAYS: i64 = 5;

/// Bounded retry schedule for deleting a download the installer may still hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockPolicy {
    /// Wait before the first attempt.
    pub initial_delay: Duration,
    /// Wait between attempts.
    pub interval: Duration,
    /// Give up after this many attempts.
    pub max_attempts: u32,
}

impl Default for UnlockPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(10),
            interval: Duration::from_secs(2),
            max_attempts: 60,
        }
    }
}

impl UnlockPolicy {
    /// Policy with no waiting at all, for tests and non-Windows hosts.
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            initial_delay: Duration::ZERO,
            interval: Duration::ZERO,
            max_attempts,
        }
    }

    /// Upper bound on the time spent waiting.
    pub fn max_wait(&self) -> Duration {
        self.initial_delay + self.interval * self.max_attempts.saturating_sub(1)
    }
}

/// Configuration for an update cycle.
///
/// # Example
///
/// ```
/// use mrv2_update_core::UpdaterConfig;
/// use std::time::Duration;
///
/// let config = UpdaterConfig::new("1.0.4")
///     .with_repository("ggarra13", "mrv2")
///     .with_tick_interval(Duration::from_millis(250));
/// assert_eq!(config.repo, "mrv2");
/// ```
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    pub owner: String,
    pub repo: String,
    /// Version string of the running build.
    pub current_version: String,
    /// Whether a startup trigger performs a check at all.
    pub check_on_startup: bool,
    pub release_grace_days: i64,
    pub offer_downgrade_on_startup: bool,
    /// How often the UI thread polls background work.
    pub tick_interval: Duration,
    pub metadata_timeout: Duration,
    /// Where the asset is downloaded.
    pub temp_dir: PathBuf,
    pub unlock_policy: UnlockPolicy,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            current_version: env!("CARGO_PKG_VERSION").to_string(),
            check_on_startup: true,
            release_grace_days: DEFAULT_RELEASE_GRACE_DAYS,
            offer_downgrade_on_startup: true,
            tick_interval: Duration::from_secs(1),
            metadata_timeout: Duration::from_secs(15),
            temp_dir: std::env::temp_dir(),
            unlock_policy: UnlockPolicy::default(),
        }
    }
}

impl UpdaterConfig {
    /// Defaults for a build reporting `current_version`.
    #[must_use]
    pub fn new(current_version: impl Into<String>) -> Self {
        Self {
            current_version: current_version.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_repository(mut self, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        self.owner = owner.into();
        self.repo = repo.into();
        self
    }

    #[must_use]
    pub const fn with_check_on_startup(mut self, enabled: bool) -> Self {
        self.check_on_startup = enabled;
        self
    }

    /// Days a new release must age before a startup check offers it.
    ///
    /// Defaults to 5.
    #[must_use]
    pub const fn with_release_grace_days(mut self, days: i64) -> Self {
        self.release_grace_days = days;
        self
    }

    #[must_use]
    pub const fn with_offer_downgrade_on_startup(mut self, enabled: bool) -> Self {
        self.offer_downgrade_on_startup = enabled;
        self
    }

    /// Defaults to one second.
    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Defaults to 15 seconds.
    #[must_use]
    pub const fn with_metadata_timeout(mut self, timeout: Duration) -> Self {
        self.metadata_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    #[must_use]
    pub const fn with_unlock_policy(mut self, policy: UnlockPolicy) -> Self {
        self.unlock_policy = policy;
        self
    }
}
