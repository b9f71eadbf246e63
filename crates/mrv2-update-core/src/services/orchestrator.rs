//! End-to-end update cycle.
//!
//! [`UpdateOrchestrator`] owns the state machine
//! `Idle → Checking → {UpToDate | UpdateAvailable} → Downloading → Installing
//! → Verifying → Relaunching → {Done | Failed}` and runs on the host's UI
//! thread. Every slow step goes through a [`CompletionBridge`] worker while
//! the host [`EventLoop`] keeps ticking.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::bridge::CompletionBridge;
use crate::config::UpdaterConfig;
use crate::domain::{
    CheckTrigger, Decision, DownloadState, InstallJob, InstallResult, Notice, PasswordReply,
    ReleaseInfo, UpdateOffer, UpdatePhase, Version,
};
use crate::error::{FetchError, InstallError, RelaunchError, UpdateError};
use crate::platform::PlatformStrategy;
use crate::ports::{
    AssetDownloader, EventLoop, InstallRunner, ProcessReplacer, ProgressReporter, ReleaseSource,
    SessionStore, UpdatePrompt,
};

use super::decision::decide;
use super::unlock::wait_for_unlock;

/// Session file handed to the relaunched executable.
pub const SESSION_FILE_NAME: &str = "installed.mrv2s";

/// First release that accepts a session file on its command line.
const SESSION_ARG_MIN_VERSION: Version = Version::new(0, 8, 0);

/// Infrastructure the orchestrator drives.
#[derive(Clone)]
pub struct UpdateDeps {
    pub source: Arc<dyn ReleaseSource>,
    pub downloader: Arc<dyn AssetDownloader>,
    pub installer: Arc<dyn InstallRunner>,
    pub platform: Arc<dyn PlatformStrategy>,
    pub replacer: Arc<dyn ProcessReplacer>,
    pub session: Arc<dyn SessionStore>,
    pub prompt: Arc<dyn UpdatePrompt>,
    pub progress: Arc<dyn ProgressReporter>,
}

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Startup checks are disabled; nothing was contacted.
    Skipped,
    /// Nothing to offer.
    UpToDate,
    /// The latest release could not be determined; back to `Idle`.
    Undetermined(UpdateError),
    /// The user ignored the offer; back to `Idle`.
    Declined(Box<UpdateOffer>),
    /// The cycle failed; the running application is untouched.
    Failed(UpdateError),
    /// Control was handed to the new executable.
    Relaunched { executable: PathBuf },
}

/// Drives one update cycle at a time on the UI thread.
pub struct UpdateOrchestrator<L: EventLoop> {
    config: UpdaterConfig,
    deps: UpdateDeps,
    event_loop: L,
    phase: UpdatePhase,
    clock: fn() -> DateTime<Utc>,
}

impl<L: EventLoop> UpdateOrchestrator<L> {
    pub fn new(config: UpdaterConfig, deps: UpdateDeps, event_loop: L) -> Self {
        Self {
            config,
            deps,
            event_loop,
            phase: UpdatePhase::Idle,
            clock: Utc::now,
        }
    }

    /// Override the clock used for the startup grace window.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub const fn phase(&self) -> &UpdatePhase {
        &self.phase
    }

    pub const fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Fetch the latest release and decide what would be offered, without
    /// prompting or downloading. Returns to `Idle`.
    pub fn check(&mut self, trigger: CheckTrigger) -> Result<Option<UpdateOffer>, UpdateError> {
        self.transition(UpdatePhase::Checking);
        let result = self.fetch_offer(trigger);
        self.transition(UpdatePhase::Idle);
        result
    }

    /// Run a full cycle. Only returns `Relaunched` when the process replacer
    /// returns, which a real exec never does.
    pub fn run(&mut self, trigger: CheckTrigger) -> UpdateOutcome {
        if trigger == CheckTrigger::Startup && !self.config.check_on_startup {
            debug!("startup update check disabled");
            return UpdateOutcome::Skipped;
        }

        self.transition(UpdatePhase::Checking);
        let offer = match self.fetch_offer(trigger) {
            Ok(Some(offer)) => offer,
            Ok(None) => return self.up_to_date(),
            Err(e @ (UpdateError::Version(_) | UpdateError::Fetch(FetchError::NotFound(_)))) => {
                return self.undetermined(e);
            }
            Err(e) => return self.fail(e, None),
        };

        self.transition(UpdatePhase::UpdateAvailable(Box::new(offer.clone())));
        info!(kind = ?offer.kind, from = %offer.current, to = %offer.latest, "update available");
        if self.deps.prompt.offer(&offer) == Decision::Ignore {
            info!(latest = %offer.latest, "update ignored");
            self.transition(UpdatePhase::Idle);
            return UpdateOutcome::Declined(Box::new(offer));
        }

        self.transition(UpdatePhase::Downloading);
        let download = match self.download(&offer.release) {
            Ok(state) => state.destination,
            Err(e) => return self.fail(e, None),
        };

        self.transition(UpdatePhase::Installing);
        if let Err(e) = self.install(&download) {
            return self.fail(e, Some(&download));
        }

        self.transition(UpdatePhase::Verifying);
        let executable = match self.verify(&download, offer.latest) {
            Ok(exe) => exe,
            Err(e) => return self.fail(e, Some(&download)),
        };

        self.transition(UpdatePhase::Relaunching);
        remove_download(&download);
        let args = self.session_args(offer.latest);
        self.deps.progress.finish(&format!("Installed mrv2 v{}", offer.latest));
        // Sent before the exec, which does not return on success.
        self.deps.prompt.notify(&Notice::Installed {
            version: offer.latest,
            executable: executable.clone(),
        });
        if let Err(e) = self.deps.replacer.replace(&executable, &args) {
            return self.fail(e.into(), None);
        }

        self.transition(UpdatePhase::Done);
        UpdateOutcome::Relaunched { executable }
    }

    // =========================================================================
    // Stages
    // =========================================================================

    fn fetch_offer(&mut self, trigger: CheckTrigger) -> Result<Option<UpdateOffer>, UpdateError> {
        let current = Version::parse(&self.config.current_version)?;

        let source = Arc::clone(&self.deps.source);
        let owner = self.config.owner.clone();
        let repo = self.config.repo.clone();
        let mut bridge = CompletionBridge::spawn_async("fetch", move || async move {
            source.latest(&owner, &repo).await
        })?;
        let release = bridge.wait_on(&mut self.event_loop, self.config.tick_interval)??;
        debug!(tag = %release.tag_name, asset = %release.asset_name, "latest release");

        Ok(decide(current, &release, trigger, &self.config, (self.clock)())?)
    }

    fn download(&mut self, release: &ReleaseInfo) -> Result<DownloadState, UpdateError> {
        let progress = Arc::clone(&self.deps.progress);
        progress.start(&format!("Downloading {}", release.asset_name), None);

        let downloader = Arc::clone(&self.deps.downloader);
        let url = release.download_url.clone();
        let dir = self.config.temp_dir.clone();
        let name = release.asset_name.clone();
        let reporter = Arc::clone(&progress);
        let mut bridge = CompletionBridge::spawn_async("download", move || async move {
            let on_progress =
                move |state: &DownloadState| reporter.update(state.downloaded_bytes, state.known_total());
            downloader.download(&url, &dir, &name, &on_progress).await
        })?;

        let state = bridge.wait_on(&mut self.event_loop, self.config.tick_interval)??;
        if let Err(e) = state.verify() {
            remove_download(&state.destination);
            return Err(e.into());
        }
        progress.finish(&format!("Downloaded {}", state.destination.display()));
        info!(path = %state.destination.display(), bytes = state.downloaded_bytes, "download complete");
        Ok(state)
    }

    fn install(&mut self, download: &Path) -> Result<InstallResult, UpdateError> {
        let platform = Arc::clone(&self.deps.platform);
        let elevation = platform.needs_elevation(download)?;
        let password = if elevation.needs_password() {
            let command = platform.install_command(download)?;
            match self.deps.prompt.ask_password(&command.to_string()) {
                PasswordReply::Entered(secret) => Some(secret),
                PasswordReply::Dismissed => return Err(InstallError::ElevationAborted.into()),
                PasswordReply::Unavailable => {
                    debug!(%command, "no password available; installing unprivileged");
                    None
                }
            }
        } else {
            None
        };

        let job: InstallJob = platform.build_job(download, password)?;
        info!(command = %job.command, elevation = ?job.elevation, "running installer");
        self.deps
            .progress
            .start(&format!("Installing {}", download.display()), None);

        let installer = Arc::clone(&self.deps.installer);
        let mut bridge = CompletionBridge::spawn_async("install", move || async move {
            installer.run(&job).await
        })?;
        let result = bridge
            .wait_on(&mut self.event_loop, self.config.tick_interval)??
            .into_checked()?;
        debug!(exit_code = result.exit_code, "installer finished");
        Ok(result)
    }

    fn verify(&mut self, download: &Path, version: Version) -> Result<PathBuf, UpdateError> {
        if self.deps.platform.installer_holds_download() {
            let file = download.to_path_buf();
            let policy = self.config.unlock_policy;
            debug!(
                path = %download.display(),
                max_wait = ?policy.max_wait(),
                "waiting for installer to release download"
            );
            self.deps.progress.message("Waiting for the installer to finish");
            let mut bridge = CompletionBridge::spawn("unlock", move || {
                wait_for_unlock(&file, policy, |p| std::fs::remove_file(p), std::thread::sleep)
            })?;
            bridge.wait_on(&mut self.event_loop, self.config.tick_interval)??;
        }

        // Windows reads the registry here.
        let platform = Arc::clone(&self.deps.platform);
        let mut bridge =
            CompletionBridge::spawn("locate", move || platform.locate_executable(version))?;
        let executable = bridge.wait_on(&mut self.event_loop, self.config.tick_interval)?;
        if !executable.is_file() {
            return Err(RelaunchError::ExecutableNotFound { path: executable }.into());
        }
        info!(path = %executable.display(), "installed executable found");
        Ok(executable)
    }

    fn session_args(&self, version: Version) -> Vec<OsString> {
        if version < SESSION_ARG_MIN_VERSION {
            return Vec::new();
        }
        let session = self.config.temp_dir.join(SESSION_FILE_NAME);
        if self.deps.session.save(&session) {
            debug!(path = %session.display(), "session saved for relaunch");
            vec![session.into_os_string()]
        } else {
            Vec::new()
        }
    }

    // =========================================================================
    // Terminal states
    // =========================================================================

    fn transition(&mut self, next: UpdatePhase) {
        debug!(from = %self.phase, to = %next, "update phase");
        self.phase = next;
    }

    fn up_to_date(&mut self) -> UpdateOutcome {
        self.transition(UpdatePhase::UpToDate);
        match Version::parse(&self.config.current_version) {
            Ok(current) => {
                info!(%current, "mrv2 is up to date");
                self.deps.prompt.notify(&Notice::UpToDate { current });
            }
            Err(e) => warn!(error = %e, "up to date but current version unparsable"),
        }
        UpdateOutcome::UpToDate
    }

    fn undetermined(&mut self, error: UpdateError) -> UpdateOutcome {
        warn!(error = %error, "could not determine latest version");
        self.deps.prompt.notify(&Notice::Undetermined {
            reason: error.to_string(),
        });
        self.transition(UpdatePhase::Idle);
        UpdateOutcome::Undetermined(error)
    }

    fn fail(&mut self, error: UpdateError, download: Option<&Path>) -> UpdateOutcome {
        if let Some(file) = download {
            remove_download(file);
        }
        warn!(phase = %self.phase, error = %error, "update failed");
        self.deps.progress.finish_with_error(&error.to_string());
        self.deps.prompt.notify(&Notice::Failed {
            reason: error.to_string(),
        });
        self.transition(UpdatePhase::Failed(error.to_string()));
        UpdateOutcome::Failed(error)
    }
}

/// Best-effort removal of the temp download.
fn remove_download(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed download"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "could not remove download"),
    }
}
