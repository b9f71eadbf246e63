//! Composition root.
//!
//! The only place where the GitHub client, downloader, platform strategy,
//! install runner and terminal UI are wired into an [`UpdateOrchestrator`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mrv2_update_core::ports::{NonInteractivePrompt, NoopSessionStore, UpdatePrompt};
use mrv2_update_core::{PlatformStrategy, UpdateDeps, UpdateOrchestrator, UpdaterConfig, Version};
use mrv2_update_download::{DownloaderConfig, ReqwestDownloader};
use mrv2_update_github::{DefaultGithubClient, GithubClientConfig};
use mrv2_update_runtime::{ExecReplacer, TokioInstallRunner, current_platform, resolve_app_root};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;
use crate::ui::{CliProgress, CliPrompt, TerminalEventLoop};

/// A terminal redraws far more often than a GUI timer fires.
const CLI_TICK: Duration = Duration::from_millis(100);

/// Who answers update offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Ask on the terminal.
    Interactive,
    /// Accept every offer (`--yes`).
    AutoConfirm,
    /// Never accept; used by `check`.
    NonInteractive,
}

impl PromptMode {
    fn prompt(self) -> Arc<dyn UpdatePrompt> {
        match self {
            Self::Interactive => Arc::new(CliPrompt::new()),
            Self::AutoConfirm => Arc::new(CliPrompt::assume_yes()),
            Self::NonInteractive => Arc::new(NonInteractivePrompt),
        }
    }
}

/// Fully composed dependencies for `check` and `update`.
pub struct CliContext {
    pub config: UpdaterConfig,
    pub platform: Arc<dyn PlatformStrategy>,
    progress: Arc<CliProgress>,
    deps: UpdateDeps,
}

impl CliContext {
    pub fn orchestrator(&self) -> UpdateOrchestrator<TerminalEventLoop> {
        UpdateOrchestrator::new(
            self.config.clone(),
            self.deps.clone(),
            TerminalEventLoop::new(Arc::clone(&self.progress)),
        )
    }
}

/// Updater settings from the command line and environment.
pub fn updater_config(cli: &Cli) -> Result<UpdaterConfig, CliError> {
    let current = cli
        .current_version
        .clone()
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    Version::parse(&current).map_err(|e| CliError::Arguments(e.to_string()))?;

    let mut config = UpdaterConfig::new(current).with_tick_interval(CLI_TICK);
    if let Some(slug) = &cli.repo {
        config = config.with_repository(&slug.owner, &slug.repo);
    }
    Ok(config)
}

pub fn app_root(cli: &Cli) -> PathBuf {
    resolve_app_root(cli.app_root.clone())
}

/// Platform strategy for this machine.
pub fn platform(cli: &Cli) -> Result<Arc<dyn PlatformStrategy>, CliError> {
    Ok(current_platform(app_root(cli))?)
}

/// Wire up everything a full update cycle needs.
pub fn bootstrap(cli: &Cli, mode: PromptMode) -> Result<CliContext, CliError> {
    let config = updater_config(cli)?;
    let platform = platform(cli)?;

    let mut github = GithubClientConfig::from_env().with_timeout(config.metadata_timeout);
    if let Some(base) = &cli.api_base {
        github = github.with_api_base(base.clone());
    }
    let source = DefaultGithubClient::new(&github, platform.extension())?;
    let downloader = ReqwestDownloader::new(DownloaderConfig::new())?;
    let progress = Arc::new(CliProgress::new());

    debug!(
        target_os = %platform.target(),
        suffix = platform.extension(),
        repo = %format!("{}/{}", config.owner, config.repo),
        "updater bootstrapped"
    );

    let deps = UpdateDeps {
        source: Arc::new(source),
        downloader: Arc::new(downloader),
        installer: Arc::new(TokioInstallRunner::new()),
        platform: Arc::clone(&platform),
        replacer: Arc::new(ExecReplacer),
        session: Arc::new(NoopSessionStore),
        prompt: mode.prompt(),
        progress: Arc::clone(&progress) as _,
    };

    Ok(CliContext {
        config,
        platform,
        progress,
        deps,
    })
}
