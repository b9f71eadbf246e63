//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define what the orchestrator needs from infrastructure: the release
//! feed, the asset transfer, process execution and the host UI. They use
//! only domain types in their signatures.
//!
//! # Design Rules
//!
//! - No `reqwest` or `tokio::process` types in any signature
//! - Async ports run on worker threads and must be `Send + Sync`
//! - UI-facing ports ([`UpdatePrompt`], [`EventLoop`]) are only called from
//!   the thread that drives the orchestrator

mod downloader;
mod event_loop;
mod installer;
mod locator;
mod progress;
mod prompt;
mod relaunch;
mod release_source;

pub use downloader::{AssetDownloader, ProgressFn};
pub use event_loop::{BlockingEventLoop, EventLoop};
pub use installer::InstallRunner;
pub use locator::ExecutableResolver;
pub use progress::{NoopProgress, ProgressReporter};
pub use prompt::{AutoConfirmPrompt, NonInteractivePrompt, UpdatePrompt};
pub use relaunch::{NoopSessionStore, ProcessReplacer, SessionStore};
pub use release_source::ReleaseSource;
