//! GitHub releases client for the mrv2 self-updater.
//!
//! Queries `releases/latest`, picks the asset matching the platform suffix
//! and exposes the result through the core `ReleaseSource` port.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultGithubClient is meant to be used through the ReleaseSource port,
// not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;

// ============================================================================
// Public API
// ============================================================================

pub use client::DefaultGithubClient;
pub use config::{GITHUB_TOKEN_ENV, GithubClientConfig};
pub use error::{GithubError, GithubResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
#[cfg(test)]
use wiremock as _;
