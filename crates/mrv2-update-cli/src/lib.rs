//! `mrv2-update`: check for, download and install new mrv2 releases from a
//! terminal.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio as _;
#[cfg(test)]
use wiremock as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod ui;

pub use bootstrap::{CliContext, PromptMode, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::{Cli, RepoSlug};
