//! Subcommands.

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report what an update check would offer, without installing
    Check {
        /// Print the offer as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check, then download, install and relaunch the new release
    Update {
        /// Accept the offer without asking
        #[arg(short = 'y', long)]
        yes: bool,
        /// Apply the rules of the automatic check done at startup
        #[arg(long)]
        startup: bool,
    },
    /// Print where a given version is expected after installation
    Locate {
        /// Version such as 1.3.0 or v1.3.0
        version: String,
    },
    /// Print the detected platform and the asset it downloads
    Platform,
}
