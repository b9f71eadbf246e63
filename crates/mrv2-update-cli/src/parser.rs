//! Root parser and global options.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::commands::Commands;

/// `OWNER/REPO` on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl FromStr for RepoSlug {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(format!("expected OWNER/REPO, got '{s}'")),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Self-updater for the mrv2 media player.
#[derive(Debug, Parser)]
#[command(name = "mrv2-update")]
#[command(about = "Check for, download and install mrv2 releases")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// GitHub repository publishing the releases
    #[arg(long, global = true, env = "MRV2_UPDATE_REPO", value_name = "OWNER/REPO")]
    pub repo: Option<RepoSlug>,

    /// Version of the installed mrv2 to compare against
    #[arg(long, global = true, env = "MRV2_CURRENT_VERSION")]
    pub current_version: Option<String>,

    /// Base URL of the GitHub API
    #[arg(long, global = true, env = "MRV2_UPDATE_API_BASE", value_name = "URL")]
    pub api_base: Option<String>,

    /// Installation root of mrv2 (holds bin/)
    #[arg(long, global = true, env = "MRV2_ROOT", value_name = "DIR")]
    pub app_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from([
            "mrv2-update",
            "check",
            "--repo",
            "someone/mrv2-fork",
            "--current-version",
            "1.0.0",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(
            cli.repo,
            Some(RepoSlug {
                owner: "someone".to_string(),
                repo: "mrv2-fork".to_string()
            })
        );
        assert_eq!(cli.current_version.as_deref(), Some("1.0.0"));
        assert!(matches!(cli.command, Commands::Check { json: false }));
    }

    #[test]
    fn test_repo_slug_validation() {
        assert!("ggarra13/mrv2".parse::<RepoSlug>().is_ok());
        assert!("mrv2".parse::<RepoSlug>().is_err());
        assert!("/mrv2".parse::<RepoSlug>().is_err());
        assert!("a/b/c".parse::<RepoSlug>().is_err());
        assert!(Cli::try_parse_from(["mrv2-update", "--repo", "nope", "check"]).is_err());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["mrv2-update"]).is_err());
    }
}
