//! `mrv2-update` entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mrv2_update_cli::bootstrap::{self, PromptMode};
use mrv2_update_cli::{Cli, CliError, Commands, handlers};

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

fn dispatch(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Check { json } => {
            let ctx = bootstrap::bootstrap(cli, PromptMode::NonInteractive)?;
            handlers::check::execute(&ctx, *json)
        }
        Commands::Update { yes, startup } => {
            let mode = if *yes {
                PromptMode::AutoConfirm
            } else {
                PromptMode::Interactive
            };
            let ctx = bootstrap::bootstrap(cli, mode)?;
            handlers::update::execute(&ctx, *startup)
        }
        Commands::Locate { version } => {
            let platform = bootstrap::platform(cli)?;
            handlers::locate::execute(platform.as_ref(), version)
        }
        Commands::Platform => {
            let platform = bootstrap::platform(cli)?;
            handlers::platform::execute(platform.as_ref(), &bootstrap::app_root(cli));
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if let Err(err) = dispatch(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
