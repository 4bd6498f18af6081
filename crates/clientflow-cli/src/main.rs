mod cli;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use clientflow_core::{ClientFlow, ClientFlowConfig};
use commands::{duplicate, folders, templates, transfer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        error::handle_error(err);
    }
}

/// Logs go to stderr so `--format json` output stays parseable
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.format;

    match cli.command {
        Commands::Classify { name } => folders::classify_name(&name, format),
        Commands::Templates => templates::run(&connect()?, format).await,
        Commands::Duplicate(args) => duplicate::duplicate(&connect()?, args, format).await,
        Commands::Batch(args) => duplicate::batch(&connect()?, args, format).await,
        Commands::DuplicateFolder(args) => {
            duplicate::duplicate_folder(&connect()?, args, format).await
        }
        Commands::Organize => folders::organize(&connect()?, format).await,
        Commands::Folders => folders::folders(&connect()?, format).await,
        Commands::Export(args) => transfer::export(&connect()?, args, format).await,
        Commands::Import(args) => transfer::import(&connect()?, args, format).await,
    }
}

/// Load configuration and connect to the remote platform
fn connect() -> Result<ClientFlow> {
    let config = ClientFlowConfig::load()?;
    Ok(ClientFlow::new(&config)?)
}
