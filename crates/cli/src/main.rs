//! vcon link runner
//!
//! Runs a vcon link once against a configured store, outside of a pipeline.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{RunnerConfig, build_store};

/// vcon link runner — invoke a link against a vcon store.
#[derive(Parser, Debug)]
#[command(name = "vcon-link", version, about)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, env = "VCON_LINK_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the sample link on a vcon.
    Run(commands::run::RunArgs),
    /// Print a stored vcon as JSON. Requires a persistent backend.
    Show(commands::show::ShowArgs),
    /// Load a vcon JSON file into the store. Requires a persistent backend.
    Put(commands::put::PutArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RunnerConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Show(_) => config.store.require_persistent("show")?,
        Command::Put(_) => config.store.require_persistent("put")?,
        Command::Run(_) => {}
    }
    let store = build_store(&config.store)?;

    match cli.command {
        Command::Run(args) => commands::run::run(store, &config.link, &args).await,
        Command::Show(args) => commands::show::run(store.as_ref(), &args).await,
        Command::Put(args) => commands::put::run(store.as_ref(), &args).await,
    }
}
