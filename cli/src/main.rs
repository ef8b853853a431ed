// CLI-specific lint overrides
#![allow(clippy::print_stdout, reason = "CLI tools print to stdout")]
#![allow(clippy::print_stderr, reason = "CLI tools print to stderr")]

mod bundle;
mod cli;
mod commands;
mod output;
mod sig_parser;
mod wallet;

use clap::Parser;
use cli::{Cli, Commands};
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.json).await,
        Commands::Hash(args) => commands::hash::run(args, cli.json).await,
        Commands::Sign(args) => commands::sign::run(args, cli.json).await,
        Commands::Approve(args) => commands::sign::approve(args, cli.json).await,
        Commands::Send(args) => commands::send::run(args, cli.json).await,
        Commands::Create(args) => commands::create::run(args, cli.json).await,
        Commands::AdjustV(args) => commands::offline::adjust_v(args, cli.json),
        Commands::PreValidated(args) => commands::offline::pre_validated(args, cli.json),
    }
}
