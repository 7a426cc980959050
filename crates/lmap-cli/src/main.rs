//! lineage-mapper CLI - table-level lineage from a folder of SQL files

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod logging;

use cli::Cli;
use commands::common::ExitCode;
use commands::{lineage, parse, render};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    if let Err(err) = run(&cli).await {
        match err.downcast_ref::<ExitCode>() {
            Some(code) => std::process::exit(code.0),
            None => {
                eprintln!("Error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        cli::Commands::Lineage(args) => lineage::execute(args, &cli.global).await,
        cli::Commands::Parse(args) => parse::execute(args, &cli.global).await,
        cli::Commands::Render(args) => render::execute(args).await,
    }
}
