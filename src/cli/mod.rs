//! ba2tex CLI - command-line interface for BA2 texture archives

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "ba2tex")]
#[command(about = "ba2tex: BA2 texture archive tools for Fallout 4", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the ba2tex CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
