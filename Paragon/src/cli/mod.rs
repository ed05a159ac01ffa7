//! Paragon CLI - Command-line interface for dialogue script tools

pub mod commands;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Parser)]
#[command(name = "paragon")]
#[command(about = "Paragon: dialogue script tools for Fire Emblem 3DS titles", long_about = None)]
#[command(version)]
struct Cli {
    /// Log parser and interpreter activity
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the Paragon CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout carries converted scripts
    tracing::subscriber::set_global_default(log_subscriber(cli.verbose, std::io::stderr))?;

    cli.command.execute()?;

    Ok(())
}

fn log_subscriber<W>(verbose: bool, writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .with_writer(writer)
        .finish()
}

fn log_level(verbose: bool) -> tracing::Level {
    if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}
