//! o2b CLI - Obsidian vault to Bookstack migration.
//!
//! Provides commands for:
//! - `check`: Verify Bookstack credentials and base URL
//! - `ls`: List shelves, books, chapters or pages (remote or local)
//! - `status`: Compare the local vault with the Bookstack instance

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, GlobalArgs, LsArgs, StatusArgs};
use output::Output;

/// o2b - Obsidian to Bookstack.
#[derive(Parser)]
#[command(name = "o2b", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify that the Bookstack instance is reachable with the configured token.
    Check(CheckArgs),
    /// List shelves, books, chapters or pages.
    Ls(LsArgs),
    /// Show what differs between the vault and the Bookstack instance.
    Status(StatusArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(&cli.global),
        Commands::Ls(args) => args.execute(&cli.global),
        Commands::Status(args) => args.execute(&cli.global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
