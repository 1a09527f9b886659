//! cgen CLI
//!
//! Generates bash, fish and zsh completions and man pages from a tool description.

use clap::Parser;
use cgen_cli::{Cli, Commands};
use cgen_core::CgenError;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<(), CgenError> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Generate(cmd) => cmd.execute()?,
        Commands::Check(cmd) => cmd.execute()?,
        Commands::Sample(cmd) => cmd.execute()?,
    }

    Ok(())
}
