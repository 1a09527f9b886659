//! CLI commands

mod check;
mod generate;
mod sample;

pub use check::CheckCommand;
pub use generate::GenerateCommand;
pub use sample::{sample_cli, SampleCommand, SampleFormat};

use clap::{Parser, Subcommand};

/// cgen - shell completion generator
#[derive(Parser, Debug)]
#[command(name = "cgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate completion scripts and man pages
    Generate(GenerateCommand),

    /// Load and validate a description without writing anything
    Check(CheckCommand),

    /// Print a sample description
    Sample(SampleCommand),
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgen_types::Shell;
    use std::path::Path;

    #[test]
    fn test_cli_parse() {
        let cli = Cli::try_parse_from(["cgen", "generate"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["cgen", "generate"]).unwrap();
        let Commands::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(cmd.path, Path::new("cgen.yaml"));
        assert_eq!(cmd.out, Path::new("."));
        assert!(cmd.shells.is_empty());
        assert!(!cmd.no_man);
    }

    #[test]
    fn test_generate_with_options() {
        let cli = Cli::try_parse_from([
            "cgen", "generate", "tool.yaml", "-o", "dist", "--shell", "zsh", "--shell", "fish",
            "--no-man", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(cmd.path, Path::new("tool.yaml"));
        assert_eq!(cmd.out, Path::new("dist"));
        assert_eq!(cmd.shells, vec![Shell::Zsh, Shell::Fish]);
        assert!(cmd.no_man);
    }

    #[test]
    fn test_unknown_shell_rejected() {
        let cli = Cli::try_parse_from(["cgen", "generate", "--shell", "tcsh"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_sample_format() {
        let cli = Cli::try_parse_from(["cgen", "sample", "--format", "json"]).unwrap();
        let Commands::Sample(cmd) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(cmd.format, SampleFormat::Json);
    }
}
