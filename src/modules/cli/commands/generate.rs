//! Generate command implementation
//!
//! Writes one completion script per shell and the man pages below the
//! output root, following the usual `share/` layout.

use cgen_core::CgenError;
use cgen_generators::{write_all, GeneratorRegistry, ManPageGenerator};
use cgen_parser::parse_file;
use cgen_types::Shell;
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};

/// Generate command arguments
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Description file
    #[arg(default_value = "cgen.yaml")]
    pub path: PathBuf,

    /// Output root; files are written under `share/`
    #[arg(short = 'o', long, default_value = ".")]
    pub out: PathBuf,

    /// Shell to generate for; repeat for several (default: all)
    #[arg(long = "shell", value_name = "SHELL")]
    pub shells: Vec<Shell>,

    /// Skip man pages
    #[arg(long)]
    pub no_man: bool,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self) -> Result<(), CgenError> {
        info!("Generating completions from: {}", self.path.display());

        let cli = parse_file(&self.path)?;
        debug!(
            "Loaded '{}': {} command(s), {} global argument(s)",
            cli.name,
            cli.command_count(),
            cli.arguments.len()
        );

        let date = chrono::Local::now().format("%d-%b-%Y").to_string();
        let registry = self.registry(date);
        debug!("Targets: {}", registry.targets().join(", "));

        let written = write_all(&registry, &cli, &self.out)?;

        info!("✨ Wrote {} file(s) to {}", written.len(), self.out.display());
        for path in &written {
            debug!("  {}", path.display());
        }

        Ok(())
    }

    /// Generators selected by the flags
    fn registry(&self, date: String) -> GeneratorRegistry {
        let shells = if self.shells.is_empty() {
            Shell::all()
        } else {
            self.shells.as_slice()
        };

        let mut registry = GeneratorRegistry::with_shells(shells);
        if !self.no_man {
            registry.register(Box::new(ManPageGenerator::new(date)));
        }
        registry
    }
}
