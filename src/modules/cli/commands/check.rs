//! Check command implementation

use cgen_core::CgenError;
use cgen_parser::parse_file;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Description file
    #[arg(default_value = "cgen.yaml")]
    pub path: PathBuf,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(&self) -> Result<(), CgenError> {
        info!("Checking description: {}", self.path.display());

        let cli = parse_file(&self.path)?;
        println!(
            "{}: '{}' is valid ({} command(s), {} global argument(s))",
            self.path.display(),
            cli.name,
            cli.command_count(),
            cli.arguments.len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_check_valid_description() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cgen.yaml");
        fs::write(&path, "name: cli\ncommands:\n  - name: push\n").unwrap();

        assert!(CheckCommand { path }.execute().is_ok());
    }

    #[test]
    fn test_check_reports_invalid_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cgen.yaml");
        fs::write(
            &path,
            "name: cli\narguments:\n  - named: true\n    name: out\n    long-value-separator: colon\n",
        )
        .unwrap();

        let err = CheckCommand { path }.execute().unwrap_err();
        assert!(matches!(err, CgenError::InvalidValue { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
