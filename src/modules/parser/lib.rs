//! Description loading for cgen
//!
//! This crate reads YAML (or JSON) tool descriptions into the definition
//! model and validates the whole tree before anything is generated.

pub mod validator;
pub mod yaml;

pub use validator::ConfigValidator;
pub use yaml::YamlParser;

use cgen_core::{CgenError, Cli};
use std::path::Path;

/// Parse a description file from a path
pub fn parse_file(path: impl AsRef<Path>) -> Result<Cli, CgenError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        CgenError::Config(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    parse_string(&content)
}

/// Parse a description from a string
pub fn parse_string(content: &str) -> Result<Cli, CgenError> {
    let cli = YamlParser::parse(content)?;

    let validator = ConfigValidator::new();
    validator.validate(&cli)?;

    Ok(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_description() {
        let yaml = r#"
name: cli
arguments:
  - named: true
    name: verbose
    short-name: v
commands:
  - name: push
    aliases: [p]
    arguments:
      - named: true
        name: target
        short-name: t
        completion:
          type: static
          values: [staging, prod]
"#;
        let cli = parse_string(yaml).unwrap();
        assert_eq!(cli.name, "cli");
        assert_eq!(cli.arguments.len(), 1);
        assert_eq!(cli.commands.len(), 1);
        assert_eq!(cli.resolve(&["p"]).map(|c| c.name.as_str()), Some("push"));
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let yaml = r#"
name: cli
commands:
  - name: push
  - name: push
"#;
        assert!(matches!(parse_string(yaml), Err(CgenError::Validation(_))));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("/nonexistent/cgen.yaml").unwrap_err();
        assert!(matches!(err, CgenError::Config(_)));
        assert!(err.to_string().contains("/nonexistent/cgen.yaml"));
    }
}
