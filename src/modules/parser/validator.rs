//! Description validation
//!
//! Runs over the whole tree before any backend sees it, so a bad description
//! fails once instead of producing partial output.

use cgen_core::{Argument, CgenError, Cli, Command};
use once_cell::sync::Lazy;
use std::collections::HashSet;

use regex::Regex;

/// Tool names end up in function and file names
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.+-]*$").unwrap());

/// Description validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate the entire description
    pub fn validate(&self, cli: &Cli) -> Result<(), CgenError> {
        self.validate_cli_name(&cli.name)?;

        let texts = [
            ("version", cli.version.as_deref()),
            ("short-description", cli.short_description.as_deref()),
            ("long-description", cli.long_description.as_deref()),
        ];
        for (field, text) in texts {
            check_text(field, text)?;
        }

        self.validate_arguments(&cli.arguments, "")?;
        self.validate_commands(&cli.commands, "")?;
        Ok(())
    }

    fn validate_cli_name(&self, name: &str) -> Result<(), CgenError> {
        if name.is_empty() {
            return Err(CgenError::Validation(
                "Tool name cannot be empty".to_string(),
            ));
        }

        if !NAME_PATTERN.is_match(name) {
            return Err(CgenError::Validation(format!(
                "Invalid tool name '{}': must match {}",
                name,
                NAME_PATTERN.as_str()
            )));
        }

        Ok(())
    }

    fn validate_commands(&self, commands: &[Command], parent: &str) -> Result<(), CgenError> {
        let mut seen = HashSet::new();

        for command in commands {
            let path = format!("{}commands[{}]", parent, command.name);

            for name in command.names() {
                check_word(&format!("{}.name", path), name, "Command name")?;

                if !seen.insert(name) {
                    return Err(CgenError::Validation(format!(
                        "Duplicate command name or alias '{}' under '{}'",
                        name,
                        scope_label(parent)
                    )));
                }
            }

            let texts = [
                ("deprecated", command.deprecated.as_deref()),
                ("usage", command.usage.as_deref()),
                ("short-description", command.short_description.as_deref()),
                ("long-description", command.long_description.as_deref()),
                ("example", command.example.as_deref()),
            ];
            for (field, text) in texts {
                check_text(&format!("{}.{}", path, field), text)?;
            }

            let child_prefix = format!("{}.", path);
            self.validate_arguments(&command.arguments, &child_prefix)?;
            self.validate_commands(&command.commands, &child_prefix)?;
        }

        Ok(())
    }

    fn validate_arguments(&self, arguments: &[Argument], parent: &str) -> Result<(), CgenError> {
        let mut flags = HashSet::new();

        for (index, argument) in arguments.iter().enumerate() {
            let path = match argument.name.as_deref() {
                Some(name) => format!("{}arguments[{}]", parent, name),
                None => format!("{}arguments[#{}]", parent, index + 1),
            };

            self.validate_argument(argument, &path)?;

            for flag in argument.flag_forms() {
                if !flags.insert(flag.clone()) {
                    return Err(CgenError::Validation(format!(
                        "Duplicate flag '{}' under '{}'",
                        flag,
                        scope_label(parent)
                    )));
                }
            }
        }

        Ok(())
    }

    fn validate_argument(&self, argument: &Argument, path: &str) -> Result<(), CgenError> {
        if argument.named && argument.name.is_none() && argument.short_name.is_none() {
            return Err(CgenError::Validation(format!(
                "Named argument '{}' needs a name or a short-name",
                path
            )));
        }

        if let Some(name) = argument.name.as_deref() {
            check_word(&format!("{}.name", path), name, "Argument name")?;
            if argument.named && name.contains('=') {
                return Err(CgenError::Validation(format!(
                    "Flag name '{}' cannot contain '='",
                    name
                )));
            }
        }

        if let Some(short) = argument.short_name.as_deref() {
            check_word(&format!("{}.short-name", path), short, "Short name")?;
            if short.chars().count() != 1 || short == "=" {
                return Err(CgenError::Validation(format!(
                    "Short name '{}' of '{}' must be a single character",
                    short, path
                )));
            }
        }

        if argument.chainable && argument.short_name.is_none() {
            return Err(CgenError::Validation(format!(
                "Argument '{}' is chainable but has no short-name",
                path
            )));
        }

        let completion = &argument.completion;
        let texts = [
            ("short-description", argument.short_description.as_deref()),
            ("long-description", argument.long_description.as_deref()),
            ("exclusive-group", argument.exclusive_group.as_deref()),
            ("deprecated", argument.deprecated.as_deref()),
            ("value-label", argument.value_label.as_deref()),
            ("example", argument.example.as_deref()),
            ("completion.bash", completion.bash.as_deref()),
            ("completion.fish", completion.fish.as_deref()),
            ("completion.zsh", completion.zsh.as_deref()),
        ];
        for (field, text) in texts {
            check_text(&format!("{}.{}", path, field), text)?;
        }
        for value in &completion.values {
            check_text(&format!("{}.completion.values", path), Some(value))?;
        }

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn scope_label(parent: &str) -> &str {
    match parent.strip_suffix('.') {
        Some(scope) => scope,
        None => "<root>",
    }
}

/// Names that shells see as single words
fn check_word(field: &str, word: &str, what: &str) -> Result<(), CgenError> {
    if word.is_empty() {
        return Err(CgenError::Validation(format!("{} at '{}' cannot be empty", what, field)));
    }
    if word.starts_with('-') || word.contains('/') || word.chars().any(char::is_whitespace) {
        return Err(CgenError::Validation(format!(
            "{} '{}' at '{}' must be a single word without '/' and not starting with '-'",
            what, word, field
        )));
    }
    check_text(field, Some(word))
}

fn check_text(field: &str, text: Option<&str>) -> Result<(), CgenError> {
    match text {
        Some(text) if text.contains('\0') => Err(CgenError::Escape(format!(
            "'{}' contains a NUL byte, which no shell can represent",
            field
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgen_core::Completion;

    fn create_valid_cli() -> Cli {
        Cli::new("cli")
            .with_argument(Argument::flag("verbose").with_short("v"))
            .with_command(
                Command::new("push").with_alias("p").with_argument(
                    Argument::flag("target")
                        .with_short("t")
                        .with_completion(Completion::static_values(["staging", "prod"])),
                ),
            )
    }

    #[test]
    fn test_valid_cli() {
        let validator = ConfigValidator::new();
        assert!(validator.validate(&create_valid_cli()).is_ok());
    }

    #[test]
    fn test_invalid_cli_name() {
        let validator = ConfigValidator::new();

        for name in ["", "my tool", "-tool", "tool/x", "a$b"] {
            let cli = Cli::new(name);
            assert!(
                matches!(validator.validate(&cli), Err(CgenError::Validation(_))),
                "{name:?} should be rejected"
            );
        }

        for name in ["git", "docker-compose", "g++", "python3.12", "_x"] {
            assert!(validator.validate(&Cli::new(name)).is_ok(), "{name:?}");
        }
    }

    #[test]
    fn test_duplicate_sibling_alias() {
        let cli = Cli::new("cli")
            .with_command(Command::new("push").with_alias("p"))
            .with_command(Command::new("pull").with_alias("p"));

        let err = ConfigValidator::new().validate(&cli).unwrap_err();
        assert!(err.to_string().contains("Duplicate command name or alias 'p'"));
    }

    #[test]
    fn test_same_name_in_different_scopes() {
        let cli = Cli::new("cli")
            .with_command(Command::new("remote").with_command(Command::new("add")))
            .with_command(Command::new("add"));
        assert!(ConfigValidator::new().validate(&cli).is_ok());
    }

    #[test]
    fn test_named_argument_without_names() {
        let mut arg = Argument::default();
        arg.named = true;
        let cli = Cli::new("cli").with_command(Command::new("run").with_argument(arg));

        let err = ConfigValidator::new().validate(&cli).unwrap_err();
        assert!(err.to_string().contains("commands[run].arguments[#1]"));
    }

    #[test]
    fn test_short_name_rules() {
        let validator = ConfigValidator::new();

        let cli = Cli::new("cli").with_argument(Argument::flag("all").with_short("al"));
        assert!(validator.validate(&cli).is_err());

        let cli = Cli::new("cli").with_argument(Argument::flag("all").chainable());
        assert!(validator.validate(&cli).is_err());

        let cli = Cli::new("cli").with_argument(Argument::short_flag("a").chainable());
        assert!(validator.validate(&cli).is_ok());
    }

    #[test]
    fn test_duplicate_flag_in_scope() {
        let cli = Cli::new("cli")
            .with_argument(Argument::flag("out").with_short("o"))
            .with_argument(Argument::flag("output").with_short("o"));

        let err = ConfigValidator::new().validate(&cli).unwrap_err();
        assert!(err.to_string().contains("Duplicate flag '-o'"));
    }

    #[test]
    fn test_nul_byte_rejected() {
        let cli = Cli::new("cli").with_argument(
            Argument::positional("env")
                .with_completion(Completion::static_values(["ok", "bad\0value"])),
        );

        let err = ConfigValidator::new().validate(&cli).unwrap_err();
        assert!(matches!(err, CgenError::Escape(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_command_name_must_be_a_word() {
        let cli = Cli::new("cli").with_command(Command::new("two words"));
        assert!(ConfigValidator::new().validate(&cli).is_err());

        let cli = Cli::new("cli").with_command(Command::new("--run"));
        assert!(ConfigValidator::new().validate(&cli).is_err());

        let cli = Cli::new("cli").with_command(Command::new("remote/add"));
        assert!(ConfigValidator::new().validate(&cli).is_err());
    }
}
