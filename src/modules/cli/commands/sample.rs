//! Sample command implementation
//!
//! Prints a small description exercising most features, as a starting point
//! for a new tool.

use cgen_core::{Argument, CgenError, Cli, Command, Completion};
use cgen_types::{LongSeparator, Shell, ShortSeparator};
use clap::{Args, ValueEnum};

/// Output format of the sample
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Yaml,
    Json,
}

/// Sample command arguments
#[derive(Args, Debug)]
pub struct SampleCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = SampleFormat::Yaml)]
    pub format: SampleFormat,
}

impl SampleCommand {
    /// Execute the sample command
    pub fn execute(&self) -> Result<(), CgenError> {
        print!("{}", self.render()?);
        Ok(())
    }

    fn render(&self) -> Result<String, CgenError> {
        let cli = sample_cli();
        match self.format {
            SampleFormat::Yaml => Ok(serde_yaml::to_string(&cli)?),
            SampleFormat::Json => Ok(serde_json::to_string_pretty(&cli)? + "\n"),
        }
    }
}

/// The sample description
pub fn sample_cli() -> Cli {
    let mut cli = Cli::new("cli")
        .with_version("0.0.1")
        .with_argument(
            Argument::flag("version")
                .with_short("v")
                .with_description("Print the version"),
        )
        .with_command(
            Command::new("remote")
                .with_alias("r")
                .with_description("Manage remotes")
                .with_command(
                    Command::new("add")
                        .with_alias("a")
                        .with_description("Add a remote")
                        .with_argument(Argument::positional("name").with_description("Remote name"))
                        .with_argument(
                            Argument::positional("url").with_completion(Completion::none()),
                        ),
                )
                .with_command(
                    Command::new("rm")
                        .with_description("Remove a remote")
                        .deprecated("use 'remote remove'"),
                ),
        )
        .with_command(
            Command::new("push")
                .with_alias("p")
                .with_description("Upload changes")
                .with_argument(
                    Argument::flag("target")
                        .with_short("t")
                        .with_description("Deployment target")
                        .with_long_separator(LongSeparator::Equal)
                        .with_short_separator(ShortSeparator::Attached)
                        .with_completion(Completion::static_values(["staging", "prod"])),
                )
                .with_argument(
                    Argument::flag("branch")
                        .with_description("Branch to push")
                        .with_completion(
                            Completion::function()
                                .with_body(Shell::Bash, "git branch --format='%(refname:short)'")
                                .with_body(Shell::Fish, "git branch --format='%(refname:short)'")
                                .with_body(Shell::Zsh, "git branch --format='%(refname:short)'"),
                        ),
                )
                .with_argument(Argument::flag("json").in_group("format"))
                .with_argument(Argument::flag("yaml").in_group("format"))
                .with_argument(
                    Argument::positional("file")
                        .with_description("File to upload")
                        .with_completion(Completion::file()),
                ),
        );
    cli.short_description = Some("Example tool".to_string());
    cli.long_description = Some("An example tool description for cgen.".to_string());
    cli
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgen_parser::parse_string;

    #[test]
    fn test_yaml_sample_parses_back() {
        let yaml = SampleCommand {
            format: SampleFormat::Yaml,
        }
        .render()
        .unwrap();
        assert_eq!(parse_string(&yaml).unwrap(), sample_cli());
    }

    #[test]
    fn test_json_sample_parses_back() {
        let json = SampleCommand {
            format: SampleFormat::Json,
        }
        .render()
        .unwrap();
        assert_eq!(parse_string(&json).unwrap(), sample_cli());
    }
}
