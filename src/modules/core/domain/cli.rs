//! Root tool definition

use serde::Serialize;

use super::{Argument, Command};

/// Root of a tool description
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Cli {
    /// Tool name; used verbatim in generated function and file names
    pub name: String,

    /// Tool version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// One-line help
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Full help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,

    /// Global arguments, accepted at every depth
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Argument>,

    /// Top-level commands
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
}

impl Cli {
    /// Create an empty description for a tool
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            short_description: None,
            long_description: None,
            arguments: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Add a global argument
    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Add a top-level command
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Find a top-level command by name or alias
    pub fn find_command(&self, word: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.is_named(word))
    }

    /// Follow a path of names/aliases down the command tree
    pub fn resolve(&self, path: &[&str]) -> Option<&Command> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.find_command(first)?, |cmd, word| cmd.find_command(word))
    }

    /// Global flags (named global arguments)
    pub fn global_flags(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|a| a.named)
    }

    /// Total number of commands at every depth
    pub fn command_count(&self) -> usize {
        fn count(commands: &[Command]) -> usize {
            commands.iter().map(|c| 1 + count(&c.commands)).sum()
        }
        count(&self.commands)
    }

    /// Best available help text
    pub fn description(&self) -> Option<&str> {
        self.short_description
            .as_deref()
            .or(self.long_description.as_deref())
            .filter(|d| !d.is_empty())
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new("cli")
    }
}
