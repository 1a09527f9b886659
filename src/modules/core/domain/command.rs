//! Command definitions

use serde::Serialize;

use super::Argument;

/// A (sub)command of the tool
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Command {
    /// Command name
    pub name: String,

    /// Other names selecting the same command
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Accepted arguments, in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Argument>,

    /// Nested commands
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,

    /// Deprecation notice (documentation only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,

    /// Never offered as a suggestion
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,

    /// Usage line, e.g. `add [-F file | -D dir]... profile`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// One-line help
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Full help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,

    /// Usage example
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl Command {
    /// Create a command with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add an argument
    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Add a nested command
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Set the one-line help
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = Some(description.into());
        self
    }

    /// Hide from suggestions
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Mark as deprecated
    pub fn deprecated(mut self, notice: impl Into<String>) -> Self {
        self.deprecated = Some(notice.into());
        self
    }

    /// Name followed by aliases
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether `word` selects this command
    pub fn is_named(&self, word: &str) -> bool {
        self.names().any(|name| name == word)
    }

    /// Find a direct subcommand by name or alias
    pub fn find_command(&self, word: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.is_named(word))
    }

    /// Best available help text
    pub fn description(&self) -> Option<&str> {
        self.short_description
            .as_deref()
            .or(self.long_description.as_deref())
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        let cmd = Command::new("push").with_alias("p").with_alias("send");
        assert_eq!(cmd.names().collect::<Vec<_>>(), vec!["push", "p", "send"]);
        assert!(cmd.is_named("send"));
        assert!(!cmd.is_named("pull"));
    }

    #[test]
    fn test_find_command_by_alias() {
        let cmd = Command::new("remote")
            .with_command(Command::new("add").with_alias("a"))
            .with_command(Command::new("remove").with_alias("rm"));

        assert_eq!(cmd.find_command("rm").map(|c| c.name.as_str()), Some("remove"));
        assert_eq!(cmd.find_command("add").map(|c| c.name.as_str()), Some("add"));
        assert!(cmd.find_command("rename").is_none());
    }

    #[test]
    fn test_description_fallback() {
        let mut cmd = Command::new("push");
        assert!(cmd.description().is_none());
        cmd.long_description = Some("Push everything".to_string());
        assert_eq!(cmd.description(), Some("Push everything"));
        cmd.short_description = Some("Push".to_string());
        assert_eq!(cmd.description(), Some("Push"));
    }
}
