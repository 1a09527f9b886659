//! YAML description parser
//!
//! The document is first read into raw structs where every field is optional.
//! Each model value then starts from its default constructor and the fields
//! present in the document are laid over it, so default policy lives in the
//! model and not in deserialization hooks.

use cgen_core::{Argument, CgenError, Cli, Command, Completion};
use cgen_types::{CompletionKind, LongSeparator, ShortSeparator};
use serde::Deserialize;

/// YAML parser for tool descriptions
pub struct YamlParser;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawCli {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    version: Option<serde_yaml::Value>,

    #[serde(default)]
    short_description: Option<String>,

    #[serde(default)]
    long_description: Option<String>,

    #[serde(default)]
    arguments: Vec<RawArgument>,

    #[serde(default)]
    commands: Vec<RawCommand>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawCommand {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    aliases: Vec<String>,

    #[serde(default)]
    arguments: Vec<RawArgument>,

    #[serde(default)]
    commands: Vec<RawCommand>,

    #[serde(default)]
    deprecated: Option<serde_yaml::Value>,

    #[serde(default)]
    hidden: Option<bool>,

    #[serde(default)]
    usage: Option<String>,

    #[serde(default)]
    short_description: Option<String>,

    #[serde(default)]
    long_description: Option<String>,

    #[serde(default)]
    example: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawArgument {
    #[serde(default)]
    named: Option<bool>,

    #[serde(default)]
    single_dash_long: Option<bool>,

    /// Kept as text so a bad value is reported with its field path
    #[serde(default)]
    long_value_separator: Option<String>,

    #[serde(default)]
    short_value_separator: Option<String>,

    #[serde(default)]
    name: Option<String>,

    /// Scalars like `1` are accepted as short names
    #[serde(default)]
    short_name: Option<serde_yaml::Value>,

    #[serde(default)]
    short_description: Option<String>,

    #[serde(default)]
    long_description: Option<String>,

    #[serde(default)]
    completion: Option<RawCompletion>,

    #[serde(default)]
    exclusive_group: Option<String>,

    #[serde(default)]
    chainable: Option<bool>,

    #[serde(default)]
    hidden: Option<bool>,

    #[serde(default)]
    deprecated: Option<serde_yaml::Value>,

    #[serde(default)]
    value_label: Option<String>,

    #[serde(default)]
    sort: Option<bool>,

    #[serde(default)]
    example: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCompletion {
    #[serde(default, rename = "type")]
    kind: Option<String>,

    #[serde(default)]
    values: Vec<serde_yaml::Value>,

    #[serde(default)]
    bash: Option<String>,

    #[serde(default)]
    fish: Option<String>,

    #[serde(default)]
    zsh: Option<String>,
}

impl YamlParser {
    /// Parse a YAML (or JSON) description into a model
    pub fn parse(content: &str) -> Result<Cli, CgenError> {
        let raw = serde_yaml::from_str::<RawCli>(content)
            .map_err(|e| CgenError::Config(format!("YAML parse error: {}", e)))?;
        cli_from_raw(raw)
    }
}

fn cli_from_raw(raw: RawCli) -> Result<Cli, CgenError> {
    let mut cli = Cli::new(raw.name.unwrap_or_default());
    cli.version = raw.version.and_then(yaml_scalar_to_string);
    cli.short_description = raw.short_description;
    cli.long_description = raw.long_description;
    cli.arguments = arguments_from_raw(raw.arguments, "")?;
    cli.commands = commands_from_raw(raw.commands, "")?;
    Ok(cli)
}

fn commands_from_raw(raw: Vec<RawCommand>, parent: &str) -> Result<Vec<Command>, CgenError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, cmd)| {
            let path = match cmd.name.as_deref() {
                Some(name) => format!("{}commands[{}]", parent, name),
                None => format!("{}commands[#{}]", parent, index + 1),
            };
            command_from_raw(cmd, &path)
        })
        .collect()
}

fn command_from_raw(raw: RawCommand, path: &str) -> Result<Command, CgenError> {
    let child_prefix = format!("{}.", path);
    let mut cmd = Command::new(raw.name.unwrap_or_default());
    cmd.aliases = raw.aliases;
    cmd.arguments = arguments_from_raw(raw.arguments, &child_prefix)?;
    cmd.commands = commands_from_raw(raw.commands, &child_prefix)?;
    cmd.deprecated = raw.deprecated.and_then(deprecation_notice);
    if let Some(hidden) = raw.hidden {
        cmd.hidden = hidden;
    }
    cmd.usage = raw.usage;
    cmd.short_description = raw.short_description;
    cmd.long_description = raw.long_description;
    cmd.example = raw.example;
    Ok(cmd)
}

fn arguments_from_raw(raw: Vec<RawArgument>, parent: &str) -> Result<Vec<Argument>, CgenError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            let path = match arg.name.as_deref() {
                Some(name) => format!("{}arguments[{}]", parent, name),
                None => format!("{}arguments[#{}]", parent, index + 1),
            };
            argument_from_raw(arg, &path)
        })
        .collect()
}

fn argument_from_raw(raw: RawArgument, path: &str) -> Result<Argument, CgenError> {
    let mut arg = Argument::default();

    if let Some(named) = raw.named {
        arg.named = named;
    }
    if let Some(single_dash) = raw.single_dash_long {
        arg.single_dash_long = single_dash;
    }
    if let Some(separator) = raw.long_value_separator {
        arg.long_separator = separator.parse::<LongSeparator>().map_err(|_| {
            CgenError::invalid_value(
                format!("{}.long-value-separator", path),
                separator.as_str(),
                LongSeparator::accepted(),
            )
        })?;
    }
    if let Some(separator) = raw.short_value_separator {
        arg.short_separator = separator.parse::<ShortSeparator>().map_err(|_| {
            CgenError::invalid_value(
                format!("{}.short-value-separator", path),
                separator.as_str(),
                ShortSeparator::accepted(),
            )
        })?;
    }
    arg.name = raw.name;
    arg.short_name = raw.short_name.and_then(yaml_scalar_to_string);
    arg.short_description = raw.short_description;
    arg.long_description = raw.long_description;
    if let Some(completion) = raw.completion {
        arg.completion = completion_from_raw(completion, path)?;
    }
    arg.exclusive_group = raw.exclusive_group.filter(|g| !g.is_empty());
    if let Some(chainable) = raw.chainable {
        arg.chainable = chainable;
    }
    if let Some(hidden) = raw.hidden {
        arg.hidden = hidden;
    }
    arg.deprecated = raw.deprecated.and_then(deprecation_notice);
    arg.value_label = raw.value_label;
    if let Some(sort) = raw.sort {
        arg.sort = sort;
    }
    arg.example = raw.example;

    Ok(arg)
}

fn completion_from_raw(raw: RawCompletion, path: &str) -> Result<Completion, CgenError> {
    let mut completion = Completion::default();

    if let Some(kind) = raw.kind {
        completion.kind = kind.parse::<CompletionKind>().map_err(|_| {
            CgenError::invalid_value(
                format!("{}.completion.type", path),
                kind.as_str(),
                CompletionKind::accepted(),
            )
        })?;
    }
    completion.values = raw
        .values
        .into_iter()
        .filter_map(yaml_scalar_to_string)
        .collect();
    completion.bash = raw.bash;
    completion.fish = raw.fish;
    completion.zsh = raw.zsh;

    Ok(completion)
}

/// `deprecated: true` and `deprecated: "use x"` are both notices; `false` is none
fn deprecation_notice(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(true) => Some(String::new()),
        serde_yaml::Value::Bool(false) => None,
        other => yaml_scalar_to_string(other),
    }
}

fn yaml_scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s),
        // For non-scalars (seq/map), just serialize them.
        other => serde_yaml::to_string(&other)
            .ok()
            .map(|s| s.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_description() {
        let yaml = "name: tool\n";
        let cli = YamlParser::parse(yaml).unwrap();
        assert_eq!(cli.name, "tool");
        assert!(cli.arguments.is_empty());
        assert!(cli.commands.is_empty());
    }

    #[test]
    fn test_argument_defaults_are_applied() {
        let yaml = r#"
name: tool
arguments:
  - name: input
"#;
        let cli = YamlParser::parse(yaml).unwrap();
        let arg = &cli.arguments[0];
        assert!(!arg.named);
        assert!(!arg.single_dash_long);
        assert_eq!(arg.long_separator, LongSeparator::Space);
        assert_eq!(arg.short_separator, ShortSeparator::Space);
        assert!(!arg.hidden);
        assert_eq!(arg.completion.kind, CompletionKind::None);
    }

    #[test]
    fn test_parse_full_description() {
        let yaml = r#"
name: cli
version: 1.0
short-description: cli short desc
arguments:
  - named: true
    name: verbose
    short-name: v
commands:
  - name: push
    aliases: [p]
    deprecated: true
    arguments:
      - named: true
        name: target
        short-name: t
        long-value-separator: both
        short-value-separator: attached
        exclusive-group: destination
        completion:
          type: static
          values: [staging, prod, 1]
    commands:
      - name: all
        hidden: true
"#;
        let cli = YamlParser::parse(yaml).unwrap();
        assert_eq!(cli.version.as_deref(), Some("1.0"));
        assert_eq!(cli.commands[0].aliases, vec!["p"]);
        assert_eq!(cli.commands[0].deprecated.as_deref(), Some(""));

        let target = &cli.commands[0].arguments[0];
        assert!(target.named);
        assert_eq!(target.long_separator, LongSeparator::Both);
        assert_eq!(target.short_separator, ShortSeparator::Attached);
        assert_eq!(target.exclusive_group.as_deref(), Some("destination"));
        assert_eq!(target.completion.values, vec!["staging", "prod", "1"]);
        assert!(cli.commands[0].commands[0].hidden);
    }

    #[test]
    fn test_invalid_separator_names_field_path() {
        let yaml = r#"
name: cli
commands:
  - name: push
    arguments:
      - named: true
        name: format
        long-value-separator: colon
"#;
        let err = YamlParser::parse(yaml).unwrap_err();
        match &err {
            CgenError::InvalidValue { field, value, accepted } => {
                assert_eq!(field, "commands[push].arguments[format].long-value-separator");
                assert_eq!(value, "colon");
                assert_eq!(*accepted, "space, equal, both");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.is_config_error());
    }

    #[test]
    fn test_invalid_completion_type() {
        let yaml = r#"
name: cli
arguments:
  - name: dir
    completion:
      type: directory
"#;
        let err = YamlParser::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("arguments[dir].completion.type"));
        assert!(err.to_string().contains("none, static, file, folder, function"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
name: cli
arguments:
  - name: dir
    shortname: d
"#;
        assert!(YamlParser::parse(yaml).is_err());
    }

    #[test]
    fn test_parse_json_document() {
        let json = r#"{"name": "cli", "commands": [{"name": "run", "aliases": ["r"]}]}"#;
        let cli = YamlParser::parse(json).unwrap();
        assert_eq!(cli.commands[0].name, "run");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let yaml = "name: [unterminated";
        let result = YamlParser::parse(yaml);
        assert!(matches!(result, Err(CgenError::Config(_))));
    }
}
