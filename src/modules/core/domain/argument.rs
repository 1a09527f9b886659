//! Argument definitions

use cgen_types::{CompletionKind, LongSeparator, ShortSeparator};
use serde::Serialize;

use super::Completion;

/// A flag (`named`) or positional argument
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Argument {
    /// Flag-style when true, positional when false
    pub named: bool,

    /// Render the long form as `-name` instead of `--name`
    pub single_dash_long: bool,

    /// How the long form takes its value
    #[serde(rename = "long-value-separator")]
    pub long_separator: LongSeparator,

    /// How the short form takes its value
    #[serde(rename = "short-value-separator")]
    pub short_separator: ShortSeparator,

    /// Long name (flags) or label (positionals)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Single-character short name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    /// One-line help
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Full help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,

    /// Value completion
    pub completion: Completion,

    /// Siblings sharing a tag are offered only until one of them is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_group: Option<String>,

    /// The short form may be clustered with other chainable flags (`-hal`)
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub chainable: bool,

    /// Never offered as a suggestion
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,

    /// Deprecation notice (documentation only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,

    /// Placeholder for the value in documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_label: Option<String>,

    /// Sort the option list this argument belongs to in man pages
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sort: bool,

    /// Usage example
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl Default for Argument {
    fn default() -> Self {
        Self {
            named: false,
            single_dash_long: false,
            long_separator: LongSeparator::Space,
            short_separator: ShortSeparator::Space,
            name: None,
            short_name: None,
            short_description: None,
            long_description: None,
            completion: Completion::none(),
            exclusive_group: None,
            chainable: false,
            hidden: false,
            deprecated: None,
            value_label: None,
            sort: false,
            example: None,
        }
    }
}

impl Argument {
    /// Create a `--name` flag
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            named: true,
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Create a flag that only has a short form
    pub fn short_flag(short: impl Into<String>) -> Self {
        Self {
            named: true,
            short_name: Some(short.into()),
            ..Self::default()
        }
    }

    /// Create a positional argument
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the short name
    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short_name = Some(short.into());
        self
    }

    /// Set the completion
    pub fn with_completion(mut self, completion: Completion) -> Self {
        self.completion = completion;
        self
    }

    /// Set the one-line help
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = Some(description.into());
        self
    }

    /// Set the long separator mode
    pub fn with_long_separator(mut self, separator: LongSeparator) -> Self {
        self.long_separator = separator;
        self
    }

    /// Set the short separator mode
    pub fn with_short_separator(mut self, separator: ShortSeparator) -> Self {
        self.short_separator = separator;
        self
    }

    /// Put this argument into an exclusivity group
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.exclusive_group = Some(group.into());
        self
    }

    /// Set the value placeholder
    pub fn with_value_label(mut self, label: impl Into<String>) -> Self {
        self.value_label = Some(label.into());
        self
    }

    /// Render the long form with a single dash
    pub fn single_dash(mut self) -> Self {
        self.single_dash_long = true;
        self
    }

    /// Allow clustering of the short form
    pub fn chainable(mut self) -> Self {
        self.chainable = true;
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

    /// `--name` or `-name`, for flags with a long name
    pub fn long_flag(&self) -> Option<String> {
        if !self.named {
            return None;
        }
        let dashes = if self.single_dash_long { "-" } else { "--" };
        self.name.as_ref().map(|name| format!("{}{}", dashes, name))
    }

    /// `-n`, for flags with a short name
    pub fn short_flag_token(&self) -> Option<String> {
        if !self.named {
            return None;
        }
        self.short_name.as_ref().map(|short| format!("-{}", short))
    }

    /// Every spelling of the flag without value decoration
    pub fn flag_forms(&self) -> Vec<String> {
        self.long_flag()
            .into_iter()
            .chain(self.short_flag_token())
            .collect()
    }

    /// Whether the argument takes a value
    ///
    /// A flag with no completion is a switch; a positional always fills its slot.
    pub fn consumes_value(&self) -> bool {
        !self.named || self.completion.kind != CompletionKind::None
    }

    /// Best available help text
    pub fn description(&self) -> Option<&str> {
        self.short_description
            .as_deref()
            .or(self.long_description.as_deref())
            .filter(|d| !d.is_empty())
    }

    /// Name shown for the expected value
    pub fn label(&self) -> &str {
        self.value_label
            .as_deref()
            .or(self.name.as_deref())
            .or(self.short_name.as_deref())
            .unwrap_or("value")
    }

    /// The short name is a single character that may be clustered
    pub fn chain_letter(&self) -> Option<&str> {
        if !self.named || !self.chainable {
            return None;
        }
        self.short_name
            .as_deref()
            .filter(|short| short.chars().count() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_defaults() {
        let arg = Argument::default();
        assert!(!arg.named);
        assert!(!arg.single_dash_long);
        assert_eq!(arg.long_separator, LongSeparator::Space);
        assert_eq!(arg.short_separator, ShortSeparator::Space);
        assert!(!arg.hidden);
        assert_eq!(arg.completion.kind, CompletionKind::None);
    }

    #[test]
    fn test_flag_forms() {
        let arg = Argument::flag("target").with_short("t");
        assert_eq!(arg.long_flag().as_deref(), Some("--target"));
        assert_eq!(arg.short_flag_token().as_deref(), Some("-t"));
        assert_eq!(arg.flag_forms(), vec!["--target", "-t"]);

        let arg = Argument::flag("verbose").single_dash();
        assert_eq!(arg.long_flag().as_deref(), Some("-verbose"));

        let arg = Argument::positional("file");
        assert!(arg.flag_forms().is_empty());
    }

    #[test]
    fn test_switch_consumes_no_value() {
        assert!(!Argument::flag("verbose").consumes_value());
        assert!(Argument::flag("out")
            .with_completion(Completion::file())
            .consumes_value());
        assert!(Argument::positional("name").consumes_value());
    }

    #[test]
    fn test_label_fallbacks() {
        assert_eq!(Argument::flag("out").with_value_label("path").label(), "path");
        assert_eq!(Argument::flag("out").label(), "out");
        assert_eq!(Argument::short_flag("o").label(), "o");
    }

    #[test]
    fn test_chain_letter() {
        assert_eq!(Argument::short_flag("a").chainable().chain_letter(), Some("a"));
        assert_eq!(Argument::short_flag("a").chain_letter(), None);
        assert_eq!(Argument::short_flag("ab").chainable().chain_letter(), None);
    }
}
